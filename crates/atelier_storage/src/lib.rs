//! Dropbox object store client and the upload-and-link resolution pipeline
//! primitives for Atelier.
//!
//! The [`ObjectStore`] trait captures exactly the remote operations the
//! pipeline consumes: existence probe, single-shot upload, session-based
//! chunked upload, and shared-link listing/creation. [`DropboxStore`] is the
//! production implementation over the Dropbox HTTP API v2 with OAuth2
//! refresh-token auth.
//!
//! On top of the trait sit the resolution primitives:
//! - [`resolve_unique_path`] finds a collision-free destination path
//! - [`upload_chunked`] drives the explicit upload-session state machine
//! - [`get_or_create_shared_link`] reuses existing links before creating one
//! - [`urls`] derives display/download and model-input URL variants

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod dropbox;
mod links;
mod paths;
mod store;
mod upload;
pub mod urls;

pub use dropbox::DropboxStore;
pub use links::get_or_create_shared_link;
pub use paths::{MAX_RESOLVE_ATTEMPTS, resolve_unique_path};
pub use store::{ObjectMetadata, ObjectStore, Probe, SharedLink};
pub use upload::{CHUNK_SIZE, UploadState, upload_chunked};
