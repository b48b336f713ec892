//! Core data types for the Atelier asset uploader.
//!
//! This crate defines the domain model shared by the pipeline, storage and
//! display layers: upload items and batches, per-image processing results,
//! the session context that guards against reprocessing, and the status sink
//! seam through which the pipeline reports progress.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod batch;
mod item;
mod result;
mod session;
mod status;

pub use batch::UploadBatch;
pub use item::{ItemKind, UploadItem, file_ext, file_stem, is_image_name};
pub use result::ProcessingResult;
pub use session::SessionContext;
pub use status::{StatusSink, TracingStatusSink};
