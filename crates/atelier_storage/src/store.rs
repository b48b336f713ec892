//! Object store trait definition.

use atelier_error::AtelierResult;
use serde::{Deserialize, Serialize};

/// Outcome of an existence probe.
///
/// A missing object is an ordinary value here, not an error: path resolution
/// keeps probing until it sees `Missing`. Transport and permission failures
/// surface as `Err` from [`ObjectStore::probe`] instead, so callers never
/// have to inspect error substructure to tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Probe {
    /// An object exists at the probed path
    Found(ObjectMetadata),
    /// No object exists at the probed path
    Missing,
}

/// Metadata for an object that exists in the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectMetadata {
    /// Canonical path of the object
    pub path: String,
    /// Object size in bytes, when the store reports it
    pub size: Option<u64>,
}

/// A durable, publicly resolvable link to a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedLink {
    /// Store path the link resolves to
    pub path: String,
    /// Public URL
    pub url: String,
}

/// Remote object store operations consumed by the pipeline.
///
/// Write semantics: both `upload` and `session_finish` commit in add mode and
/// fail with a conflict error if the destination already holds an object.
/// Callers obtain destinations from [`crate::resolve_unique_path`]; two
/// concurrent callers could still race to the same free path, in which case
/// the second commit fails. That race is documented, not masked.
#[async_trait::async_trait]
pub trait ObjectStore: Send + Sync {
    /// Probe whether an object exists at `path`.
    async fn probe(&self, path: &str) -> AtelierResult<Probe>;

    /// Upload a payload in a single call. Fails if `path` is occupied.
    async fn upload(&self, bytes: &[u8], path: &str) -> AtelierResult<()>;

    /// Start an upload session with the first chunk, returning the session id.
    async fn session_start(&self, chunk: &[u8]) -> AtelierResult<String>;

    /// Append a chunk at `offset` bytes into an open session.
    ///
    /// `offset` must equal the number of bytes already transmitted for the
    /// session; the store rejects mismatches.
    async fn session_append(&self, session_id: &str, offset: u64, chunk: &[u8])
    -> AtelierResult<()>;

    /// Commit a session to `path` with the final chunk at `offset`.
    async fn session_finish(
        &self,
        session_id: &str,
        offset: u64,
        chunk: &[u8],
        path: &str,
    ) -> AtelierResult<()>;

    /// List existing direct shared links for `path`, in stable store order.
    async fn list_shared_links(&self, path: &str) -> AtelierResult<Vec<SharedLink>>;

    /// Create a new shared link for `path` with default visibility.
    ///
    /// Not idempotent at the store level: call
    /// [`crate::get_or_create_shared_link`] instead of calling this directly.
    async fn create_shared_link(&self, path: &str) -> AtelierResult<SharedLink>;
}
