//! Collaborator traits.

use atelier_error::AtelierResult;

/// Produces a marketing description for an image reachable at a URL.
///
/// The returned text is treated as opaque by the pipeline; no parsing
/// happens downstream of this call.
#[async_trait::async_trait]
pub trait Summarizer: Send + Sync {
    /// Generate a description for the image at `image_url`.
    async fn summarize(&self, image_url: &str) -> AtelierResult<String>;
}

/// Removes the background from an image, returning bytes in a
/// transparency-carrying format.
#[async_trait::async_trait]
pub trait BackgroundRemover: Send + Sync {
    /// Strip the background from the supplied image bytes.
    async fn remove_background(&self, bytes: &[u8]) -> AtelierResult<Vec<u8>>;
}
