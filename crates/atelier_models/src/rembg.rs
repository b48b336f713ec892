//! Background-removal client for a rembg server.

use crate::BackgroundRemover;
use atelier_error::{AtelierResult, HttpError};
use tracing::{debug, error, instrument};

/// HTTP client for a [rembg](https://github.com/danielgatis/rembg) server.
///
/// Posts the original image bytes to the server's removal endpoint and
/// receives PNG bytes with the background replaced by transparency. Only
/// constructed when a server URL is configured; without one the pipeline
/// simply skips the alpha thumbnail.
#[derive(Debug, Clone)]
pub struct RembgClient {
    client: reqwest::Client,
    endpoint: String,
}

impl RembgClient {
    /// Creates a client for a rembg server base URL (e.g.
    /// `http://localhost:7000`).
    pub fn new(base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        let endpoint = format!("{}/api/remove", base.trim_end_matches('/'));
        debug!(endpoint = %endpoint, "Creating new rembg client");
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }
}

#[async_trait::async_trait]
impl BackgroundRemover for RembgClient {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn remove_background(&self, bytes: &[u8]) -> AtelierResult<Vec<u8>> {
        let response = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "application/octet-stream")
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "Background removal request failed");
                HttpError::new(format!("rembg request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %body, "rembg server returned error");
            return Err(HttpError::new(format!("rembg returned {status}: {body}")).into());
        }

        let cutout = response
            .bytes()
            .await
            .map_err(|e| HttpError::new(format!("failed to read rembg response: {e}")))?;
        debug!(size = cutout.len(), "Received background-removed image");
        Ok(cutout.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_is_normalized() {
        let client = RembgClient::new("http://localhost:7000/");
        assert_eq!(client.endpoint, "http://localhost:7000/api/remove");
    }
}
