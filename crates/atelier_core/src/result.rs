//! Per-image processing results.

use serde::{Deserialize, Serialize};

/// Everything produced for one image: share links, thumbnail renditions,
/// generated summary and the optional companion asset link.
///
/// Produced once per image per session and immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingResult {
    /// File name without extension; associates the image with its companion
    pub stem: String,
    /// Original file name as submitted
    pub file_name: String,
    /// Decoded pixel width of the original
    pub width: u32,
    /// Decoded pixel height of the original
    pub height: u32,
    /// Decoded image format name (e.g. "png")
    pub format: String,
    /// Inline-display variant of the original's shared link
    pub display_url: String,
    /// Forced-download variant of the original's shared link
    pub download_url: String,
    /// Display URL of the JPEG thumbnail
    pub thumb_jpeg_url: String,
    /// Display URL of the lossy WebP thumbnail
    pub thumb_webp_url: String,
    /// Display URL of the background-removed lossless WebP thumbnail
    pub alpha_thumb_url: Option<String>,
    /// Generated marketing description (or a bracketed failure marker)
    pub summary: String,
    /// Forced-download URL of the companion asset, when one was in the batch
    pub asset_url: Option<String>,
}

impl ProcessingResult {
    /// Copyable HTML snippet combining the download link and the summary.
    ///
    /// The hidden `info` block carries the asset link when a companion was
    /// uploaded, falling back to the image download link otherwise.
    pub fn html_snippet(&self) -> String {
        let link = self.asset_url.as_deref().unwrap_or(&self.download_url);
        format!(
            "<div class=\"info\" style=\"display:none\">\n[a-tag:author]\n[downlink:{}]\n</div>\n\n{}\n",
            link, self.summary
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(asset_url: Option<&str>) -> ProcessingResult {
        ProcessingResult {
            stem: "brick".into(),
            file_name: "brick.png".into(),
            width: 512,
            height: 512,
            format: "png".into(),
            display_url: "https://www.dropbox.com/s/x/brick.png?raw=1".into(),
            download_url: "https://www.dropbox.com/s/x/brick.png?dl=1".into(),
            thumb_jpeg_url: "https://www.dropbox.com/s/y/brick_thumb.jpg?raw=1".into(),
            thumb_webp_url: "https://www.dropbox.com/s/z/brick_thumb.webp?raw=1".into(),
            alpha_thumb_url: None,
            summary: "<div class=\"desc\">copy</div>".into(),
            asset_url: asset_url.map(Into::into),
        }
    }

    #[test]
    fn snippet_prefers_asset_link() {
        let r = result(Some("https://www.dropbox.com/s/a/brick.zip?dl=1"));
        assert!(r.html_snippet().contains("[downlink:https://www.dropbox.com/s/a/brick.zip?dl=1]"));
    }

    #[test]
    fn snippet_falls_back_to_download_link() {
        let r = result(None);
        assert!(r.html_snippet().contains("[downlink:https://www.dropbox.com/s/x/brick.png?dl=1]"));
        assert!(r.html_snippet().contains("copy"));
    }
}
