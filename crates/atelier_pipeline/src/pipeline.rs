//! Batch and per-item processing.

use crate::ItemStage;
use atelier_core::{ProcessingResult, SessionContext, StatusSink, UploadBatch, UploadItem};
use atelier_error::{AtelierResult, PipelineError, PipelineErrorKind};
use atelier_media as media;
use atelier_models::{BackgroundRemover, Summarizer};
use atelier_storage::{
    ObjectStore, get_or_create_shared_link, resolve_unique_path, upload_chunked,
    urls::{self, DL_PARAM, RAW_PARAM},
};
use tracing::{info, instrument, warn};

/// Default destination folder in the store.
pub const DEFAULT_FOLDER: &str = "/ae_assets";

/// Records status lines into both the session log and the injected sink.
struct StatusRecorder<'a> {
    ctx: &'a mut SessionContext,
    sink: &'a mut dyn StatusSink,
    file_name: &'a str,
}

impl StatusRecorder<'_> {
    fn record(&mut self, message: &str) {
        self.ctx.push_status(self.file_name, message);
        self.sink.append(self.file_name, message);
    }
}

/// Orchestrates the per-image pipeline against injected collaborators.
///
/// Processing is single-pass and sequential: images run one at a time in
/// submission order, and each remote call blocks the batch. The only shared
/// state between items is the caller-owned [`SessionContext`].
pub struct AssetPipeline<'a> {
    store: &'a dyn ObjectStore,
    summarizer: &'a dyn Summarizer,
    remover: Option<&'a dyn BackgroundRemover>,
    folder: String,
}

impl<'a> AssetPipeline<'a> {
    /// Create a pipeline over the given collaborators.
    ///
    /// Without a background remover the alpha-thumbnail stage is skipped
    /// entirely.
    pub fn new(
        store: &'a dyn ObjectStore,
        summarizer: &'a dyn Summarizer,
        remover: Option<&'a dyn BackgroundRemover>,
    ) -> Self {
        Self {
            store,
            summarizer,
            remover,
            folder: DEFAULT_FOLDER.to_string(),
        }
    }

    /// Override the destination folder.
    pub fn with_folder(mut self, folder: impl Into<String>) -> Self {
        self.folder = folder.into();
        self
    }

    /// Process every image of a batch, one at a time, in submission order.
    ///
    /// Items already marked processed in the session context are skipped.
    /// A fatal item error is caught here, appended to that item's status log
    /// as a failure line, and the loop continues with the next item; failed
    /// items are excluded from the returned results.
    #[instrument(skip_all, fields(images = batch.images().len()))]
    pub async fn process_batch(
        &self,
        batch: &UploadBatch,
        ctx: &mut SessionContext,
        sink: &mut dyn StatusSink,
    ) -> Vec<ProcessingResult> {
        let mut results = Vec::new();
        for image in batch.images() {
            if ctx.is_processed(&image.name) {
                info!(file = %image.name, "Already processed this session, skipping");
                continue;
            }
            let mut recorder = StatusRecorder {
                ctx: &mut *ctx,
                sink: &mut *sink,
                file_name: &image.name,
            };
            match self.process_item(image, batch, &mut recorder).await {
                Ok(result) => {
                    ctx.mark_processed(&image.name);
                    results.push(result);
                }
                Err(e) => {
                    warn!(file = %image.name, error = %e, "Item failed");
                    let mut recorder = StatusRecorder {
                        ctx: &mut *ctx,
                        sink: &mut *sink,
                        file_name: &image.name,
                    };
                    recorder.record(&format!("upload failed - {e}"));
                }
            }
        }
        results
    }

    /// Run one image through the stage progression.
    async fn process_item(
        &self,
        item: &UploadItem,
        batch: &UploadBatch,
        recorder: &mut StatusRecorder<'_>,
    ) -> AtelierResult<ProcessingResult> {
        let stem = item.stem().to_string();
        let mut stage = ItemStage::Received;

        // Decode before any remote call so malformed bytes fail cheaply.
        let (image, info) = media::probe_image(&item.bytes)?;
        recorder.record(&format!(
            "ready to upload (image: {}px x {}px, {})",
            info.width, info.height, info.format
        ));

        recorder.record("uploading original...");
        let original_url = self
            .publish(&item.bytes, &format!("{}/{}", self.folder, stem), item.ext())
            .await?;
        let display_url = urls::with_param(&original_url, RAW_PARAM);
        let download_url = urls::with_param(&original_url, DL_PARAM);
        stage = self.advance(stage, ItemStage::OriginalUploaded);

        recorder.record("generating and uploading thumbnails...");
        let thumb = media::bounded_thumbnail(&image);
        let jpeg_bytes = media::encode_jpeg(&thumb)?;
        let jpeg_url = self
            .publish(&jpeg_bytes, &format!("{}/{}_thumb", self.folder, stem), "jpg")
            .await?;
        let thumb_jpeg_url = urls::with_param(&jpeg_url, RAW_PARAM);

        let webp_bytes = media::encode_webp(&thumb)?;
        let webp_url = self
            .publish(&webp_bytes, &format!("{}/{}_thumb", self.folder, stem), "webp")
            .await?;
        let thumb_webp_url = urls::with_param(&webp_url, RAW_PARAM);
        stage = self.advance(stage, ItemStage::ThumbnailReady);

        let alpha_thumb_url = match self.remover {
            Some(remover) => {
                recorder.record("generating and uploading alpha-keyed WebP thumbnail...");
                match self.publish_alpha_thumbnail(remover, item, &stem).await {
                    Ok(url) => {
                        stage = self.advance(stage, ItemStage::AlphaThumbnailReady);
                        Some(url)
                    }
                    Err(e) => {
                        // Degrade rather than fail: the plain thumbnails are
                        // already up, so the item continues without alpha.
                        warn!(file = %item.name, error = %e, "Alpha thumbnail failed");
                        recorder.record(&format!("alpha thumbnail failed - {e}, continuing"));
                        None
                    }
                }
            }
            None => None,
        };

        recorder.record("requesting summary...");
        let summary = match self.summarizer.summarize(&thumb_jpeg_url).await {
            Ok(text) => text,
            Err(e) => {
                warn!(file = %item.name, error = %e, "Summarization failed");
                format!("[summary failed: {e}]")
            }
        };
        stage = self.advance(stage, ItemStage::SummaryReady);

        let asset_url = match batch.companion(&stem) {
            Some(companion) => {
                recorder.record("uploading companion asset...");
                let url = self
                    .publish(
                        &companion.bytes,
                        &format!("{}/{}", self.folder, stem),
                        companion.ext(),
                    )
                    .await
                    .map_err(|e| {
                        PipelineError::new(PipelineErrorKind::CompanionUpload {
                            stem: stem.clone(),
                            reason: e.to_string(),
                        })
                    })?;
                stage = self.advance(stage, ItemStage::CompanionAssetReady);
                Some(urls::with_param(&url, DL_PARAM))
            }
            None => None,
        };

        self.advance(stage, ItemStage::Done);
        recorder.record("done");

        Ok(ProcessingResult {
            stem,
            file_name: item.name.clone(),
            width: info.width,
            height: info.height,
            format: info.format,
            display_url,
            download_url,
            thumb_jpeg_url,
            thumb_webp_url,
            alpha_thumb_url,
            summary,
            asset_url,
        })
    }

    /// Resolve a unique path, upload the payload there, and return the
    /// shared link.
    async fn publish(&self, bytes: &[u8], base: &str, ext: &str) -> AtelierResult<String> {
        let path = resolve_unique_path(self.store, base, ext).await?;
        upload_chunked(self.store, bytes, &path).await?;
        get_or_create_shared_link(self.store, &path).await
    }

    /// Remove the background from the original bytes and publish the
    /// lossless alpha thumbnail.
    async fn publish_alpha_thumbnail(
        &self,
        remover: &dyn BackgroundRemover,
        item: &UploadItem,
        stem: &str,
    ) -> AtelierResult<String> {
        let cutout = remover.remove_background(&item.bytes).await?;
        let alpha_bytes = media::alpha_thumbnail(&cutout)?;
        let url = self
            .publish(
                &alpha_bytes,
                &format!("{}/{}_thumb_alpha", self.folder, stem),
                "webp",
            )
            .await?;
        Ok(urls::with_param(&url, RAW_PARAM))
    }

    /// Record a stage transition. Stages only move forward.
    fn advance(&self, from: ItemStage, to: ItemStage) -> ItemStage {
        debug_assert!(from < to, "stage must advance, not backtrack");
        tracing::debug!(from = %from, to = %to, "Stage transition");
        to
    }
}
