//! Upload command handler.

use crate::config::AtelierConfig;
use atelier_core::{ProcessingResult, SessionContext, TracingStatusSink, UploadBatch, UploadItem};
use atelier_error::{AtelierResult, PipelineError, PipelineErrorKind};
use atelier_models::{BackgroundRemover, OpenAiSummarizer, RembgClient};
use atelier_pipeline::AssetPipeline;
use atelier_storage::DropboxStore;
use std::path::PathBuf;
use tracing::{info, warn};

/// Read the named files, run the upload pipeline, and present the results.
pub async fn handle_upload_command(
    files: Vec<PathBuf>,
    folder: Option<String>,
    no_tui: bool,
) -> AtelierResult<()> {
    let config = AtelierConfig::from_env()?;

    let items = read_items(&files).await?;
    let batch = UploadBatch::new(items);
    if batch.is_empty() {
        warn!("No images among the submitted files, nothing to do");
        return Ok(());
    }

    let store = DropboxStore::new(
        &config.dropbox_app_key,
        &config.dropbox_app_secret,
        &config.dropbox_refresh_token,
    );
    let summarizer = OpenAiSummarizer::new(&config.openai_api_key);
    let rembg = config.rembg_url.as_deref().map(RembgClient::new);
    if rembg.is_none() {
        info!("REMBG_URL not set, alpha thumbnails disabled");
    }

    let mut pipeline = AssetPipeline::new(
        &store,
        &summarizer,
        rembg.as_ref().map(|r| r as &dyn BackgroundRemover),
    );
    if let Some(folder) = folder.or(config.folder) {
        pipeline = pipeline.with_folder(folder);
    }

    let mut session = SessionContext::new();
    let mut sink = TracingStatusSink;
    let results = pipeline.process_batch(&batch, &mut session, &mut sink).await;

    if no_tui {
        print_results(&results);
    } else {
        atelier_tui::run_tui(results, session)?;
    }

    Ok(())
}

/// Read and classify the named files, skipping unsupported extensions.
async fn read_items(files: &[PathBuf]) -> AtelierResult<Vec<UploadItem>> {
    let mut items = Vec::new();
    for path in files {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            warn!(path = %path.display(), "Skipping file with unusable name");
            continue;
        };
        let bytes = tokio::fs::read(path).await.map_err(|e| {
            PipelineError::new(PipelineErrorKind::InputRead(
                path.display().to_string(),
                e.to_string(),
            ))
        })?;
        match UploadItem::classify(name, bytes) {
            Some(item) => items.push(item),
            None => warn!(file = %name, "Skipping unsupported file type"),
        }
    }
    Ok(items)
}

/// Plain-text rendering of the results for `--no-tui` runs.
fn print_results(results: &[ProcessingResult]) {
    for result in results {
        println!("=== {} ===", result.stem);
        println!(
            "{} ({}x{}, {})",
            result.file_name, result.width, result.height, result.format
        );
        println!("display:    {}", result.display_url);
        println!("download:   {}", result.download_url);
        println!("thumb jpg:  {}", result.thumb_jpeg_url);
        println!("thumb webp: {}", result.thumb_webp_url);
        if let Some(alpha) = &result.alpha_thumb_url {
            println!("thumb alpha: {alpha}");
        }
        if let Some(asset) = &result.asset_url {
            println!("asset:      {asset}");
        }
        println!();
        println!("{}", result.html_snippet());
        println!();
    }
}
