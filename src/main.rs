//! Server Binary - HTTP upload endpoint and live progress stream
//!
//! Wires up:
//! - ffmpeg / ffprobe subprocess adapters
//! - HTTP multipart ingestion client
//! - Upload route running the segment pipeline, SSE progress route

use segflow::adapters::http::{router, AppState};
use segflow::adapters::{EventHub, FfmpegCli, FfprobeCli, HttpIngestAdapter};
use segflow::{AppConfig, PipelineService, PipelineSettings};
use std::error::Error;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if config.ingest_api_key.is_empty() {
        warn!("INGEST_API_KEY is not set, uploads will likely be rejected");
    }

    // 1. Adapters
    let encoder = FfmpegCli::new(&config.ffmpeg_path, config.ffmpeg_fallback_path.clone());
    let prober = FfprobeCli::new(&config.ffprobe_path);
    let ingest = HttpIngestAdapter::new(&config.ingest_url, &config.ingest_api_key);

    // 2. Application service
    let pipeline = Arc::new(PipelineService::new(
        encoder,
        prober,
        ingest,
        PipelineSettings::from_config(&config),
    ));

    // 3. HTTP layer
    tokio::fs::create_dir_all(&config.upload_dir).await?;
    let state = AppState::new(pipeline, EventHub::new(), config.upload_dir.clone());
    let app = router(state);

    // 4. Start server
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!(
        address = %config.bind_address(),
        upload_dir = %config.upload_dir.display(),
        "Server listening"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
