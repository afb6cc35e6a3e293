//! One-shot binary: runs the segment pipeline on a local video and prints the
//! run result as JSON.
//!
//! The source file is consumed: it is deleted once the run finishes.
//!
//! Usage: `process_file <video>`

use segflow::adapters::{FfmpegCli, FfprobeCli, HttpIngestAdapter, LogReporter};
use segflow::{AppConfig, PipelineService, PipelineSettings};
use std::error::Error;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::from_env();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let source = match std::env::args_os().nth(1) {
        Some(path) => PathBuf::from(path),
        None => {
            eprintln!("Usage: process_file <video>");
            std::process::exit(2);
        }
    };

    let pipeline = PipelineService::new(
        FfmpegCli::new(&config.ffmpeg_path, config.ffmpeg_fallback_path.clone()),
        FfprobeCli::new(&config.ffprobe_path),
        HttpIngestAdapter::new(&config.ingest_url, &config.ingest_api_key),
        PipelineSettings::from_config(&config),
    );

    let result = pipeline.run(&source, &LogReporter).await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
