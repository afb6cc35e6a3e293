//! Segflow - Video Segment Pipeline
//!
//! Splits an uploaded video into fixed-length segments, drops the ones below
//! the quality bar and ships the rest to a remote ingestion API.
//!
//! Hexagonal Architecture:
//! - domain/: Pure rules (segment naming, probe parsing, progress, run results)
//! - ports/: Trait definitions (encoder, prober, ingestion, progress)
//! - adapters/: Concrete implementations (ffmpeg CLI, HTTP ingest, SSE, events)
//! - application/: Splitter, quality gate and the pipeline orchestrator
//! - config: Environment configuration

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports for convenience
pub use application::{PipelineService, PipelineSettings};
pub use config::AppConfig;
pub use domain::{PipelineError, ProgressEvent, RunResult};
