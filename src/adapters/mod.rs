//! Adapters - Concrete implementations of ports, plus the inbound HTTP layer.

pub mod events;
pub mod ffmpeg;
pub mod http;
pub mod ingest;

pub use events::{EventHub, LogReporter};
pub use ffmpeg::{FfmpegCli, FfprobeCli};
pub use ingest::HttpIngestAdapter;
