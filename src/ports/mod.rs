//! Ports - Trait definitions for every external seam of the pipeline.

pub mod encoder;
pub mod ingest;
pub mod prober;
pub mod progress;

pub use encoder::Encoder;
pub use ingest::IngestPort;
pub use prober::Prober;
pub use progress::ProgressReporter;
