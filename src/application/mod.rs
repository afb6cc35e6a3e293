//! Application layer - the segment pipeline, generic over its ports.

pub mod pipeline;
pub mod quality_gate;
pub mod splitter;

pub use pipeline::{PipelineService, PipelineSettings};

#[cfg(all(test, unix))]
pub(crate) mod test_support;
