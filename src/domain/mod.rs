//! Domain layer - Pure business logic.

pub mod errors;
pub mod progress;
pub mod quality;
pub mod run;
pub mod segments;

pub use errors::{CleanupError, PipelineError, PipelineResult};
pub use progress::{ProgressEvent, StageProgress};
pub use quality::{FailureReason, StreamProbe, Verdict};
pub use run::{FailedSegment, RunResult, RunState};
pub use segments::UploadMetadata;
