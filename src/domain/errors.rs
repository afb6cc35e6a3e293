use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a pipeline run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Source video missing or too small to be a real upload
    #[error("Invalid input {path:?}: {reason}")]
    InvalidInput { path: PathBuf, reason: String },

    #[error("Encoder not found: {message}")]
    EncoderNotFound { message: String },

    /// Encoder ran but exited unsuccessfully
    #[error("Encoder failed with exit code {exit_code:?}: {stderr}")]
    EncoderExecutionFailed {
        exit_code: Option<i32>,
        stderr: String,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure while removing run artifacts. Logged, never returned to callers.
#[derive(Error, Debug)]
#[error("Failed to remove {path:?}: {source}")]
pub struct CleanupError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
