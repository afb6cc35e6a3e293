use super::quality::FailureReason;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Orchestrator states over one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Validating,
    Splitting,
    QualityChecking,
    Uploading,
    Cleanup,
    Done,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Idle => "idle",
            RunState::Validating => "validating",
            RunState::Splitting => "splitting",
            RunState::QualityChecking => "quality_checking",
            RunState::Uploading => "uploading",
            RunState::Cleanup => "cleanup",
            RunState::Done => "done",
            RunState::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedSegment {
    pub part: PathBuf,
    pub reason: FailureReason,
}

/// Outcome of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResult {
    pub run_id: String,
    pub total_parts: usize,
    pub sent_parts: usize,
    /// Quality-rejected segments, in processing order
    pub failed_parts: Vec<FailedSegment>,
    /// Segments refused by the ingestion endpoint; swept at cleanup
    pub upload_rejected: Vec<PathBuf>,
}

impl RunResult {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            ..Default::default()
        }
    }

    /// Every segment that did not reach the endpoint, with its reason.
    pub fn rejected(&self) -> Vec<FailedSegment> {
        self.failed_parts
            .iter()
            .cloned()
            .chain(self.upload_rejected.iter().map(|part| FailedSegment {
                part: part.clone(),
                reason: FailureReason::UploadRejected,
            }))
            .collect()
    }

    /// True when every produced segment is accounted for exactly once.
    pub fn is_balanced(&self) -> bool {
        self.sent_parts + self.failed_parts.len() + self.upload_rejected.len() == self.total_parts
    }
}
