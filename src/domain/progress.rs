use serde::{Deserialize, Serialize};

/// Stage notifications emitted while a run advances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StageProgress {
    SplittingVideo {
        #[serde(rename = "totalParts")]
        total_parts: usize,
    },
    CheckingQuality {
        #[serde(rename = "checkedParts")]
        checked_parts: usize,
    },
}

/// Message pushed to the progress subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProgressEvent {
    Stage(StageProgress),
    /// Emitted after each successful upload
    Stats {
        #[serde(rename = "sentParts")]
        sent_parts: usize,
        #[serde(rename = "failedParts")]
        failed_parts: usize,
    },
}

impl ProgressEvent {
    pub fn splitting(total_parts: usize) -> Self {
        ProgressEvent::Stage(StageProgress::SplittingVideo { total_parts })
    }

    pub fn checking(checked_parts: usize) -> Self {
        ProgressEvent::Stage(StageProgress::CheckingQuality { checked_parts })
    }

    pub fn stats(sent_parts: usize, failed_parts: usize) -> Self {
        ProgressEvent::Stats {
            sent_parts,
            failed_parts,
        }
    }

    /// Channel name the event is published under.
    pub fn event_name(&self) -> &'static str {
        match self {
            ProgressEvent::Stage(_) => "update_progress",
            ProgressEvent::Stats { .. } => "update_stats",
        }
    }
}
