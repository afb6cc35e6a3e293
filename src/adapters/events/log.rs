use crate::domain::ProgressEvent;
use crate::ports::ProgressReporter;
use tracing::info;

/// Writes progress to the log. Used when nobody subscribes to live updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl ProgressReporter for LogReporter {
    fn report(&self, event: ProgressEvent) {
        match serde_json::to_string(&event) {
            Ok(json) => info!(channel = event.event_name(), "{}", json),
            Err(_) => info!(channel = event.event_name(), ?event),
        }
    }
}
