use crate::domain::ProgressEvent;
use crate::ports::ProgressReporter;
use tokio::sync::broadcast;
use tracing::debug;

/// Fan-out channel feeding progress events to every live subscriber.
#[derive(Debug, Clone)]
pub struct EventHub {
    sender: broadcast::Sender<ProgressEvent>,
}

impl EventHub {
    pub fn new() -> Self {
        // Slow subscribers lag and skip events rather than block the pipeline
        let (sender, _) = broadcast::channel(100);
        Self { sender }
    }

    pub fn publish(
        &self,
        event: ProgressEvent,
    ) -> Result<usize, broadcast::error::SendError<ProgressEvent>> {
        self.sender.send(event)
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ProgressEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventHub {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for EventHub {
    fn report(&self, event: ProgressEvent) {
        if let Err(e) = self.publish(event) {
            debug!(event = ?e.0, "No progress subscribers, event dropped");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_report_reaches_every_subscriber() {
        let hub = EventHub::new();
        let mut first = hub.subscribe();
        let mut second = hub.subscribe();

        hub.report(ProgressEvent::splitting(3));
        hub.report(ProgressEvent::stats(1, 0));

        assert_eq!(first.recv().await.unwrap(), ProgressEvent::splitting(3));
        assert_eq!(first.recv().await.unwrap(), ProgressEvent::stats(1, 0));
        assert_eq!(second.recv().await.unwrap(), ProgressEvent::splitting(3));
    }

    #[test]
    fn test_report_without_subscribers_does_not_fail() {
        let hub = EventHub::new();
        hub.report(ProgressEvent::checking(1));
        assert!(hub.publish(ProgressEvent::checking(2)).is_err());
    }
}
