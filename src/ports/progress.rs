use crate::domain::ProgressEvent;

/// Push-style sink for run progress. Called synchronously from the pipeline,
/// so implementations must return quickly and swallow their own failures.
pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: ProgressEvent);
}

impl<F> ProgressReporter for F
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    fn report(&self, event: ProgressEvent) {
        self(event)
    }
}
