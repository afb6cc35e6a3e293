//! Pipeline orchestrator: validate → split → quality gate → upload → cleanup.

use super::quality_gate::evaluate;
use super::splitter::split;
use crate::config::AppConfig;
use crate::domain::{
    CleanupError, FailedSegment, PipelineError, PipelineResult, ProgressEvent, RunResult,
    RunState, UploadMetadata, Verdict,
};
use crate::ports::{Encoder, IngestPort, Prober, ProgressReporter};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

/// Smallest source video accepted, in bytes.
pub const MIN_SOURCE_BYTES: u64 = 1024;

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Root holding uploaded videos and the per-run `parts/` directories
    pub upload_root: PathBuf,
    pub segment_seconds: u32,
    /// Wait before deleting the source, so a writer still holding it can let go
    pub cleanup_grace: Duration,
    pub metadata: UploadMetadata,
}

impl PipelineSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            upload_root: config.upload_dir.clone(),
            segment_seconds: config.segment_seconds,
            cleanup_grace: Duration::from_millis(config.cleanup_grace_ms),
            metadata: UploadMetadata {
                user_id: config.upload_user_id.clone(),
            },
        }
    }
}

/// Mutable state of one in-flight run.
struct Run {
    state: RunState,
    result: RunResult,
}

impl Run {
    fn enter(&mut self, next: RunState) {
        debug!(from = %self.state, to = %next, "Run state transition");
        self.state = next;
    }
}

pub struct PipelineService<E, P, U> {
    encoder: E,
    prober: P,
    ingest: U,
    settings: PipelineSettings,
}

impl<E, P, U> PipelineService<E, P, U>
where
    E: Encoder,
    P: Prober,
    U: IngestPort,
{
    pub fn new(encoder: E, prober: P, ingest: U, settings: PipelineSettings) -> Self {
        Self {
            encoder,
            prober,
            ingest,
            settings,
        }
    }

    /// Working directory owned by run `run_id`.
    pub fn work_dir(&self, run_id: &str) -> PathBuf {
        self.settings.upload_root.join("parts").join(run_id)
    }

    /// Processes `source` end to end. The source and every segment are gone
    /// when this returns, whatever the outcome.
    pub async fn run(
        &self,
        source: &Path,
        reporter: &dyn ProgressReporter,
    ) -> PipelineResult<RunResult> {
        let run_id = Uuid::new_v4().to_string();
        let span = info_span!("run", run_id = %run_id);

        async {
            let work_dir = self.work_dir(&run_id);
            info!(source = %source.display(), "Starting video processing");

            let mut run = Run {
                state: RunState::Idle,
                result: RunResult::new(run_id.clone()),
            };
            let outcome = self.execute(source, &work_dir, reporter, &mut run).await;

            run.enter(RunState::Cleanup);
            self.cleanup(source, &work_dir).await;
            log_summary(&run.result);

            match outcome {
                Ok(()) => {
                    run.enter(RunState::Done);
                    info!("Video processed successfully");
                    Ok(run.result)
                }
                Err(e) => {
                    run.enter(RunState::Failed);
                    error!(error = %e, "Video processing failed");
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    async fn execute(
        &self,
        source: &Path,
        work_dir: &Path,
        reporter: &dyn ProgressReporter,
        run: &mut Run,
    ) -> PipelineResult<()> {
        run.enter(RunState::Validating);
        let size = validate_source(source).await?;
        info!(source = %source.display(), size, "Source video accepted");

        run.enter(RunState::Splitting);
        let parts = split(source, work_dir, self.settings.segment_seconds, &self.encoder).await?;
        run.result.total_parts = parts.len();
        reporter.report(ProgressEvent::splitting(parts.len()));

        run.enter(RunState::QualityChecking);
        let mut valid_parts = Vec::with_capacity(parts.len());
        for part in parts {
            let verdict = evaluate(&part, &self.prober).await;
            info!(part = %part.display(), ?verdict, "Quality checked");
            match verdict {
                Verdict::Pass => valid_parts.push(part),
                Verdict::Fail(reason) => {
                    if let Err(e) = remove_segment(&part).await {
                        warn!(error = %e, "Rejected segment left for final sweep");
                    }
                    run.result.failed_parts.push(FailedSegment { part, reason });
                }
            }
            reporter.report(ProgressEvent::checking(valid_parts.len()));
        }

        run.enter(RunState::Uploading);
        for part in valid_parts {
            if self.ingest.upload(&part, &self.settings.metadata).await {
                run.result.sent_parts += 1;
                if let Err(e) = remove_segment(&part).await {
                    warn!(error = %e, "Uploaded segment left for final sweep");
                }
                reporter.report(ProgressEvent::stats(
                    run.result.sent_parts,
                    run.result.failed_parts.len(),
                ));
                info!(part = %part.display(), "Segment uploaded");
            } else {
                // Stays on disk until the cleanup sweep
                run.result.upload_rejected.push(part);
            }
        }

        Ok(())
    }

    async fn cleanup(&self, source: &Path, work_dir: &Path) {
        if let Err(e) = remove_source(source, self.settings.cleanup_grace).await {
            error!(error = %e, "Could not delete source video");
        }
        if let Err(e) = sweep_work_dir(work_dir).await {
            error!(error = %e, "Could not remove working directory");
        }
    }
}

/// Returns the source size once it is known to be a plausible video upload.
async fn validate_source(source: &Path) -> PipelineResult<u64> {
    let meta = tokio::fs::metadata(source)
        .await
        .map_err(|e| PipelineError::InvalidInput {
            path: source.to_path_buf(),
            reason: e.to_string(),
        })?;

    if meta.len() < MIN_SOURCE_BYTES {
        error!(source = %source.display(), size = meta.len(), "Source video too small");
        return Err(PipelineError::InvalidInput {
            path: source.to_path_buf(),
            reason: format!(
                "size {} bytes is below the {} byte minimum",
                meta.len(),
                MIN_SOURCE_BYTES
            ),
        });
    }
    Ok(meta.len())
}

async fn remove_segment(part: &Path) -> Result<(), CleanupError> {
    tokio::fs::remove_file(part)
        .await
        .map_err(|source| CleanupError {
            path: part.to_path_buf(),
            source,
        })
}

async fn remove_source(source: &Path, grace: Duration) -> Result<(), CleanupError> {
    let exists = tokio::fs::try_exists(source)
        .await
        .map_err(|e| CleanupError {
            path: source.to_path_buf(),
            source: e,
        })?;
    if !exists {
        return Ok(());
    }

    tokio::time::sleep(grace).await;
    match tokio::fs::remove_file(source).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(CleanupError {
            path: source.to_path_buf(),
            source: e,
        }),
    }
}

/// Deletes whatever is left in `dir`, then `dir` itself. Entries that cannot be
/// removed are logged and skipped.
async fn sweep_work_dir(dir: &Path) -> Result<(), CleanupError> {
    let to_cleanup_error = |e: io::Error| CleanupError {
        path: dir.to_path_buf(),
        source: e,
    };

    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(to_cleanup_error(e)),
    };

    while let Some(entry) = entries.next_entry().await.map_err(to_cleanup_error)? {
        let path = entry.path();
        let removed = match entry.file_type().await {
            Ok(kind) if kind.is_dir() => tokio::fs::remove_dir_all(&path).await,
            _ => tokio::fs::remove_file(&path).await,
        };
        match removed {
            Ok(()) => debug!(path = %path.display(), "Removed leftover segment"),
            Err(e) => error!(path = %path.display(), error = %e, "Could not remove leftover"),
        }
    }

    tokio::fs::remove_dir(dir).await.map_err(to_cleanup_error)
}

fn log_summary(result: &RunResult) {
    let rejected = result.rejected();
    info!(
        sent = result.sent_parts,
        rejected = rejected.len(),
        "Processing finished"
    );
    for failed in rejected {
        info!(part = %failed.part.display(), reason = ?failed.reason, "Rejected segment");
    }
}
