//! Quality gate: probes a segment and classifies it against fixed thresholds.

use crate::domain::{FailureReason, StreamProbe, Verdict};
use crate::ports::Prober;
use std::path::Path;
use tracing::{debug, warn};

/// Inspects `segment` without touching it. Any probe failure, including
/// unparsable output, yields `Fail(ProbeFailed)`.
pub async fn evaluate(segment: &Path, prober: &impl Prober) -> Verdict {
    let output = match prober.probe_video_stream(segment).await {
        Ok(output) => output,
        Err(e) => {
            warn!(segment = %segment.display(), error = %e, "Probe could not be started");
            return Verdict::Fail(FailureReason::ProbeFailed);
        }
    };

    if !output.status.success() {
        warn!(
            segment = %segment.display(),
            status = %output.status,
            stderr = %String::from_utf8_lossy(&output.stderr),
            "Probe failed"
        );
        return Verdict::Fail(FailureReason::ProbeFailed);
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    match StreamProbe::parse(&stdout) {
        Some(probe) => {
            let verdict = probe.classify();
            debug!(segment = %segment.display(), ?probe, ?verdict, "Segment probed");
            verdict
        }
        None => {
            warn!(segment = %segment.display(), output = %stdout.trim(), "Unparsable probe output");
            Verdict::Fail(FailureReason::ProbeFailed)
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::application::test_support::process_output;
    use crate::ports::prober::MockProber;
    use std::io;

    fn prober_printing(stdout: &'static str, exit_code: i32) -> MockProber {
        let mut prober = MockProber::new();
        prober
            .expect_probe_video_stream()
            .returning(move |_| Ok(process_output(stdout, "", exit_code)));
        prober
    }

    #[tokio::test]
    async fn test_hd_segment_passes() {
        let prober = prober_printing("1280,720,30.000000\n", 0);
        assert_eq!(evaluate(Path::new("part_000.mp4"), &prober).await, Verdict::Pass);
    }

    #[tokio::test]
    async fn test_small_short_segment_is_low_quality() {
        let prober = prober_printing("320,240,5.000000\n", 0);
        assert_eq!(
            evaluate(Path::new("part_000.mp4"), &prober).await,
            Verdict::Fail(FailureReason::LowQuality)
        );
    }

    #[tokio::test]
    async fn test_short_hd_tail_segment_is_low_quality() {
        let prober = prober_printing("1920,1080,4.2\n", 0);
        assert_eq!(
            evaluate(Path::new("part_009.mp4"), &prober).await,
            Verdict::Fail(FailureReason::LowQuality)
        );
    }

    #[tokio::test]
    async fn test_non_zero_exit_is_probe_failed() {
        let prober = prober_printing("", 1);
        assert_eq!(
            evaluate(Path::new("part_000.mp4"), &prober).await,
            Verdict::Fail(FailureReason::ProbeFailed)
        );
    }

    #[tokio::test]
    async fn test_malformed_output_is_probe_failed() {
        let prober = prober_printing("1280,720,N/A\n", 0);
        assert_eq!(
            evaluate(Path::new("part_000.mp4"), &prober).await,
            Verdict::Fail(FailureReason::ProbeFailed)
        );
    }

    #[tokio::test]
    async fn test_spawn_error_is_probe_failed() {
        let mut prober = MockProber::new();
        prober
            .expect_probe_video_stream()
            .times(1)
            .returning(|_| Err(io::Error::new(io::ErrorKind::NotFound, "ffprobe not found")));
        assert_eq!(
            evaluate(Path::new("part_000.mp4"), &prober).await,
            Verdict::Fail(FailureReason::ProbeFailed)
        );
    }

    #[tokio::test]
    async fn test_same_segment_same_verdict() {
        let mut prober = MockProber::new();
        prober
            .expect_probe_video_stream()
            .withf(|path| path == Path::new("parts/part_004.mp4"))
            .times(2)
            .returning(|_| Ok(process_output("800,600,12.5\n", "", 0)));

        let segment = Path::new("parts/part_004.mp4");
        let first = evaluate(segment, &prober).await;
        let second = evaluate(segment, &prober).await;
        assert_eq!(first, second);
        assert!(first.is_pass());
    }
}
