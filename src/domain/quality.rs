use serde::{Deserialize, Serialize};

pub const MIN_WIDTH: f64 = 640.0;
pub const MIN_HEIGHT: f64 = 480.0;
/// Seconds
pub const MIN_DURATION: f64 = 10.0;

/// Why a segment did not make it to the ingestion endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    LowQuality,
    ProbeFailed,
    UploadRejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Pass,
    Fail(FailureReason),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }
}

/// Technical properties of a segment's first video stream.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamProbe {
    pub width: f64,
    pub height: f64,
    pub duration: f64,
}

impl StreamProbe {
    /// Parses `width,height,duration` from the first non-empty line of probe output.
    pub fn parse(stdout: &str) -> Option<StreamProbe> {
        let line = stdout.lines().map(str::trim).find(|l| !l.is_empty())?;
        let values = line
            .split(',')
            .map(|field| {
                field
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
            })
            .collect::<Option<Vec<f64>>>()?;

        match values.as_slice() {
            &[width, height, duration] => Some(StreamProbe {
                width,
                height,
                duration,
            }),
            _ => None,
        }
    }

    pub fn classify(&self) -> Verdict {
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT || self.duration < MIN_DURATION {
            Verdict::Fail(FailureReason::LowQuality)
        } else {
            Verdict::Pass
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_line() {
        let probe = StreamProbe::parse("1280,720,30.000000\n").unwrap();
        assert_eq!(probe.width, 1280.0);
        assert_eq!(probe.height, 720.0);
        assert_eq!(probe.duration, 30.0);
    }

    #[test]
    fn test_parse_takes_first_non_empty_line() {
        let probe = StreamProbe::parse("\n  640,480,10.5  \n1,1,1\n").unwrap();
        assert_eq!(probe.width, 640.0);
        assert_eq!(probe.duration, 10.5);
    }

    #[test]
    fn test_parse_malformed_output() {
        assert!(StreamProbe::parse("").is_none());
        assert!(StreamProbe::parse("1280,720").is_none());
        assert!(StreamProbe::parse("1280,720,30,1").is_none());
        assert!(StreamProbe::parse("1280,720,N/A").is_none());
        assert!(StreamProbe::parse("width=1280").is_none());
    }

    #[test]
    fn test_parse_rejects_non_finite_values() {
        assert!(StreamProbe::parse("nan,720,30").is_none());
        assert!(StreamProbe::parse("1280,NaN,30").is_none());
        assert!(StreamProbe::parse("1280,720,inf").is_none());
        assert!(StreamProbe::parse("-inf,720,30").is_none());
    }

    #[test]
    fn test_classify_thresholds() {
        let probe = |width, height, duration| StreamProbe {
            width,
            height,
            duration,
        };
        assert_eq!(probe(1280.0, 720.0, 30.0).classify(), Verdict::Pass);
        assert_eq!(probe(640.0, 480.0, 10.0).classify(), Verdict::Pass);

        let low = Verdict::Fail(FailureReason::LowQuality);
        assert_eq!(probe(639.0, 720.0, 30.0).classify(), low);
        assert_eq!(probe(1280.0, 479.0, 30.0).classify(), low);
        assert_eq!(probe(1280.0, 720.0, 9.99).classify(), low);
        assert_eq!(probe(320.0, 240.0, 5.0).classify(), low);
    }

    #[test]
    fn test_failure_reason_serializes_snake_case() {
        let json = serde_json::to_string(&FailureReason::LowQuality).unwrap();
        assert_eq!(json, "\"low_quality\"");
        let json = serde_json::to_string(&FailureReason::ProbeFailed).unwrap();
        assert_eq!(json, "\"probe_failed\"");
    }
}
