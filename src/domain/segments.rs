use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Prefix of every segment file written by the encoder.
pub const SEGMENT_PREFIX: &str = "part_";
pub const SEGMENT_EXTENSION: &str = "mp4";

/// Encoder output pattern, three digit zero-padded index.
pub fn output_template(output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{}%03d.{}", SEGMENT_PREFIX, SEGMENT_EXTENSION))
}

fn index_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)$").unwrap())
}

/// Extracts the numeric index embedded at the end of a segment's file stem.
pub fn segment_index(path: &Path) -> Option<u64> {
    let stem = path.file_stem()?.to_str()?;
    let caps = index_regex().captures(stem)?;
    caps.get(1)?.as_str().parse().ok()
}

/// Orders segments by embedded index. Unindexed files go last, by name.
pub fn sort_by_index(segments: &mut [PathBuf]) {
    segments.sort_by(|a, b| match (segment_index(a), segment_index(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.file_name().cmp(&b.file_name()),
    });
}

/// Metadata sent along with every uploaded segment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadMetadata {
    pub user_id: String,
}

impl Default for UploadMetadata {
    fn default() -> Self {
        Self {
            user_id: String::from("example_user"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_template() {
        let template = output_template(Path::new("/tmp/parts"));
        assert_eq!(template, PathBuf::from("/tmp/parts/part_%03d.mp4"));
    }

    #[test]
    fn test_segment_index() {
        assert_eq!(segment_index(Path::new("parts/part_007.mp4")), Some(7));
        assert_eq!(segment_index(Path::new("part_1000.mp4")), Some(1000));
        assert_eq!(segment_index(Path::new("parts/notes.txt")), None);
        assert_eq!(segment_index(Path::new("")), None);
    }

    #[test]
    fn test_sort_by_index_uses_numeric_order() {
        let mut segments = vec![
            PathBuf::from("d/part_010.mp4"),
            PathBuf::from("d/zzz.tmp"),
            PathBuf::from("d/part_002.mp4"),
            PathBuf::from("d/part_1000.mp4"),
            PathBuf::from("d/aaa.tmp"),
            PathBuf::from("d/part_000.mp4"),
        ];
        sort_by_index(&mut segments);
        assert_eq!(
            segments,
            vec![
                PathBuf::from("d/part_000.mp4"),
                PathBuf::from("d/part_002.mp4"),
                PathBuf::from("d/part_010.mp4"),
                PathBuf::from("d/part_1000.mp4"),
                PathBuf::from("d/aaa.tmp"),
                PathBuf::from("d/zzz.tmp"),
            ]
        );
    }

    #[test]
    fn test_default_metadata() {
        let json = serde_json::to_string(&UploadMetadata::default()).unwrap();
        assert_eq!(json, r#"{"user_id":"example_user"}"#);
    }
}
