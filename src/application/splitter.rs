//! Segment splitter: one encoder invocation per source video.

use crate::domain::segments::{output_template, sort_by_index};
use crate::domain::{PipelineError, PipelineResult};
use crate::ports::Encoder;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Cuts `input` into fixed-duration video-only segments inside `output_dir`.
///
/// Returns every file in `output_dir` after the encoder exits, ordered by the
/// segment index embedded in the file name.
pub async fn split(
    input: &Path,
    output_dir: &Path,
    segment_seconds: u32,
    encoder: &impl Encoder,
) -> PipelineResult<Vec<PathBuf>> {
    match tokio::fs::metadata(input).await {
        Ok(meta) if meta.len() > 0 => {}
        Ok(_) => {
            return Err(PipelineError::InvalidInput {
                path: input.to_path_buf(),
                reason: String::from("file is empty"),
            })
        }
        Err(e) => {
            return Err(PipelineError::InvalidInput {
                path: input.to_path_buf(),
                reason: e.to_string(),
            })
        }
    }

    tokio::fs::create_dir_all(output_dir).await?;
    let template = output_template(output_dir);

    let output = encoder
        .segment(input, &template, segment_seconds)
        .await
        .map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => PipelineError::EncoderNotFound {
                message: e.to_string(),
            },
            _ => PipelineError::Io(e),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        error!(status = %output.status, %stderr, "Encoder failed to split video");
        return Err(PipelineError::EncoderExecutionFailed {
            exit_code: output.status.code(),
            stderr,
        });
    }

    let segments = list_segments(output_dir).await?;
    info!(
        input = %input.display(),
        count = segments.len(),
        "Video split into segments"
    );
    Ok(segments)
}

async fn list_segments(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let mut segments = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            segments.push(entry.path());
        }
    }
    sort_by_index(&mut segments);
    Ok(segments)
}
