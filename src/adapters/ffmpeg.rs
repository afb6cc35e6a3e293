//! Subprocess adapters for the `ffmpeg` encoder and the `ffprobe` prober.

use crate::ports::{Encoder, Prober};
use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command as TokioCommand;
use tracing::{debug, info, warn};

/// Picks the encoder binary: `program` when it can be spawned, else `fallback` if configured.
pub async fn resolve_program(program: &str, fallback: Option<&Path>) -> io::Result<OsString> {
    match TokioCommand::new(program).arg("-version").output().await {
        Ok(_) => {
            debug!(program, "Encoder found");
            Ok(OsString::from(program))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => match fallback {
            Some(path) => {
                warn!(program, fallback = %path.display(), "Encoder not in PATH, using fallback");
                Ok(path.as_os_str().to_owned())
            }
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} not found in PATH and no fallback configured", program),
            )),
        },
        Err(e) => Err(e),
    }
}

pub struct FfmpegCli {
    program: String,
    fallback: Option<PathBuf>,
}

impl FfmpegCli {
    pub fn new(program: impl Into<String>, fallback: Option<PathBuf>) -> Self {
        Self {
            program: program.into(),
            fallback,
        }
    }
}

#[async_trait]
impl Encoder for FfmpegCli {
    async fn segment(
        &self,
        input: &Path,
        template: &Path,
        segment_seconds: u32,
    ) -> io::Result<Output> {
        let program = resolve_program(&self.program, self.fallback.as_deref()).await?;

        let mut command = TokioCommand::new(&program);
        command
            .arg("-y")
            .arg("-i")
            .arg(input)
            .arg("-c:v")
            .arg("libx264")
            // no audio in segments
            .arg("-an")
            .arg("-map")
            .arg("0:v")
            .arg("-segment_time")
            .arg(segment_seconds.to_string())
            .arg("-f")
            .arg("segment")
            .arg(template);

        info!(?command, "Running encoder");
        let output = command.output().await?;
        debug!(stderr = %String::from_utf8_lossy(&output.stderr), "Encoder finished");
        Ok(output)
    }
}

pub struct FfprobeCli {
    program: String,
}

impl FfprobeCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

#[async_trait]
impl Prober for FfprobeCli {
    async fn probe_video_stream(&self, segment: &Path) -> io::Result<Output> {
        TokioCommand::new(&self.program)
            .arg("-v")
            .arg("error")
            .arg("-select_streams")
            .arg("v:0")
            .arg("-show_entries")
            .arg("stream=width,height,duration")
            .arg("-of")
            .arg("csv=p=0")
            .arg(segment)
            .output()
            .await
    }
}
