use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::Output;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Encoder: Send + Sync {
    /// Cut `input` into video-only segments of `segment_seconds`, written
    /// following the numbered `template`.
    ///
    /// An `io::ErrorKind::NotFound` error means the encoder binary could not be located.
    async fn segment(&self, input: &Path, template: &Path, segment_seconds: u32)
        -> io::Result<Output>;
}
