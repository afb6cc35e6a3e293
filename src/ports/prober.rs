use async_trait::async_trait;
use std::io;
use std::path::Path;
use std::process::Output;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Prober: Send + Sync {
    /// Print `width,height,duration` of the first video stream on stdout
    async fn probe_video_stream(&self, segment: &Path) -> io::Result<Output>;
}
