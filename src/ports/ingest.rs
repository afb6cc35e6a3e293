use crate::domain::UploadMetadata;
use async_trait::async_trait;
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IngestPort: Send + Sync {
    /// Send one segment to the ingestion endpoint.
    /// Returns true only when the endpoint accepted it; failures never surface as errors.
    async fn upload(&self, segment: &Path, metadata: &UploadMetadata) -> bool;
}
