//! Outbound HTTP adapter for the remote ingestion endpoint.

use crate::domain::UploadMetadata;
use crate::ports::IngestPort;
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, StatusCode};
use std::path::Path;
use tokio_util::io::ReaderStream;
use tracing::{info, warn};

#[derive(Clone)]
pub struct HttpIngestAdapter {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpIngestAdapter {
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint, api_key)
    }

    pub fn with_client(
        client: Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }

    async fn build_form(
        segment: &Path,
        metadata: &UploadMetadata,
    ) -> Result<Form, Box<dyn std::error::Error + Send + Sync>> {
        let file = tokio::fs::File::open(segment).await?;
        let length = file.metadata().await?.len();
        let body = Body::wrap_stream(ReaderStream::new(file));
        let file_name = segment
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("segment.mp4"));

        let file = Part::stream_with_length(body, length)
            .file_name(file_name)
            .mime_str("video/mp4")?;
        let metadata = serde_json::to_string(metadata)?;

        Ok(Form::new().part("file", file).text("metadata", metadata))
    }
}

#[async_trait]
impl IngestPort for HttpIngestAdapter {
    async fn upload(&self, segment: &Path, metadata: &UploadMetadata) -> bool {
        let form = match Self::build_form(segment, metadata).await {
            Ok(form) => form,
            Err(e) => {
                warn!(segment = %segment.display(), error = %e, "Could not prepare upload");
                return false;
            }
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await;

        match response {
            Ok(resp) if resp.status() == StatusCode::OK => {
                info!(segment = %segment.display(), "Segment accepted by ingestion endpoint");
                true
            }
            Ok(resp) => {
                warn!(
                    segment = %segment.display(),
                    status = %resp.status(),
                    "Segment rejected by ingestion endpoint"
                );
                false
            }
            Err(e) => {
                warn!(segment = %segment.display(), error = %e, "Upload transport failure");
                false
            }
        }
    }
}
