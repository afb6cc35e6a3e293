use super::upload::{stream_to_file, upload_path};
use crate::adapters::events::EventHub;
use crate::application::PipelineService;
use crate::domain::{PipelineError, RunResult};
use crate::ports::{Encoder, IngestPort, Prober};
use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::Stream;
use serde_json::{json, Value};
use std::convert::Infallible;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tracing::{error, info, warn};

/// Name of the multipart field carrying the video.
pub const VIDEO_FIELD: &str = "video";

type ApiError = (StatusCode, Json<Value>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (status, Json(json!({ "error": message.into() })))
}

pub struct AppState<E, P, U> {
    pub pipeline: Arc<PipelineService<E, P, U>>,
    pub hub: EventHub,
    pub upload_dir: PathBuf,
}

impl<E, P, U> AppState<E, P, U> {
    pub fn new(pipeline: Arc<PipelineService<E, P, U>>, hub: EventHub, upload_dir: PathBuf) -> Self {
        Self {
            pipeline,
            hub,
            upload_dir,
        }
    }
}

impl<E, P, U> Clone for AppState<E, P, U> {
    fn clone(&self) -> Self {
        Self {
            pipeline: self.pipeline.clone(),
            hub: self.hub.clone(),
            upload_dir: self.upload_dir.clone(),
        }
    }
}

pub fn router<E, P, U>(state: AppState<E, P, U>) -> Router
where
    E: Encoder + 'static,
    P: Prober + 'static,
    U: IngestPort + 'static,
{
    Router::new()
        .route("/upload", post(upload_video::<E, P, U>))
        .route("/events", get(progress_events::<E, P, U>))
        .layer(DefaultBodyLimit::disable())
        .with_state(state)
}

// Saves the `video` field under the upload dir and runs the pipeline on it.
async fn upload_video<E, P, U>(
    State(state): State<AppState<E, P, U>>,
    mut multipart: Multipart,
) -> Result<Json<RunResult>, ApiError>
where
    E: Encoder + 'static,
    P: Prober + 'static,
    U: IngestPort + 'static,
{
    let mut source = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?
    {
        if field.name() != Some(VIDEO_FIELD) {
            continue;
        }

        let file_name = field.file_name().unwrap_or_default().to_owned();
        if file_name.is_empty() {
            error!("Uploaded video has an empty file name");
            return Err(api_error(StatusCode::BAD_REQUEST, "Empty filename"));
        }

        let path = upload_path(&state.upload_dir, &file_name)
            .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Invalid path"))?;
        tokio::fs::create_dir_all(&state.upload_dir)
            .await
            .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

        info!(path = %path.display(), "Saving uploaded video");
        if let Err((status, message)) = stream_to_file(&path, field).await {
            if let Err(e) = tokio::fs::remove_file(&path).await {
                warn!(path = %path.display(), error = %e, "Partial upload left on disk");
            }
            return Err(api_error(status, message));
        }
        source = Some(path);
        break;
    }

    let source = source.ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "Missing video field"))?;

    // Detached from the request so a dropped connection cannot skip cleanup
    let pipeline = state.pipeline.clone();
    let hub = state.hub.clone();
    let run = tokio::spawn(async move { pipeline.run(&source, &hub).await });

    match run.await {
        Ok(Ok(result)) => Ok(Json(result)),
        Ok(Err(e @ PipelineError::InvalidInput { .. })) => {
            Err(api_error(StatusCode::BAD_REQUEST, e.to_string()))
        }
        Ok(Err(e)) => Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())),
        Err(e) => {
            error!(error = %e, "Pipeline task aborted");
            Err(api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

// Live progress as server-sent events, one SSE event per progress message.
async fn progress_events<E, P, U>(
    State(state): State<AppState<E, P, U>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>>
where
    E: Encoder + 'static,
    P: Prober + 'static,
    U: IngestPort + 'static,
{
    let rx = state.hub.subscribe();
    info!("Progress subscriber connected");

    let stream = futures::stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(progress) => {
                    match Event::default()
                        .event(progress.event_name())
                        .json_data(&progress)
                    {
                        Ok(event) => return Some((Ok::<_, Infallible>(event), rx)),
                        Err(e) => warn!(error = %e, "Could not encode progress event"),
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Progress subscriber lagging, events skipped");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}
