//! Inbound HTTP adapter: video upload endpoint and live progress stream.

pub mod routes;
pub mod upload;

pub use routes::{router, AppState};
