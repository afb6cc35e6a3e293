//! Environment configuration.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// HTTP server bind address
    pub addr: String,
    /// HTTP server port
    pub port: String,
    /// Root for uploaded videos and per-run segment directories
    pub upload_dir: PathBuf,
    /// Encoder binary, looked up in PATH
    pub ffmpeg_path: String,
    /// Absolute encoder path used when `ffmpeg_path` cannot be found
    pub ffmpeg_fallback_path: Option<PathBuf>,
    pub ffprobe_path: String,
    /// Remote ingestion endpoint receiving accepted segments
    pub ingest_url: String,
    /// Bearer token for the ingestion endpoint
    pub ingest_api_key: String,
    pub segment_seconds: u32,
    pub cleanup_grace_ms: u64,
    /// `user_id` sent as upload metadata
    pub upload_user_id: String,
}

impl AppConfig {
    /// Load configuration from `.env` and environment variables.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source. Missing or
    /// unparsable values fall back to defaults.
    pub fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Self {
        let string = |key: &str, default: &str| get(key).unwrap_or_else(|| String::from(default));

        Self {
            addr: string("ADDR", "127.0.0.1"),
            port: string("PORT", "3000"),
            upload_dir: PathBuf::from(string("UPLOAD_DIR", "./uploads")),
            ffmpeg_path: string("FFMPEG_PATH", "ffmpeg"),
            ffmpeg_fallback_path: get("FFMPEG_FALLBACK_PATH")
                .filter(|path| !path.is_empty())
                .map(PathBuf::from),
            ffprobe_path: string("FFPROBE_PATH", "ffprobe"),
            ingest_url: string("INGEST_URL", "https://api.openai.com/v1/videos"),
            ingest_api_key: string("INGEST_API_KEY", ""),
            segment_seconds: parsed(&get, "SEGMENT_SECONDS", 60),
            cleanup_grace_ms: parsed(&get, "CLEANUP_GRACE_MS", 1000),
            upload_user_id: string("UPLOAD_USER_ID", "example_user"),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.addr, self.port)
    }
}

fn parsed<T: FromStr>(get: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    get(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
