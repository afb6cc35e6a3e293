use axum::body::Bytes;
use axum::http::StatusCode;
use axum::BoxError;
use futures::{Stream, TryStreamExt};
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::{fs::File, io::BufWriter};
use tokio_util::io::StreamReader;
use tracing::warn;
use uuid::Uuid;

// Save a `Stream` to a file
pub async fn stream_to_file<S, E>(path: &Path, stream: S) -> Result<(), (StatusCode, String)>
where
    S: Stream<Item = Result<Bytes, E>>,
    E: Into<BoxError>,
{
    async {
        let body_with_io_error = stream.map_err(|err| io::Error::new(io::ErrorKind::Other, err));
        let body_reader = StreamReader::new(body_with_io_error);
        futures::pin_mut!(body_reader);

        let mut file = BufWriter::new(File::create(path).await?);
        tokio::io::copy(&mut body_reader, &mut file).await?;
        tokio::io::AsyncWriteExt::flush(&mut file).await?;

        Ok::<_, io::Error>(())
    }
    .await
    .map_err(|err| (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()))
}

/// A client-supplied file name must be one plain component.
pub fn path_is_valid(path: &Path) -> bool {
    let mut components = path.components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => true,
        _ => {
            warn!(path = %path.display(), "Rejected upload file name");
            false
        }
    }
}

/// Unique destination for an uploaded video, keeping a sane extension from
/// the client's file name.
pub fn upload_path(upload_dir: &Path, client_name: &str) -> Option<PathBuf> {
    let client_name = Path::new(client_name);
    if !path_is_valid(client_name) {
        return None;
    }

    let extension = client_name
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| {
            !ext.is_empty() && ext.len() <= 8 && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .unwrap_or("mp4")
        .to_ascii_lowercase();

    Some(upload_dir.join(format!("{}.{}", Uuid::new_v4(), extension)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use futures::stream;
    use std::fs;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_stream_to_file() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("test_file.txt");

        type E = std::io::Error;

        let mock_stream = stream::iter(vec![
            Ok::<bytes::Bytes, E>(Bytes::from("Hello, ")),
            Ok(Bytes::from("world!")),
        ]);

        let result = stream_to_file(&file_path, mock_stream).await;
        assert!(result.is_ok());

        let file_contents = fs::read_to_string(file_path).unwrap();
        assert_eq!(file_contents, "Hello, world!");
    }

    #[tokio::test]
    async fn test_stream_to_file_error() {
        let temp_dir = tempdir().unwrap();
        let file_path = temp_dir.path().join("test_file.txt");

        let mock_stream = stream::iter(vec![Err::<Bytes, _>("Test error")]);

        let result = stream_to_file(&file_path, mock_stream).await;
        assert_eq!(
            result.unwrap_err(),
            (StatusCode::INTERNAL_SERVER_ERROR, "Test error".to_string())
        );
    }

    #[test]
    fn test_valid_path() {
        assert!(path_is_valid(Path::new("holiday.mp4")));
    }

    #[test]
    fn test_invalid_path_with_parent() {
        assert!(!path_is_valid(Path::new("../holiday.mp4")));
    }

    #[test]
    fn test_invalid_path_with_multiple_components() {
        assert!(!path_is_valid(Path::new("dir1/dir2")));
    }

    #[test]
    fn test_invalid_path_with_root() {
        assert!(!path_is_valid(Path::new("/root_directory")));
    }

    #[test]
    fn test_upload_path_is_unique_and_keeps_extension() {
        let dir = Path::new("/srv/uploads");
        let first = upload_path(dir, "Holiday.MOV").unwrap();
        let second = upload_path(dir, "Holiday.MOV").unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with(dir));
        assert_eq!(first.extension().unwrap(), "mov");
    }

    #[test]
    fn test_upload_path_defaults_extension() {
        let dir = Path::new("/srv/uploads");
        let path = upload_path(dir, "clip").unwrap();
        assert_eq!(path.extension().unwrap(), "mp4");
        let path = upload_path(dir, "clip.m p4").unwrap();
        assert_eq!(path.extension().unwrap(), "mp4");
        assert!(upload_path(dir, "../clip.mp4").is_none());
    }
}
