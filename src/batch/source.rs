use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::clip::Clip;
use crate::error::{ClipError, ClipResult};

/// Bytes and declared type of a resolved clip source
#[derive(Debug, Clone, PartialEq)]
pub struct SourcePayload {
    pub data: Bytes,
    pub mime_type: String,
}

/// Anything that can be resolved into clip bytes
///
/// The batch processor names each resolved clip itself, so a source only
/// provides bytes and a MIME type.
#[async_trait]
pub trait ClipSource: Send + Sync {
    /// Short description for logs and error messages
    fn describe(&self) -> String;

    /// Fetch the clip bytes
    async fn resolve(&self) -> ClipResult<SourcePayload>;
}

/// Clip bytes already held in memory
#[derive(Debug, Clone)]
pub struct MemorySource {
    data: Bytes,
    mime_type: String,
}

impl MemorySource {
    pub fn new<D: Into<Bytes>, M: Into<String>>(data: D, mime_type: M) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
        }
    }
}

#[async_trait]
impl ClipSource for MemorySource {
    fn describe(&self) -> String {
        format!("memory ({} bytes, {})", self.data.len(), self.mime_type)
    }

    async fn resolve(&self) -> ClipResult<SourcePayload> {
        Ok(SourcePayload {
            data: self.data.clone(),
            mime_type: self.mime_type.clone(),
        })
    }
}

/// A clip stored on disk
///
/// The MIME type is inferred from the extension unless set explicitly.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    mime_type: Option<String>,
}

impl FileSource {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            mime_type: None,
        }
    }

    /// Override the inferred MIME type
    pub fn with_mime_type<M: Into<String>>(mut self, mime_type: M) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// MIME type this source will report
    pub fn mime_type(&self) -> String {
        self.mime_type
            .clone()
            .unwrap_or_else(|| mime_type_for_path(&self.path).to_string())
    }
}

/// Guess a video MIME type from a file extension
pub fn mime_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "webm" => "video/webm",
        "mp4" | "m4v" => "video/mp4",
        "mov" => "video/quicktime",
        "mkv" => "video/x-matroska",
        "ogv" => "video/ogg",
        _ => "application/octet-stream",
    }
}

#[async_trait]
impl ClipSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn resolve(&self) -> ClipResult<SourcePayload> {
        let data = tokio::fs::read(&self.path)
            .await
            .map_err(|e| ClipError::SourceUnavailable {
                source_name: self.describe(),
                reason: e.to_string(),
            })?;

        Ok(SourcePayload {
            data: Bytes::from(data),
            mime_type: self.mime_type(),
        })
    }
}

#[async_trait]
impl ClipSource for Clip {
    fn describe(&self) -> String {
        self.name().to_string()
    }

    async fn resolve(&self) -> ClipResult<SourcePayload> {
        Ok(SourcePayload {
            data: self.data().clone(),
            mime_type: self.mime_type().to_string(),
        })
    }
}

#[async_trait]
impl<T: ClipSource + ?Sized> ClipSource for Box<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    async fn resolve(&self) -> ClipResult<SourcePayload> {
        (**self).resolve().await
    }
}

#[async_trait]
impl<T: ClipSource + ?Sized> ClipSource for Arc<T> {
    fn describe(&self) -> String {
        (**self).describe()
    }

    async fn resolve(&self) -> ClipResult<SourcePayload> {
        (**self).resolve().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_mime_type_inference() {
        assert_eq!(mime_type_for_path(Path::new("a/b/take.webm")), "video/webm");
        assert_eq!(mime_type_for_path(Path::new("TAKE.MP4")), "video/mp4");
        assert_eq!(mime_type_for_path(Path::new("clip.mov")), "video/quicktime");
        assert_eq!(mime_type_for_path(Path::new("notes")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_memory_source() {
        let source = MemorySource::new(vec![1u8, 2, 3], "video/mp4");
        let payload = source.resolve().await.unwrap();
        assert_eq!(&payload.data[..], &[1u8, 2, 3]);
        assert_eq!(payload.mime_type, "video/mp4");
    }

    #[tokio::test]
    async fn test_file_source_reads_bytes() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("take.webm");
        std::fs::write(&path, b"webm bytes").unwrap();

        let payload = FileSource::new(&path).resolve().await.unwrap();
        assert_eq!(&payload.data[..], b"webm bytes");
        assert_eq!(payload.mime_type, "video/webm");

        let overridden = FileSource::new(&path).with_mime_type("video/mp4");
        assert_eq!(overridden.resolve().await.unwrap().mime_type, "video/mp4");
    }

    #[tokio::test]
    async fn test_missing_file_is_source_unavailable() {
        let dir = tempdir().unwrap();
        let source = FileSource::new(dir.path().join("gone.webm"));

        match source.resolve().await {
            Err(ClipError::SourceUnavailable { source_name, .. }) => {
                assert!(source_name.ends_with("gone.webm"));
            }
            other => panic!("expected SourceUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_boxed_sources_mix() {
        let sources: Vec<Box<dyn ClipSource>> = vec![
            Box::new(MemorySource::new(vec![0u8; 4], "video/webm")),
            Box::new(Clip::new("held.mp4", "video/mp4", vec![0u8; 2])),
        ];

        assert_eq!(sources[0].resolve().await.unwrap().mime_type, "video/webm");
        assert_eq!(sources[1].describe(), "held.mp4");
    }
}
