//! Resource provider backed by JSON documents on disk.
//!
//! Each resource lives at `<root>/<resource_id>.json` and holds a
//! [`LayerSource`]. Acquisition reads the file; readiness parses it.

use std::path::{Path, PathBuf};

use tracing::trace;

use super::error::ResourceError;
use super::provider::{ResourceHandle, ResourceProvider};
use super::types::LayerSource;

/// Reads layer sources from a fixture directory.
#[derive(Debug, Clone)]
pub struct FileResourceProvider {
    root: PathBuf,
}

impl FileResourceProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, resource_id: &str) -> Result<PathBuf, ResourceError> {
        let valid = !resource_id.is_empty()
            && resource_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(ResourceError::acquire(
                resource_id,
                "resource id must be alphanumeric",
            ));
        }
        Ok(self.root.join(format!("{resource_id}.json")))
    }
}

/// Raw document read from disk, parsed on readiness.
#[derive(Debug)]
pub struct FileHandle {
    resource_id: String,
    contents: String,
}

impl ResourceProvider for FileResourceProvider {
    type Handle = FileHandle;

    async fn acquire(&self, resource_id: &str) -> Result<FileHandle, ResourceError> {
        let path = self.path_for(resource_id)?;
        trace!(path = %path.display(), "Reading layer source");
        let contents = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ResourceError::acquire(resource_id, format!("{}: {e}", path.display())))?;
        Ok(FileHandle {
            resource_id: resource_id.to_string(),
            contents,
        })
    }
}

impl ResourceHandle for FileHandle {
    fn resource_id(&self) -> &str {
        &self.resource_id
    }

    async fn ready(self) -> Result<LayerSource, ResourceError> {
        serde_json::from_str(&self.contents)
            .map_err(|e| ResourceError::ready(self.resource_id, format!("invalid layer document: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::ErrorKind;
    use tempfile::TempDir;

    const SIMPLE: &str = r##"{
        "title": "Boundary",
        "fields": ["UPPER_VAL", "LOWER_VAL"],
        "renderer": {"type": "simple", "symbol": {"type": "simple-fill", "color": "#ffff00"}}
    }"##;

    #[tokio::test]
    async fn test_reads_and_parses_document() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("abc123.json"), SIMPLE).unwrap();
        let provider = FileResourceProvider::new(dir.path());

        let handle = provider.acquire("abc123").await.unwrap();
        assert_eq!(handle.resource_id(), "abc123");
        let source = handle.ready().await.unwrap();

        assert_eq!(source.title.as_deref(), Some("Boundary"));
        assert_eq!(source.fields.len(), 2);
    }

    #[tokio::test]
    async fn test_missing_file_fails_acquire() {
        let dir = TempDir::new().unwrap();
        let provider = FileResourceProvider::new(dir.path());

        let err = provider.acquire("missing").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Acquire);
        assert_eq!(err.resource_id(), "missing");
    }

    #[tokio::test]
    async fn test_malformed_document_fails_ready() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("bad.json"), "{\"renderer\": 7}").unwrap();
        let provider = FileResourceProvider::new(dir.path());

        let handle = provider.acquire("bad").await.unwrap();
        let err = handle.ready().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Ready);
    }

    #[tokio::test]
    async fn test_rejects_path_like_ids() {
        let provider = FileResourceProvider::new("/tmp");
        for id in ["../etc/passwd", "a/b", "", "x.json"] {
            let err = provider.acquire(id).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Acquire, "id {id:?}");
        }
    }
}
