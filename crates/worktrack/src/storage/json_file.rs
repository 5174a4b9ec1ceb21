//! JSON file storage backend.
//!
//! The whole document lives in one pretty-printed JSON file. Saves go to a
//! sibling temp file that is then renamed over the target, so a reader never
//! sees a half-written document.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use worktrack_core::storage::{Result, StorageBackend, StoreDocument, StoreError};

#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl StorageBackend for JsonFileBackend {
    async fn load(&self) -> Result<Option<StoreDocument>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No data file yet");
                return Ok(None);
            }
            Err(e) => {
                return Err(StoreError::Load(format!("{}: {e}", self.path.display())));
            }
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| StoreError::Load(format!("{}: {e}", self.path.display())))
    }

    async fn save(&self, document: &StoreDocument) -> Result<()> {
        let contents = serde_json::to_vec_pretty(document)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::DurableWriteFailure(e.to_string()))?;
        }

        let temp = self.temp_path();
        tokio::fs::write(&temp, &contents)
            .await
            .map_err(|e| StoreError::DurableWriteFailure(format!("{}: {e}", temp.display())))?;
        tokio::fs::rename(&temp, &self.path)
            .await
            .map_err(|e| StoreError::DurableWriteFailure(format!("{}: {e}", self.path.display())))?;

        tracing::trace!(path = %self.path.display(), bytes = contents.len(), "Saved data file");
        Ok(())
    }
}
