//! In-memory storage backend.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use worktrack_core::storage::{Result, StorageBackend, StoreDocument};

/// In-memory storage backend for testing and ephemeral sessions.
///
/// Data is not persisted and will be lost when the backend is dropped.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    document: Arc<RwLock<Option<StoreDocument>>>,
}

impl MemoryBackend {
    /// Creates an empty backend. The first load reports a first start.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that already holds `document`.
    pub fn with_document(document: StoreDocument) -> Self {
        Self {
            document: Arc::new(RwLock::new(Some(document))),
        }
    }

    /// Returns the last saved document.
    pub async fn saved(&self) -> Option<StoreDocument> {
        self.document.read().await.clone()
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    async fn load(&self) -> Result<Option<StoreDocument>> {
        Ok(self.document.read().await.clone())
    }

    async fn save(&self, document: &StoreDocument) -> Result<()> {
        *self.document.write().await = Some(document.clone());
        Ok(())
    }
}
