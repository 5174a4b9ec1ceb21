//! Typed whole-collection access to the durable document.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};

use worktrack_core::storage::{Collection, Result, StorageBackend, StoreDocument, StoreError};

/// The durable store every collection lives in.
///
/// Reads return a copy of the last committed value. Writes persist the
/// complete next document through the backend and only then make it
/// visible, so a failed write leaves the previous value in place.
pub struct RecordStore {
    backend: Arc<dyn StorageBackend>,
    committed: RwLock<Option<StoreDocument>>,
    writer: Mutex<()>,
}

impl RecordStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            backend,
            committed: RwLock::new(None),
            writer: Mutex::new(()),
        }
    }

    /// Loads the document, or starts from defaults when there is none.
    ///
    /// Calling it again after a successful init does nothing.
    pub async fn init(&self) -> Result<()> {
        let mut committed = self.committed.write().await;
        if committed.is_some() {
            return Ok(());
        }
        let document = match self.backend.load().await? {
            Some(document) => document,
            None => {
                tracing::info!("Starting with an empty data file");
                StoreDocument::default()
            }
        };
        tracing::debug!(
            work_days = document.work_days.len(),
            vacation_entries = document.vacation_entries.len(),
            sick_entries = document.sick_entries.len(),
            todos = document.todos.len(),
            "Record store initialized"
        );
        *committed = Some(document);
        Ok(())
    }

    pub async fn is_initialized(&self) -> bool {
        self.committed.read().await.is_some()
    }

    /// Returns the current value of collection `C`.
    pub async fn get<C: Collection>(&self) -> Result<C::Value> {
        let committed = self.committed.read().await;
        let document = committed.as_ref().ok_or(StoreError::Uninitialized)?;
        Ok(C::read(document).clone())
    }

    /// Returns a copy of the whole committed document.
    pub async fn snapshot(&self) -> Result<StoreDocument> {
        self.committed
            .read()
            .await
            .clone()
            .ok_or(StoreError::Uninitialized)
    }

    /// Replaces collection `C`.
    pub async fn set<C: Collection>(&self, value: C::Value) -> Result<()> {
        self.update::<C, _>(|current| {
            *current = value;
            Ok(())
        })
        .await
    }

    /// Read-modify-write of collection `C`.
    ///
    /// `f` works on a copy. If it fails nothing is written; otherwise the
    /// whole next document is persisted before it becomes visible.
    pub async fn update<C, R>(&self, f: impl FnOnce(&mut C::Value) -> Result<R>) -> Result<R>
    where
        C: Collection,
    {
        let _writer = self.writer.lock().await;

        let mut next = self.snapshot().await?;
        let mut value = C::read(&next).clone();
        let result = f(&mut value)?;
        C::write(&mut next, value);

        if let Err(error) = self.backend.save(&next).await {
            tracing::warn!(collection = C::NAME, error = %error, "Durable write failed");
            return Err(match error {
                StoreError::DurableWriteFailure(_) => error,
                other => StoreError::DurableWriteFailure(other.to_string()),
            });
        }

        *self.committed.write().await = Some(next);
        tracing::debug!(collection = C::NAME, "Collection written");
        Ok(result)
    }
}
