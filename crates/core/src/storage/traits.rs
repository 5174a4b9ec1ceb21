use async_trait::async_trait;

use super::{Result, StoreDocument};

/// Durable storage for the whole document.
///
/// Implementations must make `save` all-or-nothing: after a failed save the
/// next `load` returns the previously saved document.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Loads the saved document, or `None` on first start.
    async fn load(&self) -> Result<Option<StoreDocument>>;

    /// Replaces the saved document.
    async fn save(&self, document: &StoreDocument) -> Result<()>;
}
