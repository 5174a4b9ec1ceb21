use thiserror::Error;

/// Errors that can occur during record store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Store not initialized: call init() first")]
    Uninitialized,
    #[error("Failed to load store: {0}")]
    Load(String),
    #[error("Durable write failed: {0}")]
    DurableWriteFailure(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("{collection} not found: {id}")]
    NotFound {
        collection: &'static str,
        id: String,
    },
}

impl StoreError {
    pub fn not_found(collection: &'static str, id: impl ToString) -> Self {
        StoreError::NotFound {
            collection,
            id: id.to_string(),
        }
    }
}

/// Result type for record store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
