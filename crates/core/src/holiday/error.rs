use thiserror::Error;

use crate::storage::StoreError;

/// Errors raised by a [`JsonFetcher`](super::JsonFetcher).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Transport(String),
    #[error("Unexpected HTTP status {0}")]
    Status(u16),
    #[error("Response is not valid JSON: {0}")]
    Decode(String),
}

/// Errors that can occur while resolving holidays.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HolidayError {
    #[error("Holiday source unavailable: {0}")]
    RemoteUnavailable(String),
    #[error("Malformed holiday response: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl HolidayError {
    /// Returns true for failures of the remote source.
    ///
    /// Both variants fall back to stale cached data when there is any.
    pub fn is_remote_failure(&self) -> bool {
        matches!(
            self,
            HolidayError::RemoteUnavailable(_) | HolidayError::MalformedResponse(_)
        )
    }
}

impl From<FetchError> for HolidayError {
    fn from(error: FetchError) -> Self {
        match error {
            FetchError::Decode(message) => HolidayError::MalformedResponse(message),
            other => HolidayError::RemoteUnavailable(other.to_string()),
        }
    }
}

/// Result type for holiday operations.
pub type Result<T> = std::result::Result<T, HolidayError>;
