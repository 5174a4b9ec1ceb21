//! Shell error types.

use thiserror::Error;

use worktrack_core::calendar::CalendarError;
use worktrack_core::holiday::HolidayError;
use worktrack_core::settings::SettingsError;
use worktrack_core::storage::StoreError;
use worktrack_core::todo::TodoError;

/// Result type alias for the shell crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced to the presentation layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Holiday(#[from] HolidayError),

    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    Todo(#[from] TodoError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Returns true if a durable write was rejected.
    pub fn is_write_failure(&self) -> bool {
        matches!(self, Error::Store(StoreError::DurableWriteFailure(_)))
    }
}
