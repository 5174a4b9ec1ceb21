mod types;

use thiserror::Error;

pub use types::{AppSettings, RegionCode, SettingsPatch, Theme};

/// Errors that can occur when parsing or validating settings.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SettingsError {
    #[error("Unknown region code: {0}")]
    UnknownRegion(String),
    #[error("Unknown theme: {0}")]
    UnknownTheme(String),
    #[error("Work hours per day must be between 0 and 24, got {0}")]
    InvalidWorkHours(f64),
}
