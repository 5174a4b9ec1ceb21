use thiserror::Error;

/// Errors that can occur when validating or parsing calendar values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Invalid year-month (expected YYYY-MM): {0}")]
    InvalidYearMonth(String),
    #[error("Unknown day type: {0}")]
    UnknownDayType(String),
}
