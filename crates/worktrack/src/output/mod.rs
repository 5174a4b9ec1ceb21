//! Rendering of command results.

pub mod json;
pub mod pretty;

use serde::Serialize;

use crate::cli::OutputFormat;

/// Renders `value` as JSON, or as text through `pretty`.
pub fn render<T: Serialize>(
    value: &T,
    format: OutputFormat,
    pretty: impl FnOnce(&T) -> String,
) -> String {
    match format {
        OutputFormat::Json => json::format_json(value),
        OutputFormat::Pretty => pretty(value),
    }
}
