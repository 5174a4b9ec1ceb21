//! Serde helpers for the durable document format.
//!
//! Work times are stored as `HH:MM` strings where the empty string means
//! "no time recorded". Optional dates follow the same convention so that
//! documents written by older versions (which used `""` or `null`) still load.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serializer};

const TIME_FORMAT: &str = "%H:%M";

/// Serialize an optional time as `HH:MM`, or `""` when absent.
pub fn serialize_optional_time<S>(value: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(time) => serializer.serialize_str(&time.format(TIME_FORMAT).to_string()),
        None => serializer.serialize_str(""),
    }
}

/// Deserialize an optional NaiveTime, treating empty strings as None.
/// Accepts formats: HH:MM or HH:MM:SS
pub fn deserialize_optional_time<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => parse_time(&s)
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Deserialize an optional NaiveDate, treating empty strings as None.
/// Expects format: YYYY-MM-DD
pub fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if !s.trim().is_empty() => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Parses a wall-clock time in `HH:MM` or `HH:MM:SS` form.
pub fn parse_time(s: &str) -> Result<NaiveTime, chrono::ParseError> {
    let s = s.trim();
    NaiveTime::parse_from_str(s, TIME_FORMAT).or_else(|_| NaiveTime::parse_from_str(s, "%H:%M:%S"))
}
