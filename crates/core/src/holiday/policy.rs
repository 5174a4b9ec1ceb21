//! Freshness and eviction rules for the durable holiday cache.

use chrono::{DateTime, Duration, Utc};

use super::error::HolidayError;
use super::types::{HolidayCacheEntry, HolidayKey, HolidaySet};

/// Default freshness window of a cached holiday set.
pub const DEFAULT_TTL_DAYS: i64 = 7;

/// Default number of holiday sets kept in the durable cache.
pub const DEFAULT_CAPACITY: usize = 6;

/// Bounds of the durable holiday cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub ttl: Duration,
    pub capacity: usize,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::days(DEFAULT_TTL_DAYS),
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl CachePolicy {
    /// Returns true while `now - fetched_at` is strictly below the TTL.
    pub fn is_fresh(&self, entry: &HolidayCacheEntry, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(entry.fetched_at) < self.ttl
    }
}

/// Finds the cached entry for `key`.
pub fn find_entry(entries: &[HolidayCacheEntry], key: HolidayKey) -> Option<&HolidayCacheEntry> {
    entries.iter().find(|entry| entry.key() == key)
}

/// Stores `entry` in insertion order and evicts from the front.
///
/// An existing entry for the same key is removed first, so a refresh moves
/// the key to the back. Eviction ignores how recently an entry was read.
/// Returns the evicted entries, oldest first.
pub fn upsert_fifo(
    entries: &mut Vec<HolidayCacheEntry>,
    entry: HolidayCacheEntry,
    capacity: usize,
) -> Vec<HolidayCacheEntry> {
    let key = entry.key();
    entries.retain(|existing| existing.key() != key);
    entries.push(entry);

    let overflow = entries.len().saturating_sub(capacity.max(1));
    entries.drain(..overflow).collect()
}

/// Parses the remote payload, an object of holiday name to `{datum, hinweis}`.
///
/// Anything else is a [`HolidayError::MalformedResponse`].
pub fn parse_payload(payload: serde_json::Value) -> Result<HolidaySet, HolidayError> {
    if !payload.is_object() {
        return Err(HolidayError::MalformedResponse(format!(
            "expected an object, got {}",
            json_kind(&payload)
        )));
    }
    serde_json::from_value(payload).map_err(|e| HolidayError::MalformedResponse(e.to_string()))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
