use std::{env, path::PathBuf};

use chrono::Duration;
use url::Url;

use worktrack_core::holiday::{
    CachePolicy, DEFAULT_CAPACITY, DEFAULT_HOLIDAY_API_URL, DEFAULT_TTL_DAYS,
};

use crate::error::{Error, Result};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the JSON data file (default: "work-tracker-data.json")
    pub data_file: PathBuf,
    /// Holiday source base URL (default: "https://feiertage-api.de/api/")
    pub holiday_api_url: String,
    /// Days a cached holiday set stays fresh (default: 7)
    pub holiday_ttl_days: i64,
    /// Holiday sets kept in the data file (default: 6)
    pub holiday_cache_capacity: usize,
    /// Holiday sets kept in memory for the session (default: 32)
    pub session_cache_capacity: usize,
    /// Emit logs as JSON lines (default: false)
    pub log_json: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `WORKTRACK_DATA_FILE` - Data file path (default: "work-tracker-data.json")
    /// - `WORKTRACK_HOLIDAY_API_URL` - Holiday source (default: "https://feiertage-api.de/api/")
    /// - `WORKTRACK_HOLIDAY_TTL_DAYS` - Holiday freshness in days (default: 7)
    /// - `WORKTRACK_HOLIDAY_CACHE_CAPACITY` - Durable holiday sets (default: 6)
    /// - `WORKTRACK_SESSION_CACHE_CAPACITY` - In-memory holiday sets (default: 32)
    /// - `WORKTRACK_LOG_JSON` - Set to `1` or `true` for JSON logs
    pub fn from_env() -> Self {
        Self {
            data_file: env::var("WORKTRACK_DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("work-tracker-data.json")),
            holiday_api_url: env::var("WORKTRACK_HOLIDAY_API_URL")
                .unwrap_or_else(|_| DEFAULT_HOLIDAY_API_URL.to_string()),
            holiday_ttl_days: env::var("WORKTRACK_HOLIDAY_TTL_DAYS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TTL_DAYS),
            holiday_cache_capacity: env::var("WORKTRACK_HOLIDAY_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CAPACITY),
            session_cache_capacity: env::var("WORKTRACK_SESSION_CACHE_CAPACITY")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(32),
            log_json: env::var("WORKTRACK_LOG_JSON")
                .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
                .unwrap_or(false),
        }
    }

    /// Replace the data file path.
    pub fn with_data_file(mut self, data_file: impl Into<PathBuf>) -> Self {
        self.data_file = data_file.into();
        self
    }

    /// Durable holiday cache bounds.
    ///
    /// A TTL too large for a `Duration` falls back to the default.
    pub fn holiday_policy(&self) -> CachePolicy {
        CachePolicy {
            ttl: Duration::try_days(self.holiday_ttl_days)
                .unwrap_or_else(|| Duration::days(DEFAULT_TTL_DAYS)),
            capacity: self.holiday_cache_capacity,
        }
    }

    /// Parse the holiday source URL.
    pub fn holiday_base_url(&self) -> Result<Url> {
        Url::parse(&self.holiday_api_url)
            .map_err(|e| Error::Config(format!("WORKTRACK_HOLIDAY_API_URL: {e}")))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
