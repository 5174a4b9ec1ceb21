use async_trait::async_trait;
use url::Url;

use super::FetchError;

/// Fetches a JSON document from a URL.
///
/// The only network capability the holiday cache needs. Non-success statuses
/// and transport errors are reported as [`FetchError`].
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch_json(&self, url: &Url) -> Result<serde_json::Value, FetchError>;
}
