//! HTTP transport for the holiday source.

use async_trait::async_trait;
use reqwest::StatusCode;
use url::Url;

use worktrack_core::holiday::{FetchError, JsonFetcher};

/// Fetches JSON documents with a shared `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JsonFetcher for ReqwestFetcher {
    async fn fetch_json(&self, url: &Url) -> Result<serde_json::Value, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
