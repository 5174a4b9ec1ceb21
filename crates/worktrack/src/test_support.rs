//! Test doubles for the storage and fetch seams.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Notify, Semaphore};
use url::Url;

use worktrack_core::holiday::{FetchError, JsonFetcher};
use worktrack_core::storage::{Result, StorageBackend, StoreDocument, StoreError};

use crate::storage::MemoryBackend;

/// A memory backend whose saves can be made to fail or to wait.
#[derive(Clone)]
pub struct FlakyBackend {
    inner: MemoryBackend,
    save_calls: Arc<AtomicUsize>,
    fail_from: Arc<AtomicUsize>,
    hold: Arc<AtomicBool>,
    entered: Arc<Notify>,
    release: Arc<Semaphore>,
}

impl FlakyBackend {
    pub fn new() -> Self {
        Self::with_backend(MemoryBackend::new())
    }

    pub fn with_backend(inner: MemoryBackend) -> Self {
        Self {
            inner,
            save_calls: Arc::new(AtomicUsize::new(0)),
            fail_from: Arc::new(AtomicUsize::new(usize::MAX)),
            hold: Arc::new(AtomicBool::new(false)),
            entered: Arc::new(Notify::new()),
            release: Arc::new(Semaphore::new(0)),
        }
    }

    /// Makes every following save fail, or succeed again.
    pub fn fail_saves(&self, fail: bool) {
        let from = if fail {
            self.save_calls.load(Ordering::SeqCst)
        } else {
            usize::MAX
        };
        self.fail_from.store(from, Ordering::SeqCst);
    }

    /// Lets `successes` more saves through, then fails the rest.
    pub fn fail_after(&self, successes: usize) {
        let from = self.save_calls.load(Ordering::SeqCst) + successes;
        self.fail_from.store(from, Ordering::SeqCst);
    }

    /// Makes saves wait for [`release_save`](Self::release_save).
    pub fn hold_saves(&self, hold: bool) {
        self.hold.store(hold, Ordering::SeqCst);
    }

    /// Waits until a held save has started.
    pub async fn wait_for_save(&self) {
        self.entered.notified().await;
    }

    /// Lets one held save continue.
    pub fn release_save(&self) {
        self.release.add_permits(1);
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub async fn saved(&self) -> Option<StoreDocument> {
        self.inner.saved().await
    }
}

#[async_trait]
impl StorageBackend for FlakyBackend {
    async fn load(&self) -> Result<Option<StoreDocument>> {
        self.inner.load().await
    }

    async fn save(&self, document: &StoreDocument) -> Result<()> {
        let call = self.save_calls.fetch_add(1, Ordering::SeqCst);

        if self.hold.load(Ordering::SeqCst) {
            self.entered.notify_one();
            if let Ok(permit) = self.release.acquire().await {
                permit.forget();
            }
        }

        if call >= self.fail_from.load(Ordering::SeqCst) {
            return Err(StoreError::DurableWriteFailure(
                "simulated write failure".to_string(),
            ));
        }
        self.inner.save(document).await
    }
}

/// A fetcher that returns a canned result and counts calls.
#[derive(Clone)]
pub struct StubFetcher {
    response: Arc<Mutex<std::result::Result<serde_json::Value, FetchError>>>,
    calls: Arc<AtomicUsize>,
    urls: Arc<Mutex<Vec<Url>>>,
    delay: Duration,
}

impl StubFetcher {
    pub fn ok(payload: serde_json::Value) -> Self {
        Self::with_response(Ok(payload))
    }

    pub fn failing(error: FetchError) -> Self {
        Self::with_response(Err(error))
    }

    fn with_response(response: std::result::Result<serde_json::Value, FetchError>) -> Self {
        Self {
            response: Arc::new(Mutex::new(response)),
            calls: Arc::new(AtomicUsize::new(0)),
            urls: Arc::new(Mutex::new(Vec::new())),
            delay: Duration::ZERO,
        }
    }

    /// Delays every response, so that concurrent callers overlap.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn respond_ok(&self, payload: serde_json::Value) {
        *self.response.lock().unwrap() = Ok(payload);
    }

    pub fn respond_err(&self, error: FetchError) {
        *self.response.lock().unwrap() = Err(error);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<Url> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl JsonFetcher for StubFetcher {
    async fn fetch_json(&self, url: &Url) -> std::result::Result<serde_json::Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(url.clone());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.response.lock().unwrap().clone()
    }
}

/// A small holiday payload in the remote format for `year`.
pub fn holiday_payload(year: i32) -> serde_json::Value {
    serde_json::json!({
        "Neujahrstag": {"datum": format!("{year}-01-01"), "hinweis": ""},
        "Tag der Arbeit": {"datum": format!("{year}-05-01"), "hinweis": ""},
        "Tag der Deutschen Einheit": {"datum": format!("{year}-10-03"), "hinweis": ""}
    })
}
