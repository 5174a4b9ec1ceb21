//! Two-layer holiday cache.
//!
//! The durable layer lives in the `holidayCache` collection: entries younger
//! than the TTL are served without a remote call, at most `capacity` entries
//! are kept and the earliest inserted is evicted first. The session layer
//! shares one resolution between concurrent requests for the same key.

use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lru::LruCache;
use tokio::sync::{Mutex, OnceCell};
use url::Url;

use worktrack_core::holiday::{
    find_entry, holiday_url, parse_payload, upsert_fifo, CachePolicy, HolidayCacheEntry,
    HolidayKey, HolidayLookup, HolidaySet, JsonFetcher, Result as HolidayResult,
};
use worktrack_core::settings::RegionCode;
use worktrack_core::storage::HolidayCache as HolidayCacheCollection;

use crate::error::Result;
use crate::storage::RecordStore;

type Resolution = HolidayResult<HolidayLookup>;

pub struct HolidayCache {
    store: Arc<RecordStore>,
    fetcher: Arc<dyn JsonFetcher>,
    base_url: Url,
    policy: CachePolicy,
    session: Mutex<LruCache<HolidayKey, Arc<OnceCell<Resolution>>>>,
}

impl HolidayCache {
    /// Creates a cache with room for `session_capacity` keys in memory.
    ///
    /// A capacity of 0 is raised to 1.
    pub fn new(
        store: Arc<RecordStore>,
        fetcher: Arc<dyn JsonFetcher>,
        base_url: Url,
        policy: CachePolicy,
        session_capacity: usize,
    ) -> Self {
        let capacity = NonZeroUsize::new(session_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            store,
            fetcher,
            base_url,
            policy,
            session: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Returns the holidays of `region` in `year`.
    pub async fn get(&self, year: i32, region: RegionCode) -> Result<HolidayLookup> {
        self.get_at(year, region, Utc::now()).await
    }

    /// Same as [`get`](Self::get) with the clock supplied by the caller.
    pub async fn get_at(
        &self,
        year: i32,
        region: RegionCode,
        now: DateTime<Utc>,
    ) -> Result<HolidayLookup> {
        let key = HolidayKey::new(year, region);

        let cell = {
            let mut session = self.session.lock().await;
            match session.get(&key) {
                Some(cell) => {
                    tracing::trace!(%key, "Holiday session hit");
                    Arc::clone(cell)
                }
                None => {
                    let cell = Arc::new(OnceCell::new());
                    session.put(key, Arc::clone(&cell));
                    cell
                }
            }
        };

        let resolution = cell.get_or_init(|| self.resolve(key, now)).await.clone();

        // Only fresh data is kept for the session; anything else retries next time.
        if !matches!(&resolution, Ok(lookup) if !lookup.is_stale()) {
            let mut session = self.session.lock().await;
            if session
                .peek(&key)
                .is_some_and(|current| Arc::ptr_eq(current, &cell))
            {
                session.pop(&key);
            }
        }

        Ok(resolution?)
    }

    async fn resolve(&self, key: HolidayKey, now: DateTime<Utc>) -> Resolution {
        let entries = self.store.get::<HolidayCacheCollection>().await?;
        let cached = find_entry(&entries, key).cloned();

        if let Some(entry) = &cached {
            if self.policy.is_fresh(entry, now) {
                tracing::debug!(%key, fetched_at = %entry.fetched_at, "Holidays served from cache");
                return Ok(HolidayLookup::fresh(entry.data.clone()));
            }
        }

        match self.fetch(key).await {
            Ok(holidays) => {
                self.remember(key, holidays.clone(), now).await;
                Ok(HolidayLookup::fresh(holidays))
            }
            Err(error) if error.is_remote_failure() => match cached {
                Some(entry) => {
                    tracing::warn!(
                        %key,
                        fetched_at = %entry.fetched_at,
                        error = %error,
                        "Holiday source unavailable, serving stale data"
                    );
                    Ok(HolidayLookup::stale(entry.data))
                }
                None => Err(error),
            },
            Err(error) => Err(error),
        }
    }

    async fn fetch(&self, key: HolidayKey) -> HolidayResult<HolidaySet> {
        let url = holiday_url(&self.base_url, key);
        tracing::debug!(%key, %url, "Fetching holidays");
        let payload = self.fetcher.fetch_json(&url).await?;
        parse_payload(payload)
    }

    /// Writes a fetched set into the durable layer.
    ///
    /// A failed write is logged and otherwise ignored.
    async fn remember(&self, key: HolidayKey, data: HolidaySet, now: DateTime<Utc>) {
        let entry = HolidayCacheEntry {
            year: key.year,
            region: key.region,
            data,
            fetched_at: now,
        };
        let capacity = self.policy.capacity;
        let written = self
            .store
            .update::<HolidayCacheCollection, _>(|entries| Ok(upsert_fifo(entries, entry, capacity)))
            .await;

        match written {
            Ok(evicted) => {
                for old in evicted {
                    tracing::debug!(key = %old.key(), "Evicted holiday cache entry");
                }
            }
            Err(error) => {
                tracing::warn!(%key, error = %error, "Could not persist fetched holidays");
            }
        }
    }
}
