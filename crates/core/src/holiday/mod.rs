mod error;
mod keys;
mod policy;
mod traits;
mod types;

pub use error::{FetchError, HolidayError, Result};
pub use keys::{holiday_url, DEFAULT_HOLIDAY_API_URL};
pub use policy::{
    find_entry, parse_payload, upsert_fifo, CachePolicy, DEFAULT_CAPACITY, DEFAULT_TTL_DAYS,
};
pub use traits::JsonFetcher;
pub use types::{
    Freshness, Holiday, HolidayCacheEntry, HolidayInfo, HolidayKey, HolidayLookup, HolidaySet,
};
