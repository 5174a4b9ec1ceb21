//! Public holidays from the remote source, cached per (year, region).

mod cache;
mod http;

pub use cache::HolidayCache;
pub use http::ReqwestFetcher;
