use url::Url;

use super::types::HolidayKey;

/// Default holiday source.
pub const DEFAULT_HOLIDAY_API_URL: &str = "https://feiertage-api.de/api/";

/// Returns the request URL for one year and region.
///
/// Existing query parameters on `base` are kept.
pub fn holiday_url(base: &Url, key: HolidayKey) -> Url {
    let mut url = base.clone();
    url.query_pairs_mut()
        .append_pair("jahr", &key.year.to_string())
        .append_pair("nur_land", key.region.code());
    url
}
