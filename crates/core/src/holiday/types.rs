use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::calendar::YearMonth;
use crate::settings::RegionCode;

/// Date and remark of one public holiday, as the remote source reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayInfo {
    #[serde(rename = "datum")]
    pub date: NaiveDate,
    #[serde(rename = "hinweis", default)]
    pub note: String,
}

/// A holiday with its name, for listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub name: String,
    pub date: NaiveDate,
    pub note: String,
}

/// All holidays of one year and region, keyed by holiday name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidaySet(BTreeMap<String, HolidayInfo>);

impl HolidaySet {
    pub fn insert(&mut self, name: impl Into<String>, info: HolidayInfo) {
        self.0.insert(name.into(), info);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HolidayInfo)> {
        self.0.iter().map(|(name, info)| (name.as_str(), info))
    }

    /// Holidays falling inside `month`, ordered by date.
    pub fn holidays_in_month(&self, month: YearMonth) -> Vec<Holiday> {
        let mut holidays: Vec<Holiday> = self
            .iter()
            .filter(|(_, info)| month.contains(info.date))
            .map(|(name, info)| Holiday {
                name: name.to_string(),
                date: info.date,
                note: info.note.clone(),
            })
            .collect();
        holidays.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.name.cmp(&b.name)));
        holidays
    }

    /// The first holiday on `date`, if any.
    pub fn holiday_on(&self, date: NaiveDate) -> Option<(&str, &HolidayInfo)> {
        self.iter().find(|(_, info)| info.date == date)
    }
}

/// Identifies one cached holiday set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HolidayKey {
    pub year: i32,
    pub region: RegionCode,
}

impl HolidayKey {
    pub fn new(year: i32, region: RegionCode) -> Self {
        Self { year, region }
    }
}

impl fmt::Display for HolidayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.year, self.region)
    }
}

/// A durable cache record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HolidayCacheEntry {
    pub year: i32,
    #[serde(rename = "state")]
    pub region: RegionCode,
    pub data: HolidaySet,
    pub fetched_at: DateTime<Utc>,
}

impl HolidayCacheEntry {
    pub fn key(&self) -> HolidayKey {
        HolidayKey::new(self.year, self.region)
    }
}

/// Whether a lookup was served within its freshness window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    Fresh,
    /// Expired cache data served because the remote source failed.
    Stale,
}

/// The outcome of a holiday lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HolidayLookup {
    pub holidays: HolidaySet,
    pub freshness: Freshness,
}

impl HolidayLookup {
    pub fn fresh(holidays: HolidaySet) -> Self {
        Self {
            holidays,
            freshness: Freshness::Fresh,
        }
    }

    pub fn stale(holidays: HolidaySet) -> Self {
        Self {
            holidays,
            freshness: Freshness::Stale,
        }
    }

    pub fn is_stale(&self) -> bool {
        self.freshness == Freshness::Stale
    }
}
