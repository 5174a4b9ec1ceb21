use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::CalendarError;

/// Returns true for Monday through Friday.
pub fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// A date range with inclusive start and end dates.
///
/// A range whose end lies before its start is empty rather than invalid; it
/// yields no days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Creates a date range covering a whole calendar year.
    pub fn year(year: i32) -> Option<Self> {
        Some(Self {
            start: NaiveDate::from_ymd_opt(year, 1, 1)?,
            end: NaiveDate::from_ymd_opt(year, 12, 31)?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Returns the overlap of two ranges, or `None` if they are disjoint.
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        let clamped = DateRange::new(self.start.max(other.start), self.end.min(other.end));
        (!clamped.is_empty()).then_some(clamped)
    }

    /// Iterates every date in the range.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        self.start
            .iter_days()
            .take_while(move |date| *date <= end)
    }

    /// Iterates the Monday to Friday dates in the range.
    pub fn weekdays(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.days().filter(|date| is_weekday(*date))
    }
}

/// Collects the weekdays of `[start, end]`. Empty when `end < start`.
pub fn weekdays_in_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    DateRange::new(start, end).weekdays().collect()
}

/// Counts the weekdays of `[start, end]`. Zero when `end < start`.
pub fn count_business_days(start: NaiveDate, end: NaiveDate) -> u32 {
    DateRange::new(start, end).weekdays().count() as u32
}

/// A calendar month, written as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) || NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(CalendarError::InvalidYearMonth(format!("{year:04}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        // Validated on construction.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        let next = self.next().first_day();
        next.pred_opt().unwrap_or(next)
    }

    /// The month as an inclusive date range.
    pub fn range(&self) -> DateRange {
        DateRange::new(self.first_day(), self.last_day())
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CalendarError::InvalidYearMonth(s.to_string());
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year = year.parse::<i32>().map_err(|_| invalid())?;
        let month = month.parse::<u32>().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_weekdays_skip_weekend() {
        // 2026-03-02 is a Monday, 2026-03-08 a Sunday
        let days = weekdays_in_range(date(2026, 3, 2), date(2026, 3, 8));

        assert_eq!(
            days,
            vec![
                date(2026, 3, 2),
                date(2026, 3, 3),
                date(2026, 3, 4),
                date(2026, 3, 5),
                date(2026, 3, 6),
            ]
        );
    }

    #[test]
    fn test_reversed_range_is_empty() {
        let range = DateRange::new(date(2026, 3, 8), date(2026, 3, 2));

        assert!(range.is_empty());
        assert_eq!(range.days().count(), 0);
        assert_eq!(count_business_days(range.start, range.end), 0);
    }

    #[test]
    fn test_single_day_range() {
        let day = date(2026, 2, 17);
        assert_eq!(weekdays_in_range(day, day), vec![day]);

        let saturday = date(2026, 2, 21);
        assert!(weekdays_in_range(saturday, saturday).is_empty());
    }

    #[test]
    fn test_count_business_days_across_months() {
        // Jan 29 (Thu) .. Feb 4 (Wed) 2026
        assert_eq!(count_business_days(date(2026, 1, 29), date(2026, 2, 4)), 5);
    }

    #[test]
    fn test_intersect_clamps_to_year() {
        let entry = DateRange::new(date(2025, 12, 29), date(2026, 1, 2));
        let year = DateRange::year(2026).unwrap();

        let overlap = entry.intersect(&year).unwrap();

        assert_eq!(overlap.start, date(2026, 1, 1));
        assert_eq!(overlap.end, date(2026, 1, 2));
        assert!(DateRange::year(2027).unwrap().intersect(&entry).is_none());
    }

    #[test]
    fn test_year_month_parse_and_display() {
        let ym: YearMonth = "2026-02".parse().unwrap();

        assert_eq!(ym.year(), 2026);
        assert_eq!(ym.month(), 2);
        assert_eq!(ym.to_string(), "2026-02");
    }

    #[test]
    fn test_year_month_rejects_garbage() {
        for input in ["2026-13", "2026-2", "26-02", "2026/02", "", "2026-00"] {
            assert!(input.parse::<YearMonth>().is_err(), "{input} should fail");
        }
    }

    #[test]
    fn test_year_month_bounds() {
        let feb_leap = YearMonth::new(2024, 2).unwrap();
        assert_eq!(feb_leap.first_day(), date(2024, 2, 1));
        assert_eq!(feb_leap.last_day(), date(2024, 2, 29));

        let december = YearMonth::new(2026, 12).unwrap();
        assert_eq!(december.last_day(), date(2026, 12, 31));
        assert_eq!(december.next(), YearMonth::new(2027, 1).unwrap());
        assert_eq!(YearMonth::new(2027, 1).unwrap().prev(), december);
    }

    #[test]
    fn test_year_month_contains() {
        let ym = YearMonth::new(2026, 3).unwrap();
        assert!(ym.contains(date(2026, 3, 31)));
        assert!(!ym.contains(date(2026, 4, 1)));
        assert_eq!(YearMonth::of(date(2026, 3, 15)), ym);
    }

    #[test]
    fn test_year_month_serde_as_string() {
        let ym = YearMonth::new(2026, 2).unwrap();
        let json = serde_json::to_string(&ym).unwrap();
        assert_eq!(json, r#""2026-02""#);
        let back: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ym);
    }
}
