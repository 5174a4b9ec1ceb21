use std::collections::BTreeMap;

use chrono::NaiveDate;

use super::dates::{is_weekday, YearMonth};
use super::types::{DayClass, WorkDay};
use crate::holiday::HolidaySet;

/// Returns the stored days whose date falls inside `month`, in date order.
pub fn filter_month(days: &BTreeMap<NaiveDate, WorkDay>, month: YearMonth) -> Vec<WorkDay> {
    days.range(month.first_day()..=month.last_day())
        .map(|(_, day)| day.clone())
        .collect()
}

/// Decides what a calendar cell shows.
///
/// A stored record wins over everything, then a public holiday, then the
/// weekend. Anything else is an open weekday.
pub fn classify_day(date: NaiveDate, stored: Option<&WorkDay>, holidays: &HolidaySet) -> DayClass {
    if let Some(day) = stored {
        return DayClass::Recorded(day.day_type);
    }
    if let Some((name, _)) = holidays.holiday_on(date) {
        return DayClass::Holiday(name.to_string());
    }
    if !is_weekday(date) {
        return DayClass::Weekend;
    }
    DayClass::Open
}
