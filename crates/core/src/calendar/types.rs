use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use super::CalendarError;
use crate::serde::{deserialize_optional_time, serialize_optional_time};

/// The stored classification of a calendar day.
///
/// Holidays and weekends are derived at render time (see [`DayClass`]) and are
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayType {
    Work,
    Vacation,
    Sick,
    PaidAbsence,
    /// Vocational school day, counted as a full target day.
    SchoolDay,
}

impl DayType {
    /// Returns the stable wire name of this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            DayType::Work => "work",
            DayType::Vacation => "vacation",
            DayType::Sick => "sick",
            DayType::PaidAbsence => "paid_absence",
            DayType::SchoolDay => "school_day",
        }
    }

    /// Returns true if only this type carries start/end times.
    pub fn has_times(&self) -> bool {
        matches!(self, DayType::Work)
    }
}

impl fmt::Display for DayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DayType {
    type Err = CalendarError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "work" => Ok(DayType::Work),
            "vacation" => Ok(DayType::Vacation),
            "sick" => Ok(DayType::Sick),
            "paid_absence" => Ok(DayType::PaidAbsence),
            "school_day" => Ok(DayType::SchoolDay),
            other => Err(CalendarError::UnknownDayType(other.to_string())),
        }
    }
}

/// A recorded calendar day, keyed by its date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkDay {
    pub date: NaiveDate,
    #[serde(
        default,
        serialize_with = "serialize_optional_time",
        deserialize_with = "deserialize_optional_time"
    )]
    pub work_start_time: Option<NaiveTime>,
    #[serde(
        default,
        serialize_with = "serialize_optional_time",
        deserialize_with = "deserialize_optional_time"
    )]
    pub work_end_time: Option<NaiveTime>,
    #[serde(default)]
    pub break_minutes: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(rename = "type")]
    pub day_type: DayType,
}

impl WorkDay {
    /// Creates a work day with start and end times.
    pub fn work(date: NaiveDate, start: NaiveTime, end: NaiveTime, break_minutes: u32) -> Self {
        Self {
            date,
            work_start_time: Some(start),
            work_end_time: Some(end),
            break_minutes,
            notes: String::new(),
            day_type: DayType::Work,
        }
    }

    /// Creates a day of a non-work type. Time fields stay empty.
    pub fn of_type(date: NaiveDate, day_type: DayType) -> Self {
        Self {
            date,
            work_start_time: None,
            work_end_time: None,
            break_minutes: 0,
            notes: String::new(),
            day_type,
        }
        .normalized()
    }

    /// Sets the notes for this day.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Returns this day with the time fields cleared unless it is a work day.
    pub fn normalized(mut self) -> Self {
        if !self.day_type.has_times() {
            self.work_start_time = None;
            self.work_end_time = None;
            self.break_minutes = 0;
        }
        self
    }
}

/// What a calendar cell shows for a date, combining stored and derived facts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum DayClass {
    /// A stored record decides the day.
    Recorded(DayType),
    /// A public holiday with its name.
    Holiday(String),
    Weekend,
    /// A weekday with nothing recorded yet.
    Open,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_day_type_round_trips_through_str() {
        for day_type in [
            DayType::Work,
            DayType::Vacation,
            DayType::Sick,
            DayType::PaidAbsence,
            DayType::SchoolDay,
        ] {
            assert_eq!(day_type.as_str().parse::<DayType>(), Ok(day_type));
        }
        assert!("holiday".parse::<DayType>().is_err());
    }

    #[test]
    fn test_of_type_clears_times() {
        let day = WorkDay::of_type(date(2026, 2, 17), DayType::Vacation);
        assert_eq!(day.work_start_time, None);
        assert_eq!(day.work_end_time, None);
        assert_eq!(day.break_minutes, 0);
    }

    #[test]
    fn test_normalized_keeps_work_times() {
        let day = WorkDay::work(date(2026, 2, 17), time(9, 0), time(17, 30), 30).normalized();
        assert_eq!(day.work_start_time, Some(time(9, 0)));
        assert_eq!(day.break_minutes, 30);
    }

    #[test]
    fn test_normalized_strips_times_from_sick_day() {
        let mut day = WorkDay::work(date(2026, 2, 17), time(9, 0), time(17, 30), 30);
        day.day_type = DayType::Sick;
        let day = day.normalized();
        assert_eq!(day.work_start_time, None);
        assert_eq!(day.work_end_time, None);
        assert_eq!(day.break_minutes, 0);
    }

    #[test]
    fn test_work_day_document_shape() {
        let day = WorkDay::work(date(2026, 2, 17), time(9, 0), time(17, 30), 30).with_notes("standup");
        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json["date"], "2026-02-17");
        assert_eq!(json["workStartTime"], "09:00");
        assert_eq!(json["workEndTime"], "17:30");
        assert_eq!(json["breakMinutes"], 30);
        assert_eq!(json["type"], "work");

        let back: WorkDay = serde_json::from_value(json).unwrap();
        assert_eq!(back, day);
    }

    #[test]
    fn test_absence_day_loads_with_empty_times() {
        let json = r#"{"date":"2026-03-02","workStartTime":"","workEndTime":"","breakMinutes":0,"notes":"","type":"paid_absence"}"#;
        let day: WorkDay = serde_json::from_str(json).unwrap();
        assert_eq!(day.day_type, DayType::PaidAbsence);
        assert_eq!(day.work_start_time, None);
    }
}
