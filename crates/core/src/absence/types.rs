use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::{DateRange, DayType};

/// Which range collection an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbsenceKind {
    Vacation,
    Sick,
}

impl AbsenceKind {
    pub const ALL: [AbsenceKind; 2] = [AbsenceKind::Vacation, AbsenceKind::Sick];

    /// The day type written for every weekday the entry covers.
    pub fn day_type(&self) -> DayType {
        match self {
            AbsenceKind::Vacation => DayType::Vacation,
            AbsenceKind::Sick => DayType::Sick,
        }
    }

    /// The range kind a day type belongs to, if any.
    pub fn from_day_type(day_type: DayType) -> Option<Self> {
        match day_type {
            DayType::Vacation => Some(AbsenceKind::Vacation),
            DayType::Sick => Some(AbsenceKind::Sick),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AbsenceKind::Vacation => "vacation",
            AbsenceKind::Sick => "sick",
        }
    }
}

impl fmt::Display for AbsenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AbsenceKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vacation" => Ok(AbsenceKind::Vacation),
            "sick" => Ok(AbsenceKind::Sick),
            other => Err(format!("Unknown absence kind: {other}")),
        }
    }
}

/// A vacation or sick record spanning an inclusive date range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeEntry {
    pub id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
    #[serde(rename = "type")]
    pub kind: AbsenceKind,
}

impl RangeEntry {
    pub fn range(&self) -> DateRange {
        DateRange::new(self.start_date, self.end_date)
    }

    /// Returns true if the entry covers exactly `date` and nothing else.
    pub fn is_single_day(&self, date: NaiveDate) -> bool {
        self.start_date == date && self.end_date == date
    }

    /// Replaces the editable fields, keeping id and kind.
    pub fn with_fields(mut self, fields: NewRangeEntry) -> Self {
        self.start_date = fields.start_date;
        self.end_date = fields.end_date;
        self.notes = fields.notes;
        self
    }
}

/// Payload for adding a range entry. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRangeEntry {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

impl NewRangeEntry {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
            notes: String::new(),
        }
    }

    /// An entry covering a single day.
    pub fn single_day(date: NaiveDate) -> Self {
        Self::new(date, date)
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Builds the stored record under the given id.
    pub fn into_entry(self, id: Uuid, kind: AbsenceKind) -> RangeEntry {
        RangeEntry {
            id,
            start_date: self.start_date,
            end_date: self.end_date,
            notes: self.notes,
            kind,
        }
    }
}

/// Allotted vacation days for one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacationBudget {
    pub year: i32,
    pub total_days: u32,
}
