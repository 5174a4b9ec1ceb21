//! Planning for the consistency rules between calendar days and range entries.
//!
//! A vacation or sick day in the calendar and a range entry covering it are
//! two views of one fact. The functions here decide which writes keep both
//! views aligned; the shell performs them in order.

use chrono::NaiveDate;
use uuid::Uuid;

use super::types::{AbsenceKind, NewRangeEntry, RangeEntry};
use crate::calendar::{DayType, WorkDay};

/// Finds the entry that represents exactly one day, `start == end == date`.
pub fn find_single_day_entry(entries: &[RangeEntry], date: NaiveDate) -> Option<&RangeEntry> {
    entries.iter().find(|entry| entry.is_single_day(date))
}

/// A range-collection write caused by editing a single calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingleDayChange {
    Create {
        kind: AbsenceKind,
        entry: NewRangeEntry,
    },
    Remove {
        kind: AbsenceKind,
        id: Uuid,
    },
}

/// Decides the range-entry write for one kind when a day changes type.
///
/// `next` is `None` when the day is deleted. Rules only fire on a transition
/// into or out of `kind`:
/// - into: create a single-day entry unless one already exists
/// - out of: remove the single-day entry if there is one
///
/// Multi-day entries are never touched from here.
pub fn plan_single_day(
    kind: AbsenceKind,
    date: NaiveDate,
    previous: Option<DayType>,
    next: Option<DayType>,
    notes: &str,
    entries: &[RangeEntry],
) -> Option<SingleDayChange> {
    let target = kind.day_type();
    let was = previous == Some(target);
    let is = next == Some(target);

    match (was, is) {
        (false, true) => match find_single_day_entry(entries, date) {
            Some(_) => None,
            None => Some(SingleDayChange::Create {
                kind,
                entry: NewRangeEntry::single_day(date).with_notes(notes),
            }),
        },
        (true, false) => {
            find_single_day_entry(entries, date).map(|entry| SingleDayChange::Remove {
                kind,
                id: entry.id,
            })
        }
        _ => None,
    }
}

/// Returns true if `date` falls inside an entry that spans more than that day.
///
/// Unsetting such a day leaves the wider entry in place.
pub fn covered_by_wider_entry(entries: &[RangeEntry], date: NaiveDate) -> bool {
    entries
        .iter()
        .any(|entry| entry.range().contains(date) && !entry.is_single_day(date))
}

/// The calendar records an entry materializes: one per weekday in its range.
///
/// Each carries the entry's notes with empty times and no break. An entry
/// whose end lies before its start materializes nothing.
pub fn materialize(entry: &RangeEntry) -> Vec<WorkDay> {
    let day_type = entry.kind.day_type();
    entry
        .range()
        .weekdays()
        .map(|date| WorkDay::of_type(date, day_type).with_notes(entry.notes.clone()))
        .collect()
}

/// Ordered calendar writes that move an entry's days to their new place.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RangePlan {
    /// Days to delete first.
    pub clear: Vec<NaiveDate>,
    /// Days to write once clearing is done.
    pub write: Vec<WorkDay>,
}

impl RangePlan {
    pub fn is_empty(&self) -> bool {
        self.clear.is_empty() && self.write.is_empty()
    }
}

/// Plans the calendar side of adding, editing, deleting or re-syncing an entry.
///
/// Clearing is the full weekday set of `old`, writing is the full weekday set
/// of `new`. The plan is applied clear-then-write rather than as a diff, so
/// weekdays shared by both ranges end up written. Running the same plan twice
/// leaves the same state.
pub fn plan_range(old: Option<&RangeEntry>, new: Option<&RangeEntry>) -> RangePlan {
    RangePlan {
        clear: old
            .map(|entry| entry.range().weekdays().collect())
            .unwrap_or_default(),
        write: new.map(materialize).unwrap_or_default(),
    }
}
