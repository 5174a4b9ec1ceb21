//! Single-day CLI commands.

use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand};

use worktrack_core::calendar::{DayType, WorkDay};
use worktrack_core::serde::parse_time;

/// Single-day commands.
#[derive(Debug, Parser)]
pub struct DayCommand {
    #[command(subcommand)]
    pub action: DayAction,
}

/// Available day actions.
#[derive(Debug, Subcommand)]
pub enum DayAction {
    /// Record a day, replacing what was stored for that date.
    Set {
        /// Date (YYYY-MM-DD).
        date: NaiveDate,
        /// Day type: work, vacation, sick, paid_absence or school_day.
        #[arg(long = "type", default_value = "work")]
        day_type: DayType,
        /// Start time (HH:MM), work days only.
        #[arg(long, value_parser = parse_time)]
        start: Option<NaiveTime>,
        /// End time (HH:MM), work days only.
        #[arg(long, value_parser = parse_time)]
        end: Option<NaiveTime>,
        /// Break in minutes, work days only.
        #[arg(long = "break", default_value = "0")]
        break_minutes: u32,
        /// Free-text notes.
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Remove the record of a day.
    Delete {
        /// Date (YYYY-MM-DD).
        date: NaiveDate,
    },
}

/// Builds the record for `day set`.
pub fn build_day(
    date: NaiveDate,
    day_type: DayType,
    start: Option<NaiveTime>,
    end: Option<NaiveTime>,
    break_minutes: u32,
    notes: String,
) -> WorkDay {
    WorkDay {
        date,
        work_start_time: start,
        work_end_time: end,
        break_minutes,
        notes,
        day_type,
    }
    .normalized()
}
