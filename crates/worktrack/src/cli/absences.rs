//! Vacation and sick range CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use uuid::Uuid;

/// Range commands, shared by `vacation` and `sick`.
#[derive(Debug, Parser)]
pub struct AbsenceCommand {
    #[command(subcommand)]
    pub action: AbsenceAction,
}

/// Available range actions.
#[derive(Debug, Subcommand)]
pub enum AbsenceAction {
    /// List all ranges.
    List,
    /// Add a range and mark its weekdays in the calendar.
    Add {
        /// First day (YYYY-MM-DD).
        #[arg(long)]
        start: NaiveDate,
        /// Last day, inclusive (default: the first day).
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Free-text notes.
        #[arg(long, default_value = "")]
        notes: String,
    },
    /// Change a range and move its calendar days.
    Update {
        /// Range ID.
        id: Uuid,
        /// New first day.
        #[arg(long)]
        start: Option<NaiveDate>,
        /// New last day.
        #[arg(long)]
        end: Option<NaiveDate>,
        /// New notes.
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete a range and clear its calendar days.
    Delete {
        /// Range ID.
        id: Uuid,
    },
    /// Write the calendar days of a range again.
    Resync {
        /// Range ID.
        id: Uuid,
    },
}
