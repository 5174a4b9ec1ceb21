//! To-do CLI commands.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use uuid::Uuid;

use worktrack_core::todo::{TodoPriority, TodoStatus};

/// To-do commands.
#[derive(Debug, Parser)]
pub struct TodoCommand {
    #[command(subcommand)]
    pub action: TodoAction,
}

/// Available to-do actions.
#[derive(Debug, Subcommand)]
pub enum TodoAction {
    /// List to-dos.
    List {
        /// Only show this status: pending, in_progress or done.
        #[arg(long)]
        status: Option<TodoStatus>,
    },
    /// Add a to-do.
    Add {
        /// Title.
        title: String,
        /// Longer description.
        #[arg(long, default_value = "")]
        description: String,
        /// Priority: low, medium or high.
        #[arg(long, default_value = "medium")]
        priority: TodoPriority,
        /// Due date (YYYY-MM-DD).
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// Change the status of a to-do.
    Status {
        /// To-do ID.
        id: Uuid,
        /// New status: pending, in_progress or done.
        status: TodoStatus,
    },
    /// Delete a to-do.
    Delete {
        /// To-do ID.
        id: Uuid,
    },
}
