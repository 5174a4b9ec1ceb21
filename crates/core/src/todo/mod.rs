mod operations;
mod types;

use thiserror::Error;

pub use operations::{apply_update, by_priority, by_status, validate_new_todo, validate_todo};
pub use types::{NewTodo, Todo, TodoPriority, TodoStatus};

/// Errors that can occur when validating or parsing to-do values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TodoError {
    #[error("Todo title cannot be empty")]
    EmptyTitle,
    #[error("Todo title cannot exceed 200 characters")]
    TitleTooLong,
    #[error("Unknown priority: {0}")]
    UnknownPriority(String),
    #[error("Unknown status: {0}")]
    UnknownStatus(String),
}
