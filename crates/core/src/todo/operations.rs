use chrono::{DateTime, Utc};

use super::types::{NewTodo, Todo, TodoPriority, TodoStatus};
use super::TodoError;

/// Checks a payload before it is added.
pub fn validate_new_todo(todo: &NewTodo) -> Result<(), TodoError> {
    validate_title(&todo.title)
}

/// Checks an edited record before it is stored.
pub fn validate_todo(todo: &Todo) -> Result<(), TodoError> {
    validate_title(&todo.title)
}

fn validate_title(title: &str) -> Result<(), TodoError> {
    if title.trim().is_empty() {
        return Err(TodoError::EmptyTitle);
    }
    if title.len() > 200 {
        return Err(TodoError::TitleTooLong);
    }
    Ok(())
}

/// Applies an edit on top of the stored record.
///
/// The creation time always comes from `stored`; the update time is `now`.
pub fn apply_update(stored: &Todo, edited: Todo, now: DateTime<Utc>) -> Todo {
    Todo {
        created_at: stored.created_at,
        updated_at: now,
        ..edited
    }
}

pub fn by_status(todos: &[Todo], status: TodoStatus) -> Vec<&Todo> {
    todos.iter().filter(|todo| todo.status == status).collect()
}

pub fn by_priority(todos: &[Todo], priority: TodoPriority) -> Vec<&Todo> {
    todos.iter().filter(|todo| todo.priority == priority).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use uuid::Uuid;

    fn todo(title: &str, priority: TodoPriority, status: TodoStatus) -> Todo {
        let mut todo = NewTodo::new(title)
            .with_priority(priority)
            .into_todo(Uuid::new_v4(), Utc::now());
        todo.status = status;
        todo
    }

    #[test]
    fn test_empty_title_is_rejected() {
        assert_eq!(validate_new_todo(&NewTodo::new("   ")), Err(TodoError::EmptyTitle));
        assert_eq!(
            validate_new_todo(&NewTodo::new("x".repeat(201))),
            Err(TodoError::TitleTooLong)
        );
        assert!(validate_new_todo(&NewTodo::new("Timesheet")).is_ok());
    }

    #[test]
    fn test_apply_update_keeps_created_at() {
        let stored = todo("a", TodoPriority::Low, TodoStatus::Pending);
        let later = stored.created_at + Duration::minutes(5);
        let mut edited = stored.clone();
        edited.title = "b".to_string();
        edited.created_at = later + Duration::days(1);

        let updated = apply_update(&stored, edited, later);

        assert_eq!(updated.title, "b");
        assert_eq!(updated.created_at, stored.created_at);
        assert_eq!(updated.updated_at, later);
    }

    #[test]
    fn test_filters() {
        let todos = vec![
            todo("a", TodoPriority::High, TodoStatus::Done),
            todo("b", TodoPriority::Low, TodoStatus::Pending),
            todo("c", TodoPriority::High, TodoStatus::Pending),
        ];

        let titles = |list: Vec<&Todo>| list.iter().map(|t| t.title.clone()).collect::<Vec<_>>();
        assert_eq!(titles(by_status(&todos, TodoStatus::Pending)), vec!["b", "c"]);
        assert_eq!(titles(by_priority(&todos, TodoPriority::High)), vec!["a", "c"]);
    }
}
