use std::sync::Arc;

use chrono::Utc;
use tokio::sync::watch;
use uuid::Uuid;

use worktrack_core::storage::{Collection, StoreError, Todos};
use worktrack_core::todo::{validate_new_todo, NewTodo, Todo, TodoStatus};

use super::Optimistic;
use crate::commands::StoreApi;
use crate::error::Result;

/// The to-do list, newest additions first.
pub struct TodoState {
    api: StoreApi,
    todos: Optimistic<Vec<Todo>>,
}

impl TodoState {
    pub fn new(api: StoreApi) -> Self {
        Self {
            api,
            todos: Optimistic::default(),
        }
    }

    pub fn todos(&self) -> Arc<Vec<Todo>> {
        self.todos.current()
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Todo>>> {
        self.todos.subscribe()
    }

    pub async fn load_all(&mut self) -> Result<()> {
        let todos = self.api.get_todos().await?;
        tracing::debug!(todos = todos.len(), "Todos loaded");
        self.todos.replace(todos);
        Ok(())
    }

    /// Shows the new to-do at the top at once, then swaps in the stored one.
    pub async fn add(&mut self, todo: NewTodo) -> Result<Todo> {
        validate_new_todo(&todo)?;
        let placeholder = todo.clone().into_todo(Uuid::new_v4(), Utc::now());
        let temp_id = placeholder.id;
        let api = self.api.clone();

        self.todos
            .mutate_settle(
                "add_todo",
                |todos| todos.insert(0, placeholder),
                async move { api.add_todo(todo).await },
                |todos, stored| {
                    if let Some(slot) = todos.iter_mut().find(|t| t.id == temp_id) {
                        *slot = stored.clone();
                    }
                },
            )
            .await
    }

    pub async fn update(&mut self, todo: Todo) -> Result<Todo> {
        let shown = todo.clone();
        let api = self.api.clone();

        self.todos
            .mutate_settle(
                "update_todo",
                |todos| replace_todo(todos, shown),
                async move { api.update_todo(todo).await },
                |todos, stored| replace_todo(todos, stored.clone()),
            )
            .await
    }

    /// Moves a loaded to-do to `status`.
    pub async fn update_status(&mut self, id: Uuid, status: TodoStatus) -> Result<Todo> {
        let mut todo = self
            .todos
            .current()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(Todos::NAME, id))?;
        todo.status = status;
        self.update(todo).await
    }

    pub async fn delete(&mut self, id: Uuid) -> Result<()> {
        let api = self.api.clone();

        self.todos
            .mutate(
                "delete_todo",
                |todos| todos.retain(|t| t.id != id),
                async move { api.delete_todo(id).await },
            )
            .await
    }
}

fn replace_todo(todos: &mut [Todo], todo: Todo) {
    if let Some(slot) = todos.iter_mut().find(|t| t.id == todo.id) {
        *slot = todo;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::storage::RecordStore;
    use crate::test_support::FlakyBackend;
    use worktrack_core::todo::TodoError;

    async fn state_with(backend: &FlakyBackend) -> TodoState {
        let store = RecordStore::new(Arc::new(backend.clone()));
        store.init().await.unwrap();
        let mut state = TodoState::new(StoreApi::new(Arc::new(store)));
        state.load_all().await.unwrap();
        state
    }

    #[tokio::test]
    async fn test_add_prepends_stored_todo() {
        let backend = FlakyBackend::new();
        let mut state = state_with(&backend).await;

        let first = state.add(NewTodo::new("First")).await.unwrap();
        let second = state.add(NewTodo::new("Second")).await.unwrap();

        assert_eq!(*state.todos(), vec![second.clone(), first.clone()]);
        assert_eq!(state.api.get_todos().await.unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_invalid_todo_is_never_shown() {
        let backend = FlakyBackend::new();
        let mut state = state_with(&backend).await;
        let rx = state.subscribe();

        let result = state.add(NewTodo::new("")).await;

        assert_eq!(result, Err(Error::Todo(TodoError::EmptyTitle)));
        assert!(!rx.has_changed().unwrap());
        assert_eq!(backend.save_calls(), 0);
    }

    #[tokio::test]
    async fn test_failed_add_removes_placeholder() {
        let backend = FlakyBackend::new();
        let mut state = state_with(&backend).await;
        backend.fail_saves(true);

        let result = state.add(NewTodo::new("Call the office")).await;

        assert!(result.unwrap_err().is_write_failure());
        assert!(state.todos().is_empty());
    }

    #[tokio::test]
    async fn test_update_status_goes_through_update() {
        let backend = FlakyBackend::new();
        let mut state = state_with(&backend).await;
        let todo = state.add(NewTodo::new("Review")).await.unwrap();

        let updated = state
            .update_status(todo.id, TodoStatus::InProgress)
            .await
            .unwrap();

        assert_eq!(updated.status, TodoStatus::InProgress);
        assert_eq!(updated.created_at, todo.created_at);
        assert_eq!(*state.todos(), vec![updated]);
    }

    #[tokio::test]
    async fn test_failed_status_change_is_reverted() {
        let backend = FlakyBackend::new();
        let mut state = state_with(&backend).await;
        let todo = state.add(NewTodo::new("Review")).await.unwrap();
        backend.fail_saves(true);

        let result = state.update_status(todo.id, TodoStatus::Done).await;

        assert!(result.is_err());
        assert_eq!(*state.todos(), vec![todo]);
    }

    #[tokio::test]
    async fn test_delete() {
        let backend = FlakyBackend::new();
        let mut state = state_with(&backend).await;
        let todo = state.add(NewTodo::new("Review")).await.unwrap();

        state.delete(todo.id).await.unwrap();

        assert!(state.todos().is_empty());
        assert!(state.api.get_todos().await.unwrap().is_empty());
    }
}
