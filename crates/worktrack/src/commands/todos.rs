use chrono::Utc;
use uuid::Uuid;

use worktrack_core::storage::{Collection, StoreError, Todos};
use worktrack_core::todo::{apply_update, validate_new_todo, validate_todo, NewTodo, Todo};

use super::StoreApi;
use crate::error::Result;

impl StoreApi {
    pub async fn get_todos(&self) -> Result<Vec<Todo>> {
        Ok(self.store.get::<Todos>().await?)
    }

    /// Appends a to-do with a fresh id and both timestamps set to now.
    pub async fn add_todo(&self, todo: NewTodo) -> Result<Todo> {
        validate_new_todo(&todo)?;
        let todo = todo.into_todo(Uuid::new_v4(), Utc::now());
        let stored = todo.clone();
        self.store
            .update::<Todos, _>(|todos| {
                todos.push(todo);
                Ok(())
            })
            .await?;
        tracing::debug!(id = %stored.id, "Todo added");
        Ok(stored)
    }

    /// Replaces the to-do with the same id.
    ///
    /// The stored creation time is kept and the update time is set to now.
    pub async fn update_todo(&self, todo: Todo) -> Result<Todo> {
        validate_todo(&todo)?;
        let now = Utc::now();
        let updated = self
            .store
            .update::<Todos, _>(|todos| {
                let id = todo.id;
                let slot = todos
                    .iter_mut()
                    .find(|t| t.id == id)
                    .ok_or_else(|| StoreError::not_found(Todos::NAME, id))?;
                *slot = apply_update(slot, todo, now);
                Ok(slot.clone())
            })
            .await?;
        tracing::debug!(id = %updated.id, status = %updated.status, "Todo updated");
        Ok(updated)
    }

    /// Removes the to-do with `id`. Removing an unknown id succeeds.
    pub async fn delete_todo(&self, id: Uuid) -> Result<()> {
        self.store
            .update::<Todos, _>(|todos| {
                todos.retain(|t| t.id != id);
                Ok(())
            })
            .await?;
        tracing::debug!(%id, "Todo deleted");
        Ok(())
    }
}
