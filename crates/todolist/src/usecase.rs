//! Todo usecase.
//!
//! Orchestration seam between the HTTP handlers and the repository. There
//! are no business rules yet, so every operation forwards to the repository
//! and returns its result unchanged.

use std::sync::Arc;

use todolist_core::storage::{Result, TodoRepository};
use todolist_core::todo::{Todo, TodoId};

/// Todo operations exposed to the HTTP layer.
#[derive(Clone)]
pub struct TodoUsecase {
    repo: Arc<dyn TodoRepository>,
}

impl TodoUsecase {
    /// Creates a usecase over the given repository.
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self { repo }
    }

    /// Lists every todo.
    pub async fn list_todos(&self) -> Result<Vec<Todo>> {
        self.repo.list_todos().await
    }

    /// Gets a todo by its ID.
    pub async fn get_todo(&self, id: TodoId) -> Result<Todo> {
        self.repo.get_todo(id).await
    }

    /// Creates a todo and returns its ID.
    pub async fn create_todo(&self, todo: &Todo) -> Result<TodoId> {
        self.repo.create_todo(todo).await
    }

    /// Overwrites an existing todo and returns it as stored.
    pub async fn update_todo(&self, todo: &Todo) -> Result<Todo> {
        self.repo.update_todo(todo).await
    }

    /// Deletes an existing todo.
    pub async fn delete_todo(&self, id: TodoId) -> Result<()> {
        self.repo.delete_todo(id).await
    }
}
