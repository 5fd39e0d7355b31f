use async_trait::async_trait;

use crate::todo::{Todo, TodoId};

use super::Result;

/// Repository for todo operations.
///
/// Dropping a returned future cancels the operation together with any store
/// request it has in flight.
#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Lists every stored todo, in the order the store returns them.
    async fn list_todos(&self) -> Result<Vec<Todo>>;

    /// Gets a todo by its ID.
    async fn get_todo(&self, id: TodoId) -> Result<Todo>;

    /// Creates a new todo and returns its ID. Fails if the ID is taken.
    async fn create_todo(&self, todo: &Todo) -> Result<TodoId>;

    /// Overwrites the mutable fields of an existing todo.
    async fn update_todo(&self, todo: &Todo) -> Result<Todo>;

    /// Deletes an existing todo.
    async fn delete_todo(&self, id: TodoId) -> Result<()>;
}
