//! Todo repository built on an [`ItemStore`].
//!
//! Implements `TodoRepository` from `todolist_core::storage` for any store
//! backend. The repository is the only writer of storage items and owns the
//! existence rules: create needs a free key, update and delete need an
//! occupied one.

use async_trait::async_trait;
use futures_util::TryStreamExt;

use todolist_core::storage::{RepositoryError, Result, TodoRepository};
use todolist_core::todo::{Todo, TodoId};

use super::conversions::{item_to_todo, todo_to_item, update_attributes, RECORD_TYPE_VALUE};
use super::store::{ItemStore, PutCondition};

/// Repository translating todo operations into store calls.
#[derive(Debug, Clone)]
pub struct StoreRepository<S> {
    store: S,
}

impl<S: ItemStore> StoreRepository<S> {
    /// Creates a new repository over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Get the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[async_trait]
impl<S: ItemStore> TodoRepository for StoreRepository<S> {
    async fn list_todos(&self) -> Result<Vec<Todo>> {
        let mut items = self.store.query_by_discriminator(RECORD_TYPE_VALUE);
        let mut todos = Vec::new();

        while let Some(item) = items.try_next().await.inspect_err(|e| {
            tracing::error!(error = %e, "Couldn't query todos");
        })? {
            todos.push(item_to_todo(&item).inspect_err(|e| {
                tracing::error!(error = %e, "Couldn't decode listed todo");
            })?);
        }

        tracing::debug!(count = todos.len(), "Listed todos");
        Ok(todos)
    }

    async fn get_todo(&self, id: TodoId) -> Result<Todo> {
        let item = self.store.get_by_key(id).await.inspect_err(|e| {
            if !matches!(e, RepositoryError::NotFound { .. }) {
                tracing::error!(todo_id = id, error = %e, "Couldn't get todo");
            }
        })?;

        item_to_todo(&item)
    }

    async fn create_todo(&self, todo: &Todo) -> Result<TodoId> {
        // The key must be free before the write.
        match self.store.get_by_key(todo.id).await {
            Ok(_) => return Err(RepositoryError::AlreadyExists { id: todo.id }),
            Err(RepositoryError::NotFound { .. }) => {}
            Err(err) => {
                tracing::error!(todo_id = todo.id, error = %err, "Couldn't get todo");
                return Err(err);
            }
        }

        // A concurrent create that slips past the check above still loses
        // on the conditional write.
        self.store
            .put_item(todo_to_item(todo), PutCondition::KeyAbsent)
            .await
            .inspect_err(|e| {
                if !matches!(e, RepositoryError::AlreadyExists { .. }) {
                    tracing::error!(todo_id = todo.id, error = %e, "Couldn't add todo");
                }
            })?;

        tracing::info!(todo_id = todo.id, name = %todo.name, "Created todo");
        Ok(todo.id)
    }

    async fn update_todo(&self, todo: &Todo) -> Result<Todo> {
        let current = self.store.get_by_key(todo.id).await.inspect_err(|e| {
            if !matches!(e, RepositoryError::NotFound { .. }) {
                tracing::error!(todo_id = todo.id, error = %e, "Couldn't get todo");
            }
        })?;

        let attributes = update_attributes(todo, &current)?;
        let updated = self
            .store
            .update_attributes(todo.id, attributes)
            .await
            .inspect_err(|e| {
                tracing::error!(todo_id = todo.id, error = %e, "Couldn't update todo");
            })?;

        tracing::info!(todo_id = todo.id, "Updated todo");
        item_to_todo(&updated)
    }

    async fn delete_todo(&self, id: TodoId) -> Result<()> {
        self.store.get_by_key(id).await.inspect_err(|e| {
            if !matches!(e, RepositoryError::NotFound { .. }) {
                tracing::error!(todo_id = id, error = %e, "Couldn't get todo");
            }
        })?;

        self.store.delete_by_key(id).await.inspect_err(|e| {
            tracing::error!(todo_id = id, error = %e, "Couldn't delete todo");
        })?;

        tracing::info!(todo_id = id, "Deleted todo");
        Ok(())
    }
}
