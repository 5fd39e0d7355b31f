//! API request types for todo operations.
//!
//! Pure data types decoded from request bodies. The caller owns the clock:
//! timestamps are passed in rather than read here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::types::{Todo, TodoId};

/// Request payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    pub id: TodoId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl CreateTodoRequest {
    /// Convert into a Todo whose created and updated timestamps are `now`.
    pub fn into_todo(self, now: DateTime<Utc>) -> Todo {
        Todo::new(self.id, self.name, now)
            .with_description(self.description)
            .with_completed(self.completed)
    }
}

/// Request payload for updating an existing todo.
///
/// Every mutable field is overwritten; the stored creation time is kept.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    pub id: TodoId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
}

impl UpdateTodoRequest {
    /// Convert into a Todo carrying `now` as its update time.
    ///
    /// `created_at` is also set to `now`, but the repository never writes it
    /// on update.
    pub fn into_todo(self, now: DateTime<Utc>) -> Todo {
        Todo::new(self.id, self.name, now)
            .with_description(self.description)
            .with_completed(self.completed)
    }
}
