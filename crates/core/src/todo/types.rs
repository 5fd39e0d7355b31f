use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Caller-supplied primary key of a todo.
pub type TodoId = u64;

/// A single todo record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub name: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Creates an open todo stamped with `now` for both timestamps.
    pub fn new(id: TodoId, name: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            description: String::new(),
            completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the description for this todo.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the completed flag for this todo.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}
