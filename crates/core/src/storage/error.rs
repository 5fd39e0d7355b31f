use thiserror::Error;

use crate::todo::TodoId;

/// Errors that can occur during repository operations.
///
/// `ConnectionFailed`, `QueryFailed` and `MalformedItem` together form the
/// store failure class: they are always reported to clients as a server-side
/// failure.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Todo not found: {id}")]
    NotFound { id: TodoId },
    #[error("Todo already exists: {id}")]
    AlreadyExists { id: TodoId },
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Malformed item: {0}")]
    MalformedItem(String),
}

impl RepositoryError {
    /// Returns true if the error came from the store transport or from
    /// decoding a stored item.
    pub fn is_store_error(&self) -> bool {
        matches!(
            self,
            RepositoryError::ConnectionFailed(_)
                | RepositoryError::QueryFailed(_)
                | RepositoryError::MalformedItem(_)
        )
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;
