//! Pure functions for mapping repository errors to HTTP responses.
//!
//! The same domain error maps to different status codes depending on
//! whether the request reads or writes: a missing todo is a 404 when it is
//! fetched but a 400 when a write targets it.

use super::RepositoryError;

/// Whether the failing request was a read or a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
}

/// Maps a [`RepositoryError`] to an HTTP status code.
///
/// - `NotFound` -> 404 on reads, 400 on writes
/// - `AlreadyExists` -> 400 (Bad Request)
/// - `InvalidParameters` -> 400 (Bad Request)
/// - store failures -> 500 (Internal Server Error)
///
/// # Examples
///
/// ```
/// use todolist_core::storage::{repository_error_to_status_code, Access, RepositoryError};
///
/// let error = RepositoryError::NotFound { id: 1 };
/// assert_eq!(repository_error_to_status_code(&error, Access::Read), 404);
/// assert_eq!(repository_error_to_status_code(&error, Access::Write), 400);
/// ```
pub fn repository_error_to_status_code(error: &RepositoryError, access: Access) -> u16 {
    match (error, access) {
        (RepositoryError::NotFound { .. }, Access::Read) => 404,
        (RepositoryError::NotFound { .. }, Access::Write) => 400,
        (RepositoryError::AlreadyExists { .. }, _) => 400,
        (RepositoryError::InvalidParameters(_), _) => 400,
        (RepositoryError::ConnectionFailed(_), _) => 500,
        (RepositoryError::QueryFailed(_), _) => 500,
        (RepositoryError::MalformedItem(_), _) => 500,
    }
}

/// Returns the message shown to API clients for an error.
///
/// Store failures collapse to a generic message so that no backend detail
/// leaks out of the service.
pub fn public_message(error: &RepositoryError, access: Access) -> &'static str {
    match (error, access) {
        (RepositoryError::NotFound { .. }, _) => "todo item is not found.",
        (RepositoryError::AlreadyExists { .. }, _) => "todo item is already exists.",
        (RepositoryError::InvalidParameters(_), _) => "parameters is not valid.",
        (_, Access::Read) => "failed to fetch todo item.",
        (_, Access::Write) => "failed to write todo item.",
    }
}
