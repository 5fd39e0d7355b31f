use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use todolist_core::storage::{
    public_message, repository_error_to_status_code, Access, RepositoryError,
};

/// JSON body carrying a human-readable message.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

impl MessageBody {
    pub fn new(message: &'static str) -> Json<Self> {
        Json(Self { message })
    }
}

/// Error returned by todo handlers.
///
/// Carries whether the request was a read or a write, since that decides the
/// status code of a missing todo. Clients only ever see the generic message.
#[derive(Debug)]
pub struct ApiError {
    pub error: RepositoryError,
    pub access: Access,
}

impl ApiError {
    pub fn read(error: RepositoryError) -> Self {
        Self {
            error,
            access: Access::Read,
        }
    }

    pub fn write(error: RepositoryError) -> Self {
        Self {
            error,
            access: Access::Write,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = repository_error_to_status_code(&self.error, self.access);
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self.error, "API error");
        } else {
            tracing::warn!(status = %status, error = %self.error, "API error");
        }

        (
            status,
            MessageBody::new(public_message(&self.error, self.access)),
        )
            .into_response()
    }
}
