//! Todo CRUD handlers.
//!
//! Thin dispatch: decode the request, stamp timestamps, call the usecase and
//! map the outcome to a status code. Malformed input never reaches the
//! repository.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use todolist_core::storage::RepositoryError;
use todolist_core::todo::{CreateTodoRequest, Todo, TodoId, UpdateTodoRequest};

use super::error::{ApiError, MessageBody};
use crate::state::AppState;

/// Query parameters for fetching a single todo.
#[derive(Debug, Deserialize)]
pub struct GetTodoQuery {
    pub id: TodoId,
}

/// Response body of a successful create.
#[derive(Debug, Serialize)]
pub struct CreatedBody {
    pub message: &'static str,
    pub id: TodoId,
}

fn invalid_parameters(rejection: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::InvalidParameters(rejection.to_string())
}

/// List all todos (GET /).
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.usecase.list_todos().await.map_err(ApiError::read)?;

    Ok(Json(todos))
}

/// Get a single todo by ID (GET /item?id=).
pub async fn get_todo(
    State(state): State<AppState>,
    query: Result<Query<GetTodoQuery>, QueryRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::read(invalid_parameters(e)))?;

    let todo = state
        .usecase
        .get_todo(query.id)
        .await
        .map_err(ApiError::read)?;

    Ok(Json(todo))
}

/// Create a new todo (POST /item).
pub async fn create_todo(
    State(state): State<AppState>,
    body: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<Json<CreatedBody>, ApiError> {
    let Json(payload) = body.map_err(|e| ApiError::write(invalid_parameters(e)))?;
    tracing::debug!(payload = ?payload, "Received create todo request");

    let todo = payload.into_todo(Utc::now());
    let id = state
        .usecase
        .create_todo(&todo)
        .await
        .map_err(ApiError::write)?;

    Ok(Json(CreatedBody {
        message: "todo item is created.",
        id,
    }))
}

/// Update an existing todo (PUT /item).
pub async fn update_todo(
    State(state): State<AppState>,
    body: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let Json(payload) = body.map_err(|e| ApiError::write(invalid_parameters(e)))?;
    tracing::debug!(payload = ?payload, "Received update todo request");

    let todo = payload.into_todo(Utc::now());
    let updated = state
        .usecase
        .update_todo(&todo)
        .await
        .map_err(ApiError::write)?;

    Ok(Json(updated))
}

/// Delete a todo by ID (DELETE /item/{id}).
pub async fn delete_todo(
    State(state): State<AppState>,
    id: Result<Path<TodoId>, PathRejection>,
) -> Result<Json<MessageBody>, ApiError> {
    let Path(id) = id.map_err(|e| ApiError::write(invalid_parameters(e)))?;

    state
        .usecase
        .delete_todo(id)
        .await
        .map_err(ApiError::write)?;

    Ok(MessageBody::new("todo item is deleted successfully."))
}

/// Fallback for unknown paths.
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, MessageBody::new("not found."))
}
