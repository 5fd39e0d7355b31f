use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::{delete, get},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        health::livez,
        todos::{create_todo, delete_todo, get_todo, list_todos, not_found, update_todo},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
///
/// Requests running longer than `request_timeout` are answered with 408 and
/// their handler future is dropped, which cancels any store call in flight.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(list_todos))
        .route(
            "/item",
            get(get_todo).post(create_todo).put(update_todo),
        )
        .route("/item/{id}", delete(delete_todo))
        .route("/livez", get(livez))
        .fallback(not_found)
        .method_not_allowed_fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}
