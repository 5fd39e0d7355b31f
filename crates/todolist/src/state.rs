//! Shared application state.
//!
//! Built once at process start and cloned into every request handler. The
//! only thing shared across requests is the usecase and, behind it, the
//! immutable store client configuration.

use std::sync::Arc;

use todolist_core::storage::TodoRepository;

use crate::storage::{InMemoryStore, StoreRepository};
use crate::usecase::TodoUsecase;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub usecase: TodoUsecase,
}

impl AppState {
    /// Creates a new AppState serving the given repository.
    pub fn new(repo: Arc<dyn TodoRepository>) -> Self {
        Self {
            usecase: TodoUsecase::new(repo),
        }
    }

    /// Creates an AppState backed by an empty in-memory store.
    pub fn in_memory(page_size: usize) -> Self {
        Self::new(Arc::new(StoreRepository::new(InMemoryStore::with_page_size(
            page_size,
        ))))
    }
}
