//! In-memory storage backend.
//!
//! This module provides an in-memory [`ItemStore`](super::ItemStore) that keeps
//! items in a `BTreeMap` wrapped in `Arc<RwLock<_>>`. It mirrors the DynamoDB
//! semantics closely enough to back the repository tests and to run the
//! server without AWS access.
//!
//! # Example
//!
//! ```rust,ignore
//! use todolist::storage::{InMemoryStore, StoreRepository};
//!
//! let repo = StoreRepository::new(InMemoryStore::with_page_size(2));
//! ```

mod store;

pub use store::{InMemoryStore, DEFAULT_PAGE_SIZE};
