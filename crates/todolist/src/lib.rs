//! Todo record service.
//!
//! HTTP handlers over a usecase over a repository. The repository persists
//! todos in DynamoDB, or in memory for local runs and tests.

pub mod app;
pub mod config;
pub mod handlers;
pub mod state;
pub mod storage;
pub mod usecase;
