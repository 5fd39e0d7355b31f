//! DynamoDB storage backend implementation.
//!
//! This module provides the DynamoDB-backed [`ItemStore`](super::ItemStore)
//! using `aws-sdk-dynamodb`. Todos live in a single table keyed by the
//! numeric `id` attribute; listing goes through a secondary index whose
//! partition key is the `record_type` discriminator.

mod client;
mod error;
mod store;

pub use client::create_client;
pub use store::{build_update_expression, DynamoDbStore, UpdateExpression};
