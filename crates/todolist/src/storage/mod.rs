//! Storage layer.
//!
//! [`StoreRepository`] implements the todo repository contract on top of an
//! [`ItemStore`]. Two stores are available and picked at startup:
//!
//! - [`DynamoDbStore`]: AWS DynamoDB via `aws-sdk-dynamodb`
//! - [`InMemoryStore`]: process-local maps, for tests and local runs

pub mod conversions;
pub mod dynamodb;
pub mod inmemory;
mod repository;
mod store;

pub use dynamodb::DynamoDbStore;
pub use inmemory::InMemoryStore;
pub use repository::StoreRepository;
pub use store::{Item, ItemStore, PutCondition};
