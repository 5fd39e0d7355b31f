//! Store client contract.
//!
//! An [`ItemStore`] moves raw attribute maps to and from the backing store.
//! It never interprets item contents beyond the primary key; decoding is the
//! job of the conversions module and the invariants live in the repository.

use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use futures_util::stream::BoxStream;

use todolist_core::storage::Result;
use todolist_core::todo::TodoId;

/// A raw storage item: attribute name to attribute value.
pub type Item = HashMap<String, AttributeValue>;

/// Write condition applied by [`ItemStore::put_item`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PutCondition {
    /// Overwrite whatever is stored under the key.
    Always,
    /// Fail with `AlreadyExists` if the key is already occupied.
    KeyAbsent,
}

/// Narrow set of store operations the repository is built on.
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Point lookup by primary key. An empty result is `NotFound`.
    async fn get_by_key(&self, id: TodoId) -> Result<Item>;

    /// Writes a full item.
    async fn put_item(&self, item: Item, condition: PutCondition) -> Result<()>;

    /// Streams every item whose discriminator equals `value`.
    ///
    /// The stream is lazy and walks all pages of the secondary index; callers
    /// never see page boundaries. Each call starts a fresh traversal.
    fn query_by_discriminator(&self, value: &str) -> BoxStream<'_, Result<Item>>;

    /// Overwrites only the named attributes of an existing item and returns
    /// the item as stored after the update. Fails with `NotFound` if the key
    /// is absent.
    async fn update_attributes(&self, id: TodoId, attributes: Item) -> Result<Item>;

    /// Removes the item stored under the key, if any.
    async fn delete_by_key(&self, id: TodoId) -> Result<()>;
}
