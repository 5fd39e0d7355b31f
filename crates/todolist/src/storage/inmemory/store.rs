//! In-memory item store implementation.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use async_stream::stream;
use async_trait::async_trait;
use futures_util::stream::BoxStream;
use tokio::sync::RwLock;

use todolist_core::storage::{RepositoryError, Result};
use todolist_core::todo::TodoId;

use crate::storage::conversions::{item_id, ID_KEY, RECORD_TYPE_KEY};
use crate::storage::store::{Item, ItemStore, PutCondition};

/// Number of items returned per index page when none is configured.
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// In-memory item store.
///
/// Items are kept in key order. Index queries are served page by page, each
/// page starting after the last key of the previous one, so writes that land
/// between pages are observed the way a paginated DynamoDB query would.
#[derive(Debug, Clone)]
pub struct InMemoryStore {
    items: Arc<RwLock<BTreeMap<TodoId, Item>>>,
    page_size: usize,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// Creates a new empty store with the default page size.
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Creates a new empty store serving index pages of `page_size` items.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            items: Arc::new(RwLock::new(BTreeMap::new())),
            page_size: page_size.max(1),
        }
    }

    /// Number of items stored, listed or not.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Returns true if nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

fn has_discriminator(item: &Item, value: &str) -> bool {
    item.get(RECORD_TYPE_KEY)
        .and_then(|v| v.as_s().ok())
        .is_some_and(|s| s == value)
}

#[async_trait]
impl ItemStore for InMemoryStore {
    async fn get_by_key(&self, id: TodoId) -> Result<Item> {
        let items = self.items.read().await;
        items
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound { id })
    }

    async fn put_item(&self, item: Item, condition: PutCondition) -> Result<()> {
        let id = item_id(&item)
            .map_err(|_| RepositoryError::QueryFailed("Missing key attribute: id".to_string()))?;

        let mut items = self.items.write().await;
        if condition == PutCondition::KeyAbsent && items.contains_key(&id) {
            return Err(RepositoryError::AlreadyExists { id });
        }
        items.insert(id, item);
        Ok(())
    }

    fn query_by_discriminator(&self, value: &str) -> BoxStream<'_, Result<Item>> {
        let items = Arc::clone(&self.items);
        let value = value.to_string();
        let page_size = self.page_size;

        Box::pin(stream! {
            let mut last_key: Option<TodoId> = None;
            loop {
                let page: Vec<(TodoId, Item)> = {
                    let items = items.read().await;
                    let start = last_key.map_or(Bound::Unbounded, Bound::Excluded);
                    items
                        .range((start, Bound::Unbounded))
                        .filter(|(_, item)| has_discriminator(item, &value))
                        .take(page_size)
                        .map(|(id, item)| (*id, item.clone()))
                        .collect()
                };

                let full_page = page.len() == page_size;
                last_key = page.last().map(|(id, _)| *id);

                for (_, item) in page {
                    yield Ok(item);
                }

                if !full_page {
                    break;
                }
            }
        })
    }

    async fn update_attributes(&self, id: TodoId, attributes: Item) -> Result<Item> {
        let mut items = self.items.write().await;
        let item = items
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound { id })?;

        for (key, value) in attributes {
            if key != ID_KEY {
                item.insert(key, value);
            }
        }

        Ok(item.clone())
    }

    async fn delete_by_key(&self, id: TodoId) -> Result<()> {
        self.items.write().await.remove(&id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_sdk_dynamodb::types::AttributeValue;
    use futures_util::TryStreamExt;

    use crate::storage::conversions::{id_value, RECORD_TYPE_VALUE};

    fn item(id: TodoId, record_type: Option<&str>) -> Item {
        let mut item = Item::new();
        item.insert(ID_KEY.to_string(), id_value(id));
        item.insert("name".to_string(), AttributeValue::S(format!("todo {id}")));
        if let Some(record_type) = record_type {
            item.insert(
                RECORD_TYPE_KEY.to_string(),
                AttributeValue::S(record_type.to_string()),
            );
        }
        item
    }

    async fn ids(store: &InMemoryStore) -> Vec<TodoId> {
        store
            .query_by_discriminator(RECORD_TYPE_VALUE)
            .try_collect::<Vec<_>>()
            .await
            .unwrap()
            .iter()
            .map(|item| item_id(item).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_get_missing_key_is_not_found() {
        let store = InMemoryStore::new();

        assert_eq!(
            store.get_by_key(9).await,
            Err(RepositoryError::NotFound { id: 9 })
        );
    }

    #[tokio::test]
    async fn test_put_key_absent_refuses_occupied_key() {
        let store = InMemoryStore::new();
        store
            .put_item(item(1, Some("todo")), PutCondition::KeyAbsent)
            .await
            .unwrap();

        let result = store
            .put_item(item(1, Some("todo")), PutCondition::KeyAbsent)
            .await;

        assert_eq!(result, Err(RepositoryError::AlreadyExists { id: 1 }));
    }

    #[tokio::test]
    async fn test_put_always_overwrites() {
        let store = InMemoryStore::new();
        store
            .put_item(item(1, Some("todo")), PutCondition::Always)
            .await
            .unwrap();
        store
            .put_item(item(1, None), PutCondition::Always)
            .await
            .unwrap();

        let stored = store.get_by_key(1).await.unwrap();
        assert!(!stored.contains_key(RECORD_TYPE_KEY));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_put_without_key_fails() {
        let store = InMemoryStore::new();
        let mut keyless = item(1, Some("todo"));
        keyless.remove(ID_KEY);

        let result = store.put_item(keyless, PutCondition::Always).await;

        assert!(matches!(result, Err(RepositoryError::QueryFailed(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_query_walks_every_page() {
        for page_size in [1, 2, 3, 100] {
            let store = InMemoryStore::with_page_size(page_size);
            for id in 1..=5 {
                store
                    .put_item(item(id, Some("todo")), PutCondition::Always)
                    .await
                    .unwrap();
            }

            assert_eq!(ids(&store).await, vec![1, 2, 3, 4, 5], "page size {page_size}");
        }
    }

    #[tokio::test]
    async fn test_query_skips_items_without_matching_discriminator() {
        let store = InMemoryStore::with_page_size(1);
        store
            .put_item(item(1, Some("todo")), PutCondition::Always)
            .await
            .unwrap();
        store
            .put_item(item(2, None), PutCondition::Always)
            .await
            .unwrap();
        store
            .put_item(item(3, Some("note")), PutCondition::Always)
            .await
            .unwrap();
        store
            .put_item(item(4, Some("todo")), PutCondition::Always)
            .await
            .unwrap();

        assert_eq!(ids(&store).await, vec![1, 4]);
    }

    #[tokio::test]
    async fn test_query_on_empty_store_yields_nothing() {
        let store = InMemoryStore::new();
        assert!(ids(&store).await.is_empty());
    }

    #[tokio::test]
    async fn test_update_overwrites_named_attributes_only() {
        let store = InMemoryStore::new();
        store
            .put_item(item(1, Some("todo")), PutCondition::Always)
            .await
            .unwrap();

        let mut attributes = Item::new();
        attributes.insert("name".to_string(), AttributeValue::S("renamed".to_string()));
        attributes.insert(ID_KEY.to_string(), id_value(99));

        let updated = store.update_attributes(1, attributes).await.unwrap();

        assert_eq!(updated.get("name").unwrap().as_s().unwrap(), "renamed");
        assert_eq!(updated.get(ID_KEY).unwrap().as_n().unwrap(), "1");
        assert_eq!(
            updated.get(RECORD_TYPE_KEY).unwrap().as_s().unwrap(),
            "todo"
        );
    }

    #[tokio::test]
    async fn test_update_missing_key_is_not_found() {
        let store = InMemoryStore::new();

        let result = store.update_attributes(5, Item::new()).await;

        assert_eq!(result, Err(RepositoryError::NotFound { id: 5 }));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_delete_is_unconditional() {
        let store = InMemoryStore::new();
        store
            .put_item(item(1, Some("todo")), PutCondition::Always)
            .await
            .unwrap();

        store.delete_by_key(1).await.unwrap();
        store.delete_by_key(1).await.unwrap();

        assert!(store.is_empty().await);
    }
}
