//! DynamoDB item store implementation.

use std::collections::HashMap;

use async_stream::stream;
use async_trait::async_trait;
use aws_sdk_dynamodb::operation::get_item::builders::GetItemFluentBuilder;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use futures_util::stream::BoxStream;

use todolist_core::storage::{RepositoryError, Result};
use todolist_core::todo::TodoId;

use super::client::create_client;
use super::error::{
    map_delete_item_error, map_get_item_error, map_put_item_error, map_query_error,
    map_update_item_error,
};
use crate::config::DynamoDbConfig;
use crate::storage::conversions::{id_value, item_id, ID_KEY, RECORD_TYPE_KEY};
use crate::storage::store::{Item, ItemStore, PutCondition};

/// DynamoDB-based item store.
///
/// Holds the client and the table/index names, all fixed at process start.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
    index_name: String,
    page_size: Option<i32>,
}

impl DynamoDbStore {
    /// Creates a new store with the given client, table and index names.
    pub fn new(client: Client, table_name: impl Into<String>, index_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            index_name: index_name.into(),
            page_size: None,
        }
    }

    /// Creates a store from configuration, building the SDK client.
    pub async fn connect(config: &DynamoDbConfig) -> Self {
        let client = create_client(config).await;
        Self::new(client, &config.table_name, &config.query_index_name)
    }

    /// Limits the number of items requested per index page.
    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size.map(|n| i32::try_from(n).unwrap_or(i32::MAX));
        self
    }

    /// GetItem request for a single key.
    ///
    /// Reads are strongly consistent so a write acknowledged by the table is
    /// visible to the existence checks that follow it.
    fn get_item_request(&self, id: TodoId) -> GetItemFluentBuilder {
        self.client
            .get_item()
            .table_name(&self.table_name)
            .key(ID_KEY, id_value(id))
            .consistent_read(true)
    }
}

/// An absent or empty GetItem result means the key is not stored.
fn found_item(item: Option<Item>, id: TodoId) -> Result<Item> {
    match item {
        Some(item) if !item.is_empty() => Ok(item),
        _ => Err(RepositoryError::NotFound { id }),
    }
}

/// A `SET` update expression with its placeholder maps.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateExpression {
    pub expression: String,
    pub names: HashMap<String, String>,
    pub values: HashMap<String, AttributeValue>,
}

/// Build a `SET` expression overwriting every attribute in `attributes`.
///
/// Attribute names go through `#` placeholders so reserved words such as
/// `name` are accepted. Placeholders are numbered in attribute-name order.
/// The key attribute is skipped since DynamoDB rejects updates to it.
pub fn build_update_expression(attributes: Item) -> UpdateExpression {
    let mut attributes: Vec<(String, AttributeValue)> = attributes
        .into_iter()
        .filter(|(name, _)| name != ID_KEY)
        .collect();
    attributes.sort_by(|a, b| a.0.cmp(&b.0));

    let mut assignments = Vec::with_capacity(attributes.len());
    let mut names = HashMap::new();
    let mut values = HashMap::new();

    for (index, (name, value)) in attributes.into_iter().enumerate() {
        let name_placeholder = format!("#a{index}");
        let value_placeholder = format!(":v{index}");
        assignments.push(format!("{name_placeholder} = {value_placeholder}"));
        names.insert(name_placeholder, name);
        values.insert(value_placeholder, value);
    }

    UpdateExpression {
        expression: format!("SET {}", assignments.join(", ")),
        names,
        values,
    }
}

#[async_trait]
impl ItemStore for DynamoDbStore {
    async fn get_by_key(&self, id: TodoId) -> Result<Item> {
        let result = self
            .get_item_request(id)
            .send()
            .await
            .map_err(map_get_item_error)?;

        found_item(result.item, id)
    }

    async fn put_item(&self, item: Item, condition: PutCondition) -> Result<()> {
        let id = item_id(&item)?;

        let mut request = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item));
        if condition == PutCondition::KeyAbsent {
            request = request
                .condition_expression("attribute_not_exists(#id)")
                .expression_attribute_names("#id", ID_KEY);
        }

        request
            .send()
            .await
            .map_err(|e| map_put_item_error(e, id))?;

        Ok(())
    }

    fn query_by_discriminator(&self, value: &str) -> BoxStream<'_, Result<Item>> {
        let mut paginator = self
            .client
            .query()
            .table_name(&self.table_name)
            .index_name(&self.index_name)
            .key_condition_expression("#rt = :rt")
            .expression_attribute_names("#rt", RECORD_TYPE_KEY)
            .expression_attribute_values(":rt", AttributeValue::S(value.to_string()))
            .into_paginator();
        if let Some(page_size) = self.page_size {
            paginator = paginator.page_size(page_size);
        }
        let mut pages = paginator.send();

        Box::pin(stream! {
            while let Some(page) = pages.next().await {
                match page {
                    Ok(page) => {
                        for item in page.items.unwrap_or_default() {
                            yield Ok(item);
                        }
                    }
                    Err(err) => {
                        yield Err(map_query_error(err));
                        break;
                    }
                }
            }
        })
    }

    async fn update_attributes(&self, id: TodoId, attributes: Item) -> Result<Item> {
        let UpdateExpression {
            expression,
            mut names,
            values,
        } = build_update_expression(attributes);
        names.insert("#id".to_string(), ID_KEY.to_string());

        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(ID_KEY, id_value(id))
            .update_expression(expression)
            .condition_expression("attribute_exists(#id)")
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .return_values(ReturnValue::AllNew)
            .send()
            .await
            .map_err(|e| map_update_item_error(e, id))?;

        result.attributes.ok_or_else(|| {
            RepositoryError::MalformedItem("UpdateItem returned no attributes".to_string())
        })
    }

    async fn delete_by_key(&self, id: TodoId) -> Result<()> {
        self.client
            .delete_item()
            .table_name(&self.table_name)
            .key(ID_KEY, id_value(id))
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::config::{BehaviorVersion, Region};

    use super::*;

    fn offline_store() -> DynamoDbStore {
        let config = aws_sdk_dynamodb::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new("ap-northeast-1"))
            .build();
        DynamoDbStore::new(Client::from_conf(config), "todos", "record_type-index")
    }

    #[tokio::test]
    async fn test_get_item_request_reads_consistently() {
        let store = offline_store();

        let request = store.get_item_request(42);

        assert_eq!(request.get_consistent_read(), &Some(true));
        assert_eq!(request.get_table_name().as_deref(), Some("todos"));
        assert_eq!(
            request.get_key().as_ref().and_then(|key| key.get(ID_KEY)),
            Some(&id_value(42))
        );
    }

    #[test]
    fn test_absent_or_empty_item_is_not_found() {
        assert_eq!(found_item(None, 3), Err(RepositoryError::NotFound { id: 3 }));
        assert_eq!(
            found_item(Some(Item::new()), 3),
            Err(RepositoryError::NotFound { id: 3 })
        );

        let mut item = Item::new();
        item.insert(ID_KEY.to_string(), id_value(3));
        assert_eq!(found_item(Some(item.clone()), 3), Ok(item));
    }

    fn attribute(s: &str) -> AttributeValue {
        AttributeValue::S(s.to_string())
    }

    #[test]
    fn test_update_expression_assigns_every_attribute() {
        let mut attributes = Item::new();
        attributes.insert("name".to_string(), attribute("buy milk"));
        attributes.insert("completed".to_string(), AttributeValue::Bool(true));

        let update = build_update_expression(attributes);

        assert_eq!(update.expression, "SET #a0 = :v0, #a1 = :v1");
        assert_eq!(update.names.get("#a0").unwrap(), "completed");
        assert_eq!(update.names.get("#a1").unwrap(), "name");
        assert_eq!(update.values.get(":v0").unwrap(), &AttributeValue::Bool(true));
        assert_eq!(update.values.get(":v1").unwrap(), &attribute("buy milk"));
    }

    #[test]
    fn test_update_expression_skips_key_attribute() {
        let mut attributes = Item::new();
        attributes.insert(ID_KEY.to_string(), id_value(1));
        attributes.insert("name".to_string(), attribute("buy milk"));

        let update = build_update_expression(attributes);

        assert_eq!(update.expression, "SET #a0 = :v0");
        assert_eq!(update.names.len(), 1);
        assert!(!update.names.values().any(|name| name == ID_KEY));
    }
}
