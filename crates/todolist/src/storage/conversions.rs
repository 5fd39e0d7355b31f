//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between attribute maps and [`Todo`].
//! These are testable in isolation without DynamoDB access.

use aws_sdk_dynamodb::types::AttributeValue;
use chrono::{DateTime, Utc};
use todolist_core::storage::{RepositoryError, Result};
use todolist_core::todo::{Todo, TodoId};

use super::store::Item;

// ============================================================================
// Attribute names
// ============================================================================

pub const ID_KEY: &str = "id";
pub const NAME_KEY: &str = "name";
pub const DESCRIPTION_KEY: &str = "description";
pub const COMPLETED_KEY: &str = "completed";
pub const CREATED_AT_KEY: &str = "created_at";
pub const UPDATED_AT_KEY: &str = "updated_at";

/// Discriminator attribute, the partition key of the listing index.
pub const RECORD_TYPE_KEY: &str = "record_type";
/// Discriminator value stamped on every todo item.
pub const RECORD_TYPE_VALUE: &str = "todo";

// ============================================================================
// Todo conversions
// ============================================================================

/// Convert a Todo to a storage item, stamping the discriminator.
pub fn todo_to_item(todo: &Todo) -> Item {
    let mut item = Item::new();

    item.insert(ID_KEY.to_string(), id_value(todo.id));
    item.insert(
        RECORD_TYPE_KEY.to_string(),
        AttributeValue::S(RECORD_TYPE_VALUE.to_string()),
    );

    item.insert(NAME_KEY.to_string(), AttributeValue::S(todo.name.clone()));
    item.insert(
        DESCRIPTION_KEY.to_string(),
        AttributeValue::S(todo.description.clone()),
    );
    item.insert(
        COMPLETED_KEY.to_string(),
        AttributeValue::Bool(todo.completed),
    );
    item.insert(
        CREATED_AT_KEY.to_string(),
        timestamp_value(&todo.created_at),
    );
    item.insert(
        UPDATED_AT_KEY.to_string(),
        timestamp_value(&todo.updated_at),
    );

    item
}

/// Convert a storage item to a Todo. The discriminator is dropped.
pub fn item_to_todo(item: &Item) -> Result<Todo> {
    Ok(Todo {
        id: get_id(item, ID_KEY)?,
        name: get_string(item, NAME_KEY)?,
        description: get_string(item, DESCRIPTION_KEY)?,
        completed: get_bool(item, COMPLETED_KEY)?,
        created_at: get_datetime(item, CREATED_AT_KEY)?,
        updated_at: get_datetime(item, UPDATED_AT_KEY)?,
    })
}

/// Build the attribute set written when `todo` replaces the stored `current`
/// item.
///
/// Name, description, completed and updated-at come from `todo`. Created-at
/// and the discriminator are re-asserted from `current`, so an update can
/// never rewrite them. The key attribute is not part of the set.
pub fn update_attributes(todo: &Todo, current: &Item) -> Result<Item> {
    let created_at = get_datetime(current, CREATED_AT_KEY)?;

    let mut attributes = Item::new();
    attributes.insert(NAME_KEY.to_string(), AttributeValue::S(todo.name.clone()));
    attributes.insert(
        DESCRIPTION_KEY.to_string(),
        AttributeValue::S(todo.description.clone()),
    );
    attributes.insert(
        COMPLETED_KEY.to_string(),
        AttributeValue::Bool(todo.completed),
    );
    attributes.insert(
        UPDATED_AT_KEY.to_string(),
        timestamp_value(&todo.updated_at),
    );
    attributes.insert(CREATED_AT_KEY.to_string(), timestamp_value(&created_at));

    // Items written without a discriminator stay unlisted after an update.
    if let Some(record_type) = current.get(RECORD_TYPE_KEY) {
        attributes.insert(RECORD_TYPE_KEY.to_string(), record_type.clone());
    }

    Ok(attributes)
}

/// Attribute value of a todo primary key.
pub fn id_value(id: TodoId) -> AttributeValue {
    AttributeValue::N(id.to_string())
}

/// Read the primary key of an item.
pub fn item_id(item: &Item) -> Result<TodoId> {
    get_id(item, ID_KEY)
}

fn timestamp_value(timestamp: &DateTime<Utc>) -> AttributeValue {
    AttributeValue::S(timestamp.to_rfc3339())
}

// ============================================================================
// Helper functions
// ============================================================================

fn missing(key: &str) -> RepositoryError {
    RepositoryError::MalformedItem(format!("Missing or invalid field: {}", key))
}

/// Get a required string attribute.
fn get_string(item: &Item, key: &str) -> Result<String> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| missing(key))
}

/// Get a required boolean attribute.
fn get_bool(item: &Item, key: &str) -> Result<bool> {
    item.get(key)
        .and_then(|v| v.as_bool().ok())
        .copied()
        .ok_or_else(|| missing(key))
}

/// Get a required unsigned numeric attribute.
fn get_id(item: &Item, key: &str) -> Result<TodoId> {
    let n = item
        .get(key)
        .and_then(|v| v.as_n().ok())
        .ok_or_else(|| missing(key))?;
    n.parse()
        .map_err(|e| RepositoryError::MalformedItem(format!("Invalid number {}: {}", key, e)))
}

/// Get a required datetime attribute (RFC 3339 format).
fn get_datetime(item: &Item, key: &str) -> Result<DateTime<Utc>> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::MalformedItem(format!("Invalid datetime {}: {}", key, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn sample_todo() -> Todo {
        Todo {
            id: 1,
            name: "buy milk".to_string(),
            description: "2 liters".to_string(),
            completed: false,
            created_at: at("2024-01-15T10:30:00Z"),
            updated_at: at("2024-01-16T08:00:00.250Z"),
        }
    }

    #[test]
    fn test_todo_round_trip() {
        let todo = sample_todo();
        let item = todo_to_item(&todo);
        let parsed = item_to_todo(&item).unwrap();

        assert_eq!(todo, parsed);
    }

    #[test]
    fn test_todo_item_has_expected_attributes() {
        let item = todo_to_item(&sample_todo());

        assert_eq!(item.get("id").unwrap().as_n().unwrap(), "1");
        assert_eq!(item.get("name").unwrap().as_s().unwrap(), "buy milk");
        assert_eq!(item.get("completed").unwrap().as_bool().unwrap(), &false);
        assert_eq!(item.get("record_type").unwrap().as_s().unwrap(), "todo");
        assert_eq!(item.len(), 7);
    }

    #[test]
    fn test_item_without_discriminator_still_decodes() {
        let mut item = todo_to_item(&sample_todo());
        item.remove(RECORD_TYPE_KEY);

        assert_eq!(item_to_todo(&item).unwrap(), sample_todo());
    }

    #[test]
    fn test_missing_field_is_malformed() {
        let mut item = todo_to_item(&sample_todo());
        item.remove(NAME_KEY);

        assert_eq!(
            item_to_todo(&item),
            Err(RepositoryError::MalformedItem(
                "Missing or invalid field: name".to_string()
            ))
        );
    }

    #[test]
    fn test_wrongly_typed_field_is_malformed() {
        let mut item = todo_to_item(&sample_todo());
        item.insert(
            COMPLETED_KEY.to_string(),
            AttributeValue::S("yes".to_string()),
        );

        assert!(matches!(
            item_to_todo(&item),
            Err(RepositoryError::MalformedItem(_))
        ));
    }

    #[test]
    fn test_negative_id_is_malformed() {
        let mut item = todo_to_item(&sample_todo());
        item.insert(ID_KEY.to_string(), AttributeValue::N("-4".to_string()));

        assert!(matches!(
            item_to_todo(&item),
            Err(RepositoryError::MalformedItem(_))
        ));
    }

    #[test]
    fn test_update_attributes_keep_current_created_at_and_discriminator() {
        let current = todo_to_item(&sample_todo());
        let mut incoming = sample_todo()
            .with_description("oat milk")
            .with_completed(true);
        incoming.created_at = at("2030-01-01T00:00:00Z");
        incoming.updated_at = at("2024-02-01T00:00:00Z");

        let attributes = update_attributes(&incoming, &current).unwrap();

        assert!(!attributes.contains_key(ID_KEY));
        assert_eq!(
            get_datetime(&attributes, CREATED_AT_KEY).unwrap(),
            at("2024-01-15T10:30:00Z")
        );
        assert_eq!(
            get_datetime(&attributes, UPDATED_AT_KEY).unwrap(),
            at("2024-02-01T00:00:00Z")
        );
        assert_eq!(
            attributes.get(RECORD_TYPE_KEY).unwrap().as_s().unwrap(),
            "todo"
        );
        assert!(get_bool(&attributes, COMPLETED_KEY).unwrap());
    }

    #[test]
    fn test_update_attributes_do_not_add_missing_discriminator() {
        let mut current = todo_to_item(&sample_todo());
        current.remove(RECORD_TYPE_KEY);

        let attributes = update_attributes(&sample_todo(), &current).unwrap();

        assert!(!attributes.contains_key(RECORD_TYPE_KEY));
    }

    #[test]
    fn test_get_string_missing_field() {
        let item = Item::new();
        assert!(get_string(&item, "missing").is_err());
    }
}
