//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `todolist_core::storage`.
//! Only conditional-check failures become domain errors; everything else is
//! a store failure.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_dynamodb::operation::delete_item::DeleteItemError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use aws_sdk_dynamodb::operation::update_item::UpdateItemError;
use todolist_core::storage::RepositoryError;
use todolist_core::todo::TodoId;

/// Classify failures that never reached the service.
fn map_transport_error<E, R>(err: &SdkError<E, R>) -> Option<RepositoryError> {
    match err {
        SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) => {
            Some(RepositoryError::ConnectionFailed(err.to_string()))
        }
        _ => None,
    }
}

/// Map a service error shared by every operation, keyed on its error code.
fn map_service_error<E: ProvideErrorMetadata + Debug>(operation: &str, err: E) -> RepositoryError {
    let message = match err.code() {
        Some("ResourceNotFoundException") => "Table or index not found".to_string(),
        Some("ProvisionedThroughputExceededException" | "ThrottlingException") => {
            "Throughput exceeded, please retry".to_string()
        }
        Some("RequestLimitExceeded") => "Request limit exceeded, please retry".to_string(),
        Some("TransactionConflictException") => "Transaction conflict, please retry".to_string(),
        Some("ItemCollectionSizeLimitExceededException") => {
            "Item collection size limit exceeded".to_string()
        }
        Some("InternalServerError") => "DynamoDB internal server error".to_string(),
        _ => format!("{operation} failed: {err:?}"),
    };
    RepositoryError::QueryFailed(message)
}

/// Map a GetItem SDK error to RepositoryError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> RepositoryError {
    map_transport_error(&err)
        .unwrap_or_else(|| map_service_error("GetItem", err.into_service_error()))
}

/// Map a Query SDK error to RepositoryError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> RepositoryError {
    map_transport_error(&err).unwrap_or_else(|| map_service_error("Query", err.into_service_error()))
}

/// Map a PutItem SDK error to RepositoryError.
///
/// A failed `attribute_not_exists` condition means the key is taken.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    id: TodoId,
) -> RepositoryError {
    if let Some(mapped) = map_transport_error(&err) {
        return mapped;
    }
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(_) => RepositoryError::AlreadyExists { id },
        err => map_service_error("PutItem", err),
    }
}

/// Map an UpdateItem SDK error to RepositoryError.
///
/// A failed `attribute_exists` condition means the item vanished.
pub fn map_update_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<UpdateItemError, R>,
    id: TodoId,
) -> RepositoryError {
    if let Some(mapped) = map_transport_error(&err) {
        return mapped;
    }
    match err.into_service_error() {
        UpdateItemError::ConditionalCheckFailedException(_) => RepositoryError::NotFound { id },
        err => map_service_error("UpdateItem", err),
    }
}

/// Map a DeleteItem SDK error to RepositoryError.
pub fn map_delete_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DeleteItemError, R>,
) -> RepositoryError {
    map_transport_error(&err)
        .unwrap_or_else(|| map_service_error("DeleteItem", err.into_service_error()))
}

#[cfg(test)]
mod tests {
    use aws_sdk_dynamodb::error::ErrorMetadata;
    use aws_sdk_dynamodb::types::error::ConditionalCheckFailedException;

    use super::*;

    fn service_error<E>(err: E) -> SdkError<E, ()> {
        SdkError::service_error(err, ())
    }

    fn coded(code: &str) -> ErrorMetadata {
        ErrorMetadata::builder().code(code).build()
    }

    #[test]
    fn test_put_conditional_check_failure_is_already_exists() {
        let err = service_error(PutItemError::ConditionalCheckFailedException(
            ConditionalCheckFailedException::builder().build(),
        ));

        assert_eq!(
            map_put_item_error(err, 7),
            RepositoryError::AlreadyExists { id: 7 }
        );
    }

    #[test]
    fn test_update_conditional_check_failure_is_not_found() {
        let err = service_error(UpdateItemError::ConditionalCheckFailedException(
            ConditionalCheckFailedException::builder().build(),
        ));

        assert_eq!(
            map_update_item_error(err, 7),
            RepositoryError::NotFound { id: 7 }
        );
    }

    #[test]
    fn test_timeout_is_connection_failure() {
        let get: SdkError<GetItemError, ()> = SdkError::timeout_error("operation timed out");
        let put: SdkError<PutItemError, ()> = SdkError::timeout_error("operation timed out");
        let query: SdkError<QueryError, ()> = SdkError::timeout_error("operation timed out");

        assert!(matches!(
            map_get_item_error(get),
            RepositoryError::ConnectionFailed(_)
        ));
        assert!(matches!(
            map_put_item_error(put, 1),
            RepositoryError::ConnectionFailed(_)
        ));
        assert!(matches!(
            map_query_error(query),
            RepositoryError::ConnectionFailed(_)
        ));
    }

    #[test]
    fn test_throttling_is_query_failure_on_every_operation() {
        let get = service_error(GetItemError::generic(coded("ThrottlingException")));
        let delete = service_error(DeleteItemError::generic(coded(
            "ProvisionedThroughputExceededException",
        )));

        assert_eq!(
            map_get_item_error(get),
            RepositoryError::QueryFailed("Throughput exceeded, please retry".to_string())
        );
        assert_eq!(
            map_delete_item_error(delete),
            RepositoryError::QueryFailed("Throughput exceeded, please retry".to_string())
        );
    }

    #[test]
    fn test_missing_table_is_store_failure_not_missing_todo() {
        let err = service_error(GetItemError::generic(coded("ResourceNotFoundException")));

        let mapped = map_get_item_error(err);

        assert!(mapped.is_store_error());
        assert_eq!(
            mapped,
            RepositoryError::QueryFailed("Table or index not found".to_string())
        );
    }

    #[test]
    fn test_unknown_service_error_names_the_operation() {
        let err = service_error(QueryError::generic(coded("ValidationException")));

        match map_query_error(err) {
            RepositoryError::QueryFailed(message) => assert!(message.starts_with("Query failed")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
