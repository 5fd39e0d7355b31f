use std::{env, fmt, time::Duration};

use thiserror::Error;

/// Region used when `AWS_REGION` is not set.
pub const DEFAULT_REGION: &str = "ap-northeast-1";

/// Errors that prevent the service from starting.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DynamoDB table name is not set (environment variable DYNAMODB_TABLE)")]
    MissingTableName,
    #[error("DynamoDB query index name is not set (environment variable QUERY_INDEX)")]
    MissingQueryIndex,
}

/// Server configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Request timeout in seconds (default: 10)
    pub request_timeout_seconds: u64,
    /// Items requested per index page when listing (default: store decides)
    pub query_page_size: Option<u32>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `REQUEST_TIMEOUT_SECONDS` - Request timeout in seconds (default: 10)
    /// - `QUERY_PAGE_SIZE` - Items per index page when listing (optional)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            request_timeout_seconds: lookup("REQUEST_TIMEOUT_SECONDS")
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
            query_page_size: lookup("QUERY_PAGE_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|n| *n > 0),
        }
    }

    /// Get the request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

/// Static AWS credential pair.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}

/// DynamoDB connection parameters, fixed at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DynamoDbConfig {
    pub region: String,
    pub table_name: String,
    pub query_index_name: String,
    /// Used instead of the default provider chain when present.
    pub credentials: Option<StaticCredentials>,
    /// Alternate endpoint, e.g. a local DynamoDB for testing.
    pub endpoint_url: Option<String>,
}

impl DynamoDbConfig {
    /// Load DynamoDB configuration from environment variables.
    ///
    /// Environment variables:
    /// - `AWS_REGION` - AWS region (default: "ap-northeast-1")
    /// - `DYNAMODB_TABLE` - Table name (required)
    /// - `QUERY_INDEX` - Secondary index used for listing (required)
    /// - `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` - Static credentials,
    ///   used only when both are non-empty
    /// - `DYNAMODB_ENDPOINT` - Alternate endpoint URL (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let table_name = non_empty("DYNAMODB_TABLE").ok_or(ConfigError::MissingTableName)?;
        let query_index_name = non_empty("QUERY_INDEX").ok_or(ConfigError::MissingQueryIndex)?;

        let credentials = match (
            non_empty("AWS_ACCESS_KEY_ID"),
            non_empty("AWS_SECRET_ACCESS_KEY"),
        ) {
            (Some(access_key_id), Some(secret_access_key)) => Some(StaticCredentials {
                access_key_id,
                secret_access_key,
            }),
            _ => None,
        };

        Ok(Self {
            region: non_empty("AWS_REGION").unwrap_or_else(|| DEFAULT_REGION.to_string()),
            table_name,
            query_index_name,
            credentials,
            endpoint_url: non_empty("DYNAMODB_ENDPOINT"),
        })
    }

    /// Returns a display string for the target environment.
    pub fn target_display(&self) -> String {
        match &self.endpoint_url {
            Some(url) => format!("Local DynamoDB ({})", url),
            None => format!("AWS DynamoDB (region: {})", self.region),
        }
    }
}
