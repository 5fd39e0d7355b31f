//! AWS SDK client setup.

use aws_config::{BehaviorVersion, Region};
use aws_sdk_dynamodb::config::Credentials;
use aws_sdk_dynamodb::Client;

use crate::config::DynamoDbConfig;

/// Creates a DynamoDB client from the given configuration.
///
/// Static credentials replace the default provider chain only when both
/// halves of the key pair are configured. A custom endpoint points the
/// client at a local DynamoDB or localstack instance.
pub async fn create_client(config: &DynamoDbConfig) -> Client {
    let mut sdk_config_loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.region.clone()));

    if let Some(credentials) = &config.credentials {
        sdk_config_loader = sdk_config_loader.credentials_provider(Credentials::new(
            credentials.access_key_id.clone(),
            credentials.secret_access_key.clone(),
            None,
            None,
            "todolist-static",
        ));
    }

    if let Some(endpoint) = &config.endpoint_url {
        sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
    }

    let sdk_config = sdk_config_loader.load().await;
    Client::new(&sdk_config)
}
