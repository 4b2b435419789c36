//! DynamoDB item store implementation.
//!
//! Implements `colorsync_core::storage::ItemStore` on a single table whose
//! partition key is `pk`.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{AttributeValue, ReturnValue};
use aws_sdk_dynamodb::Client;
use serde_json::Value;

use colorsync_core::storage::{Item, ItemStore, Result, PARTITION_KEY};

use super::conversions::{
    attribute_to_value, attributes_to_item, item_to_attributes, value_to_attribute,
};
use super::error::{
    map_get_item_error, map_put_item_error, map_scan_error, map_update_item_error,
};
use crate::config::{Config, ConfigError};

/// Appends to a list attribute, creating it when missing.
const APPEND_EXPRESSION: &str =
    "SET #attr = list_append(if_not_exists(#attr, :empty_list), :values)";

/// DynamoDB-based item store.
///
/// The client is cheap to clone and may be shared by every store in the
/// process.
#[derive(Debug, Clone)]
pub struct DynamoDbStore {
    client: Client,
    table_name: String,
}

impl DynamoDbStore {
    /// Creates a new store with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Creates a new store from configuration.
    ///
    /// Uses the AWS SDK default credential chain, the configured region, and
    /// the endpoint override when one is set.
    pub async fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        let mut sdk_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.region.clone()));

        if let Some(endpoint) = &config.endpoint_url {
            sdk_config_loader = sdk_config_loader.endpoint_url(endpoint);
        }

        let sdk_config = sdk_config_loader.load().await;
        tracing::info!(destination = %config.target_display(), "DynamoDB store configured");

        Ok(Self::new(Client::new(&sdk_config), config.table_name.clone()))
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl ItemStore for DynamoDbStore {
    async fn get_item(&self, pk: &str) -> Result<Option<Item>> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, AttributeValue::S(pk.to_string()))
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(attributes_to_item(&item)?)),
            None => Ok(None),
        }
    }

    async fn put_item(&self, item: Item) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item_to_attributes(&item)))
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(())
    }

    async fn append_to_list(
        &self,
        pk: &str,
        attribute: &str,
        values: Vec<Value>,
    ) -> Result<Option<Value>> {
        let result = self
            .client
            .update_item()
            .table_name(&self.table_name)
            .key(PARTITION_KEY, AttributeValue::S(pk.to_string()))
            .update_expression(APPEND_EXPRESSION)
            .expression_attribute_names("#attr", attribute)
            .expression_attribute_values(":empty_list", AttributeValue::L(Vec::new()))
            .expression_attribute_values(
                ":values",
                AttributeValue::L(values.iter().map(value_to_attribute).collect()),
            )
            .return_values(ReturnValue::UpdatedNew)
            .send()
            .await
            .map_err(map_update_item_error)?;

        result
            .attributes
            .as_ref()
            .and_then(|attributes| attributes.get(attribute))
            .map(attribute_to_value)
            .transpose()
    }

    async fn scan_key_prefix(&self, prefix: &str) -> Result<Vec<Item>> {
        let result = self
            .client
            .scan()
            .table_name(&self.table_name)
            .filter_expression(format!("begins_with({PARTITION_KEY}, :prefix)"))
            .expression_attribute_values(":prefix", AttributeValue::S(prefix.to_string()))
            .send()
            .await
            .map_err(map_scan_error)?;

        if result.last_evaluated_key.is_some() {
            tracing::warn!(prefix, "Scan stopped at the first page, results may be incomplete");
        }

        let items = result.items.unwrap_or_default();
        items.iter().map(attributes_to_item).collect()
    }
}
