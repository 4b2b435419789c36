//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of the `ItemStore`
//! trait using `aws-sdk-dynamodb`. Items are marshalled between JSON objects
//! and `AttributeValue` maps the same way the document client does it.

mod conversions;
mod error;
mod store;

pub use conversions::{
    attribute_to_value, attributes_to_item, item_to_attributes, value_to_attribute,
};
pub use store::DynamoDbStore;
