use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::serde::{deserialize_optional_timestamp, serialize_optional_timestamp};

/// A caller-provided submission that has not been persisted yet.
///
/// Any fields beyond `firstName` and `favoriteColor` are kept in `extra` and
/// carried onto the persisted record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColorSubmission {
    pub first_name: String,
    pub favorite_color: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ColorSubmission {
    /// Creates a submission with no extra fields.
    pub fn new(first_name: impl Into<String>, favorite_color: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            favorite_color: favorite_color.into(),
            extra: Map::new(),
        }
    }

    /// Adds an extra field to be carried onto the record.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }
}

/// The persisted unit, keyed by `pk`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorRecord {
    /// Partition key. Currently the submitter's first name.
    pub pk: String,
    /// Favorite colors, in submission order. Empty when the attribute is missing.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Submission time. Records created through a list append have none.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_optional_timestamp",
        deserialize_with = "deserialize_optional_timestamp"
    )]
    pub timestamp: Option<DateTime<Utc>>,
    /// Remaining submission fields, stored verbatim.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ColorRecord {
    /// Creates a record with a single color and no extra attributes.
    pub fn new(pk: impl Into<String>, color: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            pk: pk.into(),
            colors: vec![color.into()],
            timestamp: Some(timestamp),
            attributes: Map::new(),
        }
    }

    /// Returns an extra attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn test_submission_collects_unknown_fields() {
        let submission: ColorSubmission = serde_json::from_value(json!({
            "firstName": "Alice",
            "favoriteColor": "red",
            "lastName": "Liddell",
            "age": 7
        }))
        .unwrap();

        assert_eq!(submission.first_name, "Alice");
        assert_eq!(submission.favorite_color, "red");
        assert_eq!(submission.extra.get("lastName"), Some(&json!("Liddell")));
        assert_eq!(submission.extra.get("age"), Some(&json!(7)));
        assert!(!submission.extra.contains_key("firstName"));
    }

    #[test]
    fn test_submission_requires_name_and_color() {
        let result: Result<ColorSubmission, _> =
            serde_json::from_value(json!({ "firstName": "Alice" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_record_serializes_flat_item_shape() {
        let mut record = ColorRecord::new("Alice", "red", at("2024-01-15T10:30:00Z"));
        record
            .attributes
            .insert("favoriteColor".to_string(), json!("red"));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "pk": "Alice",
                "colors": ["red"],
                "timestamp": "2024-01-15T10:30:00.000Z",
                "favoriteColor": "red"
            })
        );
    }

    #[test]
    fn test_record_without_colors_reads_as_empty() {
        let record: ColorRecord = serde_json::from_value(json!({
            "pk": "Bob",
            "timestamp": "2024-01-15T10:30:00.000Z"
        }))
        .unwrap();

        assert!(record.colors.is_empty());
        assert!(record.attributes.is_empty());
    }

    #[test]
    fn test_record_without_timestamp_reads_as_none() {
        let record: ColorRecord = serde_json::from_value(json!({
            "pk": "Dana",
            "colors": ["red", "blue"]
        }))
        .unwrap();

        assert_eq!(record.timestamp, None);
        assert_eq!(record.colors, vec!["red", "blue"]);
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({ "pk": "Dana", "colors": ["red", "blue"] })
        );
    }

    #[test]
    fn test_record_keeps_unknown_attributes() {
        let record: ColorRecord = serde_json::from_value(json!({
            "pk": "Bob",
            "colors": ["blue", "green"],
            "timestamp": "2024-01-15T10:30:00.000Z",
            "hobby": "chess"
        }))
        .unwrap();

        assert_eq!(record.colors, vec!["blue", "green"]);
        assert_eq!(record.attribute("hobby"), Some(&json!("chess")));
    }
}
