//! Record store adapter.
//!
//! Translates [`ColorRecord`]s to store items and back, one method per store
//! primitive. Store faults are logged here and returned unchanged; nothing is
//! retried or translated into a different error.

use std::sync::Arc;

use serde_json::Value;

use colorsync_core::records::ColorRecord;
use colorsync_core::storage::{Item, ItemStore, RepositoryError, Result};

/// Attribute holding the accumulated colors.
pub const COLORS_ATTRIBUTE: &str = "colors";

/// Typed access to color records on top of any [`ItemStore`].
#[derive(Clone)]
pub struct RecordStore {
    store: Arc<dyn ItemStore>,
}

impl RecordStore {
    /// Creates an adapter over a shared store.
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Creates an adapter that owns its store.
    pub fn from_store(store: impl ItemStore + 'static) -> Self {
        Self::new(Arc::new(store))
    }

    /// Point lookup. A missing record is `Ok(None)`.
    pub async fn get_record(&self, pk: &str) -> Result<Option<ColorRecord>> {
        let item = self
            .store
            .get_item(pk)
            .await
            .map_err(|e| log_store_error("get_record", pk, e))?;

        let record = item
            .map(item_to_record)
            .transpose()
            .map_err(|e| log_store_error("get_record", pk, e))?;

        tracing::debug!(pk, found = record.is_some(), "Get record result");
        Ok(record)
    }

    /// Unconditionally overwrites the record stored under `record.pk`.
    pub async fn save_record(&self, record: &ColorRecord) -> Result<()> {
        let item =
            record_to_item(record).map_err(|e| log_store_error("save_record", &record.pk, e))?;

        self.store
            .put_item(item)
            .await
            .map_err(|e| log_store_error("save_record", &record.pk, e))?;

        tracing::debug!(pk = %record.pk, "Record saved successfully");
        Ok(())
    }

    /// Atomically appends `new_color` to the record's colors, creating the
    /// list (and the item) when missing.
    ///
    /// Returns the resulting list, or `[new_color]` if the store does not
    /// echo the updated attribute.
    pub async fn update_colors(&self, pk: &str, new_color: &str) -> Result<Vec<String>> {
        let updated = self
            .store
            .append_to_list(
                pk,
                COLORS_ATTRIBUTE,
                vec![Value::String(new_color.to_string())],
            )
            .await
            .map_err(|e| log_store_error("update_colors", pk, e))?;

        let colors = match updated {
            Some(value) => serde_json::from_value::<Vec<String>>(value)
                .map_err(|e| RepositoryError::Serialization(e.to_string()))
                .map_err(|e| log_store_error("update_colors", pk, e))?,
            None => vec![new_color.to_string()],
        };

        tracing::debug!(pk, ?colors, "Update colors result");
        Ok(colors)
    }

    /// Same as [`save_record`](Self::save_record), but hands the record back
    /// for chaining.
    pub async fn save_color_submission(&self, record: ColorRecord) -> Result<ColorRecord> {
        self.save_record(&record).await?;
        Ok(record)
    }

    /// Returns every record whose `pk` starts with `prefix`.
    ///
    /// An empty list means nothing matched. Only the first scan page is read.
    pub async fn search_colors(&self, prefix: &str) -> Result<Vec<ColorRecord>> {
        let items = self
            .store
            .scan_key_prefix(prefix)
            .await
            .map_err(|e| log_store_error("search_colors", prefix, e))?;

        let records = items
            .into_iter()
            .map(item_to_record)
            .collect::<Result<Vec<_>>>()
            .map_err(|e| log_store_error("search_colors", prefix, e))?;

        tracing::debug!(prefix, count = records.len(), "Search results");
        Ok(records)
    }
}

impl std::fmt::Debug for RecordStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordStore").finish_non_exhaustive()
    }
}

/// Logs a store fault and returns it untouched.
fn log_store_error(operation: &'static str, key: &str, error: RepositoryError) -> RepositoryError {
    tracing::error!(operation, key, error = %error, "Store operation failed");
    tracing::debug!(operation, key, ?error, "Store error detail");
    error
}

fn record_to_item(record: &ColorRecord) -> Result<Item> {
    match serde_json::to_value(record) {
        Ok(Value::Object(item)) => Ok(item),
        Ok(other) => Err(RepositoryError::Serialization(format!(
            "Record serialized to a non-object value: {}",
            other
        ))),
        Err(e) => Err(RepositoryError::Serialization(e.to_string())),
    }
}

fn item_to_record(item: Item) -> Result<ColorRecord> {
    serde_json::from_value(Value::Object(item))
        .map_err(|e| RepositoryError::Serialization(e.to_string()))
}

#[cfg(all(test, feature = "inmemory"))]
mod tests {
    use super::*;
    use crate::storage::InMemoryStore;
    use chrono::{DateTime, Utc};
    use serde_json::json;

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn setup() -> (InMemoryStore, RecordStore) {
        let store = InMemoryStore::new();
        let records = RecordStore::from_store(store.clone());
        (store, records)
    }

    fn sample_record(pk: &str, color: &str) -> ColorRecord {
        let mut record = ColorRecord::new(pk, color, at("2024-01-15T10:30:00Z"));
        record
            .attributes
            .insert("favoriteColor".to_string(), json!(color));
        record
    }

    // ==================== get_record / save_record ====================

    #[tokio::test]
    async fn test_get_record_missing_is_none() {
        let (_, records) = setup();
        assert_eq!(records.get_record("nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_and_get_record() {
        let (_, records) = setup();
        let record = sample_record("Alice", "red");

        records.save_record(&record).await.unwrap();

        assert_eq!(records.get_record("Alice").await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_save_record_writes_flat_item() {
        let (store, records) = setup();
        records.save_record(&sample_record("Alice", "red")).await.unwrap();

        let item = store.get_item("Alice").await.unwrap().unwrap();
        assert_eq!(
            Value::Object(item),
            json!({
                "pk": "Alice",
                "colors": ["red"],
                "timestamp": "2024-01-15T10:30:00.000Z",
                "favoriteColor": "red"
            })
        );
    }

    #[tokio::test]
    async fn test_save_record_overwrites() {
        let (_, records) = setup();
        records.save_record(&sample_record("Alice", "red")).await.unwrap();
        records.save_record(&sample_record("Alice", "blue")).await.unwrap();

        let stored = records.get_record("Alice").await.unwrap().unwrap();
        assert_eq!(stored.colors, vec!["blue"]);
    }

    #[tokio::test]
    async fn test_get_record_with_malformed_item_is_serialization_error() {
        let (store, records) = setup();
        let malformed = json!({ "pk": "Alice", "timestamp": "never" });
        store
            .put_item(malformed.as_object().cloned().unwrap())
            .await
            .unwrap();

        let result = records.get_record("Alice").await;
        assert!(matches!(result, Err(RepositoryError::Serialization(_))));
    }

    // ==================== update_colors ====================

    #[tokio::test]
    async fn test_update_colors_appends() {
        let (_, records) = setup();

        assert_eq!(records.update_colors("Alice", "red").await.unwrap(), vec!["red"]);
        assert_eq!(
            records.update_colors("Alice", "blue").await.unwrap(),
            vec!["red", "blue"]
        );
    }

    #[tokio::test]
    async fn test_record_created_by_update_colors_is_readable() {
        let (_, records) = setup();
        records.save_record(&sample_record("Alice", "red")).await.unwrap();

        records.update_colors("Al", "red").await.unwrap();
        records.update_colors("Al", "blue").await.unwrap();

        let appended = records.get_record("Al").await.unwrap().unwrap();
        assert_eq!(appended.pk, "Al");
        assert_eq!(appended.colors, vec!["red", "blue"]);
        assert_eq!(appended.timestamp, None);

        let found = records.search_colors("Al").await.unwrap();
        let mut keys: Vec<&str> = found.iter().map(|r| r.pk.as_str()).collect();
        keys.sort();
        assert_eq!(keys, vec!["Al", "Alice"]);
    }

    #[tokio::test]
    async fn test_update_colors_keeps_other_attributes() {
        let (_, records) = setup();
        records.save_record(&sample_record("Alice", "red")).await.unwrap();

        let colors = records.update_colors("Alice", "green").await.unwrap();
        assert_eq!(colors, vec!["red", "green"]);

        let stored = records.get_record("Alice").await.unwrap().unwrap();
        assert_eq!(stored.colors, vec!["red", "green"]);
        assert_eq!(stored.attribute("favoriteColor"), Some(&json!("red")));
    }

    // ==================== save_color_submission / search_colors ====================

    #[tokio::test]
    async fn test_save_color_submission_returns_input() {
        let (_, records) = setup();
        let record = sample_record("Alice", "red");

        let saved = records.save_color_submission(record.clone()).await.unwrap();
        assert_eq!(saved, record);
    }

    #[tokio::test]
    async fn test_search_colors_prefix_match() {
        let (_, records) = setup();
        for pk in ["Al", "Alice", "Bob"] {
            records.save_record(&sample_record(pk, "red")).await.unwrap();
        }

        let found = records.search_colors("Al").await.unwrap();
        let mut keys: Vec<&str> = found.iter().map(|r| r.pk.as_str()).collect();
        keys.sort();
        assert_eq!(keys, vec!["Al", "Alice"]);
    }

    #[tokio::test]
    async fn test_search_colors_no_match_is_empty() {
        let (_, records) = setup();
        records.save_record(&sample_record("Bob", "red")).await.unwrap();

        assert!(records.search_colors("Zed").await.unwrap().is_empty());
    }

    // ==================== Fault propagation ====================

    #[tokio::test]
    async fn test_faults_propagate_unchanged() {
        let (store, records) = setup();
        let fault = RepositoryError::ConnectionFailed("socket closed".to_string());
        store.fail_with(fault.clone()).await;

        assert_eq!(records.get_record("Alice").await, Err(fault.clone()));
        assert_eq!(
            records.save_record(&sample_record("Alice", "red")).await,
            Err(fault.clone())
        );
        assert_eq!(
            records.update_colors("Alice", "red").await,
            Err(fault.clone())
        );
        assert_eq!(
            records
                .save_color_submission(sample_record("Alice", "red"))
                .await,
            Err(fault.clone())
        );
        assert_eq!(records.search_colors("Al").await, Err(fault));
    }
}
