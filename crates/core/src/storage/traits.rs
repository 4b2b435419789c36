use async_trait::async_trait;
use serde_json::Value;

use super::{Item, Result};

/// The four primitives of a single-table key-value store.
///
/// Items are keyed by their [`PARTITION_KEY`](super::PARTITION_KEY) attribute.
/// Backends must not retry or translate faults; whatever the store reports
/// is returned as a [`RepositoryError`](super::RepositoryError).
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Point lookup. A missing item is `Ok(None)`, not an error.
    async fn get_item(&self, pk: &str) -> Result<Option<Item>>;

    /// Unconditional put that replaces any existing item with the same key.
    async fn put_item(&self, item: Item) -> Result<()>;

    /// Atomically appends `values` to the list stored under `attribute`,
    /// treating a missing attribute (or item) as an empty list.
    ///
    /// Returns the updated attribute when the store echoes it back.
    async fn append_to_list(
        &self,
        pk: &str,
        attribute: &str,
        values: Vec<Value>,
    ) -> Result<Option<Value>>;

    /// Scans the whole table for items whose key begins with `prefix`.
    ///
    /// Only the first page of results is returned.
    async fn scan_key_prefix(&self, prefix: &str) -> Result<Vec<Item>>;
}
