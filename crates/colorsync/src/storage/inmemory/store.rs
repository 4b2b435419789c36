//! In-memory item store implementation.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use colorsync_core::records::matches_key_prefix;
use colorsync_core::storage::{
    item_key, Item, ItemStore, RepositoryError, Result, PARTITION_KEY,
};

/// In-memory storage backend for testing.
///
/// Items are ordered by key, so scans return them sorted by `pk`. Cloning the
/// store shares the underlying data. Data is lost when the last clone drops.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    items: Arc<RwLock<BTreeMap<String, Item>>>,
    fault: Arc<RwLock<Option<RepositoryError>>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation fail with `error` until
    /// [`clear_fault`](Self::clear_fault) is called.
    pub async fn fail_with(&self, error: RepositoryError) {
        *self.fault.write().await = Some(error);
    }

    /// Removes an injected fault.
    pub async fn clear_fault(&self) {
        *self.fault.write().await = None;
    }

    /// Number of stored items.
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    /// Returns true if nothing has been stored.
    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    async fn check_fault(&self) -> Result<()> {
        match self.fault.read().await.as_ref() {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

/// Key attributes may not be empty strings.
fn check_key(pk: &str) -> Result<()> {
    if pk.is_empty() {
        return Err(RepositoryError::InvalidData(format!(
            "Key attribute {PARTITION_KEY} must not be empty"
        )));
    }
    Ok(())
}

#[async_trait]
impl ItemStore for InMemoryStore {
    async fn get_item(&self, pk: &str) -> Result<Option<Item>> {
        self.check_fault().await?;
        let items = self.items.read().await;
        Ok(items.get(pk).cloned())
    }

    async fn put_item(&self, item: Item) -> Result<()> {
        self.check_fault().await?;
        let pk = item_key(&item)
            .ok_or_else(|| {
                RepositoryError::InvalidData(format!(
                    "Missing or invalid field: {PARTITION_KEY}"
                ))
            })?
            .to_string();
        check_key(&pk)?;

        let mut items = self.items.write().await;
        items.insert(pk, item);
        Ok(())
    }

    async fn append_to_list(
        &self,
        pk: &str,
        attribute: &str,
        values: Vec<Value>,
    ) -> Result<Option<Value>> {
        self.check_fault().await?;
        check_key(pk)?;
        let mut items = self.items.write().await;
        let item = items.entry(pk.to_string()).or_insert_with(|| {
            let mut item = Item::new();
            item.insert(PARTITION_KEY.to_string(), Value::String(pk.to_string()));
            item
        });

        match item
            .entry(attribute.to_string())
            .or_insert_with(|| Value::Array(Vec::new()))
        {
            Value::Array(list) => {
                list.extend(values);
                Ok(Some(Value::Array(list.clone())))
            }
            _ => Err(RepositoryError::QueryFailed(format!(
                "Attribute {attribute} is not a list"
            ))),
        }
    }

    async fn scan_key_prefix(&self, prefix: &str) -> Result<Vec<Item>> {
        self.check_fault().await?;
        let items = self.items.read().await;
        Ok(items
            .iter()
            .filter(|(pk, _)| matches_key_prefix(pk, prefix))
            .map(|(_, item)| item.clone())
            .collect())
    }
}
