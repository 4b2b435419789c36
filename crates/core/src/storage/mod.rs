mod error;
mod traits;

use serde_json::{Map, Value};

pub use error::{RepositoryError, Result};
pub use traits::ItemStore;

/// Name of the partition key attribute in the table.
pub const PARTITION_KEY: &str = "pk";

/// A store-neutral item: a JSON object with a string `pk`.
pub type Item = Map<String, Value>;

/// Returns the partition key of an item, if it has a string one.
pub fn item_key(item: &Item) -> Option<&str> {
    item.get(PARTITION_KEY).and_then(Value::as_str)
}
