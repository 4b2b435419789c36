//! Storage backend implementations.
//!
//! This module provides concrete implementations of the
//! [`ItemStore`](colorsync_core::storage::ItemStore) trait defined in
//! `colorsync_core::storage`. The implementations are selected at compile
//! time via feature flags.
//!
//! # Feature Flags
//!
//! - `dynamodb` (default): AWS DynamoDB backend using `aws-sdk-dynamodb`
//! - `inmemory` (default): in-memory backend for tests and local runs
//!
//! Both backends can be compiled in together; callers pick one when they
//! build a [`RecordStore`](crate::RecordStore).
//!
//! # Examples
//!
//! Build without the AWS SDK:
//! ```bash
//! cargo build -p colorsync --no-default-features --features inmemory
//! ```

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'dynamodb' or 'inmemory' feature. \
    Example: cargo build -p colorsync --features dynamodb"
);

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub use dynamodb::DynamoDbStore;

#[cfg(feature = "inmemory")]
pub use inmemory::InMemoryStore;
