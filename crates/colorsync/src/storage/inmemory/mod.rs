//! In-memory storage backend for testing.
//!
//! This module provides an in-memory implementation of the `ItemStore` trait
//! that keeps every item in a `BTreeMap` wrapped in `Arc<RwLock<_>>`. It also
//! supports fault injection so callers can check how store errors surface.
//!
//! # Example
//!
//! ```rust,ignore
//! use colorsync::storage::inmemory::InMemoryStore;
//!
//! let store = InMemoryStore::new();
//! // Use store for testing...
//! ```

mod store;

pub use store::InMemoryStore;
