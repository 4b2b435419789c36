//! colorsync: submit a favorite color under a first name and search the
//! stored records by name prefix.
//!
//! The crate is layered as follows:
//!
//! - [`service::ColorService`] shapes submissions into records and wraps
//!   results in a [`SuccessResponse`](colorsync_core::response::SuccessResponse).
//! - [`record_store::RecordStore`] translates records to store items and logs
//!   store faults before handing them back.
//! - [`storage`] holds the [`ItemStore`](colorsync_core::storage::ItemStore)
//!   backends, selected with the `dynamodb` and `inmemory` features.

pub mod config;
pub mod record_store;
pub mod service;
pub mod storage;
pub mod telemetry;

pub use config::{Config, ConfigError};
pub use record_store::RecordStore;
pub use service::ColorService;
