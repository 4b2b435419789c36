//! Functional core for colorsync.
//!
//! Pure data types, pure record-shaping functions, and the storage seam that
//! backends implement. Nothing in this crate performs I/O.

pub mod records;
pub mod response;
pub mod serde;
pub mod storage;
