mod operations;
mod types;

pub use operations::{build_color_record, matches_key_prefix, RESERVED_ATTRIBUTES};
pub use types::{ColorRecord, ColorSubmission};
