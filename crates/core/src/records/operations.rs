use chrono::{DateTime, SubsecRound, Utc};

use super::types::{ColorRecord, ColorSubmission};

/// Attribute names owned by the record itself. Submission fields with these
/// names never reach `ColorRecord::attributes`.
pub const RESERVED_ATTRIBUTES: [&str; 3] = ["pk", "colors", "timestamp"];

/// Shapes a submission into the record that gets persisted.
///
/// `firstName` is promoted to `pk` and dropped from the copied fields,
/// `colors` starts as `[favoriteColor]`, and every other field is carried
/// through unchanged (including `favoriteColor` itself). The timestamp is
/// truncated to milliseconds, the precision records are stored with.
pub fn build_color_record(submission: ColorSubmission, now: DateTime<Utc>) -> ColorRecord {
    let ColorSubmission {
        first_name,
        favorite_color,
        mut extra,
    } = submission;

    for reserved in RESERVED_ATTRIBUTES {
        extra.remove(reserved);
    }
    extra.insert(
        "favoriteColor".to_string(),
        serde_json::Value::String(favorite_color.clone()),
    );

    ColorRecord {
        pk: first_name,
        colors: vec![favorite_color],
        timestamp: Some(now.trunc_subsecs(3)),
        attributes: extra,
    }
}

/// Returns true when `key` starts with `prefix`, the `begins_with` predicate
/// used by prefix scans. An empty prefix matches every key.
pub fn matches_key_prefix(key: &str, prefix: &str) -> bool {
    key.starts_with(prefix)
}
