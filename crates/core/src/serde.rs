//! Serde helpers for timestamps.
//!
//! Records carry their submission time as an ISO-8601 UTC string with
//! millisecond precision, e.g. `2024-01-15T10:30:00.000Z`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serializer};

/// Formats a timestamp the way records store it.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Serialize a `DateTime<Utc>` as an ISO-8601 string with millisecond precision.
pub fn serialize_timestamp<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&format_timestamp(timestamp))
}

/// Deserialize any RFC 3339 timestamp into UTC.
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(serde::de::Error::custom)
}

/// Serialize an optional timestamp, writing `None` as null.
pub fn serialize_optional_timestamp<S>(
    timestamp: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match timestamp {
        Some(timestamp) => serialize_timestamp(timestamp, serializer),
        None => serializer.serialize_none(),
    }
}

/// Deserialize an optional RFC 3339 timestamp, treating null as None.
pub fn deserialize_optional_timestamp<'de, D>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    s.map(|s| {
        DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    })
    .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Stamped {
        #[serde(
            serialize_with = "serialize_timestamp",
            deserialize_with = "deserialize_timestamp"
        )]
        at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct MaybeStamped {
        #[serde(
            default,
            skip_serializing_if = "Option::is_none",
            serialize_with = "serialize_optional_timestamp",
            deserialize_with = "deserialize_optional_timestamp"
        )]
        at: Option<DateTime<Utc>>,
    }

    #[test]
    fn test_optional_timestamp_missing_or_null_is_none() {
        let missing: MaybeStamped = serde_json::from_str("{}").unwrap();
        let null: MaybeStamped = serde_json::from_str(r#"{"at": null}"#).unwrap();

        assert_eq!(missing.at, None);
        assert_eq!(null.at, None);
        assert_eq!(serde_json::to_string(&missing).unwrap(), "{}");
    }

    #[test]
    fn test_optional_timestamp_round_trips_present_value() {
        let parsed: MaybeStamped =
            serde_json::from_str(r#"{"at": "2024-01-15T10:30:00.000Z"}"#).unwrap();
        assert!(parsed.at.is_some());
        assert_eq!(
            serde_json::to_string(&parsed).unwrap(),
            r#"{"at":"2024-01-15T10:30:00.000Z"}"#
        );
    }

    #[test]
    fn test_serializes_with_millis_and_z_suffix() {
        let at = DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        let json = serde_json::to_string(&Stamped { at }).unwrap();
        assert_eq!(json, r#"{"at":"2024-01-15T10:30:00.000Z"}"#);
    }

    #[test]
    fn test_deserializes_offset_timestamps_into_utc() {
        let json = r#"{"at": "2024-01-15T12:30:00+02:00"}"#;
        let parsed: Stamped = serde_json::from_str(json).unwrap();
        assert_eq!(format_timestamp(&parsed.at), "2024-01-15T10:30:00.000Z");
    }

    #[test]
    fn test_deserialize_rejects_garbage() {
        let json = r#"{"at": "yesterday"}"#;
        let result: Result<Stamped, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
