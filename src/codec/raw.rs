//! Encoding and decoding of raw entry strings.
//!
//! A browser medium stores exactly one string per entry, so the value and its
//! optional expiry instant travel together: the value is JSON-encoded, then a
//! `|` delimiter is appended, then the expiry as integer UTC epoch seconds
//! (or nothing when the entry never expires).
//!
//! ## Why `|` is safe
//!
//! The delimiter is only meaningful in one position: immediately before a run
//! of trailing digits (possibly empty) anchored to the end of the string.
//! JSON output never *ends* with `|` followed by bare digits — strings close
//! with `"`, arrays with `]`, objects with `}` — so the split point is the
//! last such occurrence and a `|` inside a JSON string payload can never be
//! mistaken for it.
//!
//! ## Decoding is total
//!
//! `decode` never fails. A left-hand side that is not valid JSON is returned
//! verbatim as a JSON string (entries written by older revisions or by hand
//! stay readable), and a suffix that does not fit an `i64` epoch second is
//! treated as no expiry. Encoding can fail, but only when the value itself is
//! not JSON-representable.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Separates the JSON payload from the optional epoch-seconds suffix.
pub const DELIMITER: char = '|';

/// The raw string a medium returns for a missing entry.
///
/// Decodes to `(Value::Null, None)`, which the storage engine reads as
/// "absent".
pub const ABSENT: &str = "null|";

/// Errors that can occur while encoding a value.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// The value cannot be represented as JSON (e.g. a map with non-string
    /// keys, or a `Serialize` impl that reports an error).
    #[error("value is not JSON-serializable: {0}")]
    NotRepresentable(#[from] serde_json::Error),
}

/// An entry decoded from its raw string form.
///
/// This is the in-memory shape only; it is never persisted directly.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedValue {
    /// The JSON value component.
    pub value: Value,
    /// The absolute expiry instant, if one was encoded.
    pub expires_at: Option<DateTime<Utc>>,
}

impl DecodedValue {
    /// Returns true if this entry is logically absent at `now`.
    ///
    /// An entry with no expiry never expires.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.map(|exp| exp <= now).unwrap_or(false)
    }
}

/// Encodes a value and an optional expiry instant into one raw string.
///
/// The expiry is truncated to whole seconds; sub-second precision does not
/// survive a round trip and is deliberately not encoded.
///
/// # Errors
///
/// Returns [`EncodeError::NotRepresentable`] when `value` has no JSON form.
pub fn encode<T: Serialize>(
    value: &T,
    expires_at: Option<DateTime<Utc>>,
) -> Result<String, EncodeError> {
    let mut raw = serde_json::to_string(value)?;
    raw.push(DELIMITER);
    if let Some(expires_at) = expires_at {
        raw.push_str(&expires_at.timestamp().to_string());
    }
    Ok(raw)
}

/// Decodes a raw string back into its value and optional expiry instant.
///
/// The split point is the last `|` immediately preceding the run of trailing
/// ASCII digits (possibly empty) at the end of the string. A raw string with
/// no such delimiter decodes as value-only.
pub fn decode(raw: &str) -> DecodedValue {
    let (payload, suffix) = split_raw(raw);

    let value = serde_json::from_str(payload)
        .unwrap_or_else(|_| Value::String(payload.to_string()));

    let expires_at = suffix
        .filter(|digits| !digits.is_empty())
        .and_then(|digits| digits.parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0));

    DecodedValue { value, expires_at }
}

/// Splits a raw string at the delimiter position, if one exists.
///
/// Returns the JSON payload and, when the delimiter was found, the (possibly
/// empty) digit run that followed it.
fn split_raw(raw: &str) -> (&str, Option<&str>) {
    let bytes = raw.as_bytes();

    let mut split = bytes.len();
    while split > 0 && bytes[split - 1].is_ascii_digit() {
        split -= 1;
    }

    if split > 0 && bytes[split - 1] == DELIMITER as u8 {
        (&raw[..split - 1], Some(&raw[split..]))
    } else {
        (raw, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn instant(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn test_encode_without_expiry_ends_with_delimiter() {
        assert_eq!(encode(&"hello", None).unwrap(), "\"hello\"|");
        assert_eq!(encode(&json!(["hello", 1]), None).unwrap(), "[\"hello\",1]|");
    }

    #[test]
    fn test_encode_with_expiry_appends_epoch_seconds() {
        let raw = encode(&"hello", Some(instant(1_700_000_000))).unwrap();
        assert_eq!(raw, "\"hello\"|1700000000");
    }

    #[test]
    fn test_round_trip_without_expiry() {
        for value in [
            json!("hello"),
            json!(42),
            json!(true),
            json!([12, "hello", true]),
            json!({"nested": {"a": [1, 2, 3]}}),
        ] {
            let raw = encode(&value, None).unwrap();
            let decoded = decode(&raw);
            assert_eq!(decoded.value, value);
            assert_eq!(decoded.expires_at, None);
        }
    }

    #[test]
    fn test_round_trip_with_expiry() {
        let expires_at = instant(1_712_345_678);
        let raw = encode(&json!({"k": [0, false]}), Some(expires_at)).unwrap();
        let decoded = decode(&raw);
        assert_eq!(decoded.value, json!({"k": [0, false]}));
        assert_eq!(decoded.expires_at, Some(expires_at));
    }

    #[test]
    fn test_decode_absent_sentinel() {
        let decoded = decode(ABSENT);
        assert_eq!(decoded.value, Value::Null);
        assert_eq!(decoded.expires_at, None);
    }

    #[test]
    fn test_value_containing_delimiter_and_digits() {
        // The delimiter inside the JSON string payload must not shadow the
        // real split point at the end.
        let raw = encode(&"a|123", Some(instant(99))).unwrap();
        assert_eq!(raw, "\"a|123\"|99");

        let decoded = decode(&raw);
        assert_eq!(decoded.value, json!("a|123"));
        assert_eq!(decoded.expires_at, Some(instant(99)));

        let decoded = decode(&encode(&"a|123", None).unwrap());
        assert_eq!(decoded.value, json!("a|123"));
        assert_eq!(decoded.expires_at, None);
    }

    #[test]
    fn test_decode_legacy_entry_without_delimiter() {
        let decoded = decode("plain text");
        assert_eq!(decoded.value, json!("plain text"));
        assert_eq!(decoded.expires_at, None);

        // Bare digits parse as a JSON number, not an expiry.
        let decoded = decode("123");
        assert_eq!(decoded.value, json!(123));
        assert_eq!(decoded.expires_at, None);
    }

    #[test]
    fn test_decode_malformed_json_falls_back_to_raw_string() {
        let decoded = decode("{not json|1700000000");
        assert_eq!(decoded.value, json!("{not json"));
        assert_eq!(decoded.expires_at, Some(instant(1_700_000_000)));
    }

    #[test]
    fn test_decode_overflowing_epoch_suffix_means_no_expiry() {
        let decoded = decode("\"v\"|99999999999999999999999999");
        assert_eq!(decoded.value, json!("v"));
        assert_eq!(decoded.expires_at, None);
    }

    #[test]
    fn test_is_expired_at() {
        let entry = decode("\"v\"|100");
        assert!(!entry.is_expired_at(instant(99)));
        assert!(entry.is_expired_at(instant(100)));
        assert!(entry.is_expired_at(instant(101)));

        let persistent = decode("\"v\"|");
        assert!(!persistent.is_expired_at(instant(i32::MAX as i64)));
    }

    #[test]
    fn test_encode_rejects_non_json_representable_value() {
        use std::collections::HashMap;

        // Maps with non-string keys have no JSON representation.
        let mut value = HashMap::new();
        value.insert((1, 2), "x");
        assert!(encode(&value, None).is_err());
    }
}
