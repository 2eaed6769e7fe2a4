//! `date_updated` parsing

use crate::error::TimestampError;
use chrono::NaiveDateTime;
use serde_json::Value;

/// Format of `date_updated`, always UTC
pub const DATE_UPDATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Parse `date_updated` into seconds since the epoch
pub fn parse_date_updated(raw: &str) -> Result<i64, TimestampError> {
    NaiveDateTime::parse_from_str(raw, DATE_UPDATED_FORMAT)
        .map(|dt| dt.and_utc().timestamp())
        .map_err(|e| TimestampError::Malformed {
            value: raw.to_string(),
            reason: e.to_string(),
        })
}

/// Extract and parse `date_updated` from a raw homework record
pub fn homework_timestamp(homework: &Value) -> Result<i64, TimestampError> {
    match homework.get("date_updated") {
        None | Some(Value::Null) => Err(TimestampError::Missing),
        Some(Value::String(raw)) => parse_date_updated(raw),
        Some(other) => Err(TimestampError::Malformed {
            value: other.to_string(),
            reason: "expected a string".to_string(),
        }),
    }
}
