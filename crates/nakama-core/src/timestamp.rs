//! Timestamp encoding shared by validation, handlers and stores.
//!
//! Timestamps are stored as UTC RFC 3339 strings with a fixed nine-digit
//! fraction, so string order equals chronological order and range filters
//! can compare the raw stored values.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Encode `dt` in the stored form, e.g. `2024-05-01T12:00:00.000000000Z`.
pub fn encode(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// The current time in stored form.
pub fn now() -> String { encode(Utc::now()) }

/// Parse an RFC 3339 timestamp, or a naive `YYYY-MM-DDTHH:MM:SS[.f]` one which
/// is taken to be UTC.
pub fn parse(s: &str) -> Option<DateTime<Utc>> {
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Some(dt.with_timezone(&Utc));
  }
  NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
    .ok()
    .map(|naive| naive.and_utc())
}
