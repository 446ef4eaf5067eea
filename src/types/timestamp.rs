//! # Timestamp Wire Format
//!
//! Date-time values travel as strict ISO-8601 (RFC 3339) text, both in
//! columns and inside JSON blobs. The canonical rendering carries a single
//! fractional-second digit in UTC, e.g. `1970-01-01T00:00:00.0Z`.

use chrono::{DateTime, Utc};
use eyre::Result;

use crate::error::SqlError;

/// Parses strict ISO-8601 date-time text.
pub fn parse_iso8601(text: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| {
            SqlError::with_detail("invalid date value", "not a valid iso 8601 date time").into()
        })
}

/// Renders a date-time in the canonical wire form.
pub fn format_iso8601(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.1fZ").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_epoch_round_trip() {
        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        let text = format_iso8601(&epoch);
        assert_eq!(text, "1970-01-01T00:00:00.0Z");
        assert_eq!(parse_iso8601(&text).unwrap(), epoch);
    }

    #[test]
    fn test_parse_accepts_offset() {
        let dt = parse_iso8601("2020-06-01T12:30:00+02:00").unwrap();
        assert_eq!(format_iso8601(&dt), "2020-06-01T10:30:00.0Z");
    }

    #[test]
    fn test_parse_rejects_non_iso() {
        assert!(parse_iso8601("06/01/2020").is_err());
        assert!(parse_iso8601("2020-06-01").is_err());
        assert!(parse_iso8601("").is_err());
    }
}
