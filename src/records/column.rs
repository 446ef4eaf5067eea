//! # Primitive Column Parsing
//!
//! `FromColumn` is the parse rule from raw column bytes to one primitive
//! value. The wire representation is textual, so every rule except binary
//! starts by reading the bytes as UTF-8.
//!
//! Two rules are deliberately lenient and must stay that way:
//!
//! - Booleans match the truthy set `{true, t, y, yes, on, 1}`
//!   case-insensitively; every other string is `false`, never an error. An
//!   absent boolean column also decodes to `false`.
//! - Points that deviate from the `(x,y)` form parse to "no value" rather
//!   than failing.

use chrono::{DateTime, Utc};
use eyre::Result;

use crate::error::SqlError;
use crate::types::{timestamp, Bytes, Point, Time};

/// Parse rule from raw column bytes to one primitive.
pub trait FromColumn: Sized {
    /// Parses one value from raw column bytes.
    ///
    /// `Ok(None)` means the bytes do not represent a value; callers treat
    /// it the same as an absent column.
    fn from_column(bytes: &[u8]) -> Result<Option<Self>>;

    /// The value to use when every candidate column is absent, if any.
    fn missing_default() -> Option<Self> {
        None
    }
}

pub(crate) fn column_text(bytes: &[u8]) -> Result<&str> {
    std::str::from_utf8(bytes)
        .map_err(|_| SqlError::with_detail("invalid string value", "not utf-8 text").into())
}

macro_rules! numeric_from_column {
    ($($ty:ty => $name:literal),* $(,)?) => {$(
        impl FromColumn for $ty {
            fn from_column(bytes: &[u8]) -> Result<Option<Self>> {
                let text = column_text(bytes)?;
                match text.parse() {
                    Ok(value) => Ok(Some(value)),
                    Err(_) => Err(SqlError::with_detail(
                        concat!("invalid ", $name, " value"),
                        format!("was '{}'", text),
                    )
                    .into()),
                }
            }
        }
    )*};
}

numeric_from_column!(
    i8 => "i8",
    i16 => "i16",
    i32 => "i32",
    i64 => "i64",
    u8 => "u8",
    u16 => "u16",
    u32 => "u32",
    u64 => "u64",
    f32 => "f32",
);

impl FromColumn for f64 {
    fn from_column(bytes: &[u8]) -> Result<Option<Self>> {
        let text = column_text(bytes)?;
        if let Ok(value) = text.parse() {
            return Ok(Some(value));
        }
        if let Some(seconds) = duration_seconds(text) {
            return Ok(Some(seconds));
        }
        Err(SqlError::with_detail("invalid f64 value", format!("was '{}'", text)).into())
    }
}

/// Interval-typed columns read into a double arrive as `[DD ]HH:MM:SS`;
/// they convert to total seconds.
fn duration_seconds(text: &str) -> Option<f64> {
    let components: Vec<&str> = text.split(':').collect();
    if components.len() != 3 {
        return None;
    }
    let (days, hours) = match components[0].split_once(' ') {
        Some((days, hours)) => (days.parse::<f64>().ok()?, hours.parse::<f64>().ok()?),
        None => (0.0, components[0].parse::<f64>().ok()?),
    };
    let minutes = components[1].parse::<f64>().ok()?;
    let seconds = components[2].parse::<f64>().ok()?;
    Some(seconds + minutes * 60.0 + hours * 3600.0 + days * 86400.0)
}

impl FromColumn for String {
    fn from_column(bytes: &[u8]) -> Result<Option<Self>> {
        Ok(Some(column_text(bytes)?.to_string()))
    }
}

impl FromColumn for bool {
    fn from_column(bytes: &[u8]) -> Result<Option<Self>> {
        let lowered = column_text(bytes)?.to_lowercase();
        Ok(Some(matches!(
            lowered.as_str(),
            "true" | "t" | "y" | "yes" | "on" | "1"
        )))
    }

    fn missing_default() -> Option<Self> {
        Some(false)
    }
}

impl FromColumn for DateTime<Utc> {
    fn from_column(bytes: &[u8]) -> Result<Option<Self>> {
        Ok(Some(timestamp::parse_iso8601(column_text(bytes)?)?))
    }
}

impl FromColumn for Bytes {
    fn from_column(bytes: &[u8]) -> Result<Option<Self>> {
        Ok(Some(Bytes(bytes.to_vec())))
    }
}

impl FromColumn for Point {
    fn from_column(bytes: &[u8]) -> Result<Option<Self>> {
        let Ok(text) = std::str::from_utf8(bytes) else {
            return Ok(None);
        };
        Ok(Point::parse(text))
    }
}

impl FromColumn for Time {
    fn from_column(bytes: &[u8]) -> Result<Option<Self>> {
        Ok(Some(Time::parse(column_text(bytes)?)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_parse() {
        assert_eq!(i32::from_column(b"108").unwrap(), Some(108));
        assert_eq!(u64::from_column(b"114").unwrap(), Some(114));
        assert_eq!(f32::from_column(b"102.3").unwrap(), Some(102.3));
    }

    #[test]
    fn test_numeric_parse_failure_names_offender() {
        let err = i32::from_column(b"abc").unwrap_err();
        let sql_err = err.downcast_ref::<SqlError>().unwrap();
        assert_eq!(sql_err.message, "invalid i32 value");
        assert_eq!(sql_err.more_information.as_deref(), Some("was 'abc'"));
    }

    #[test]
    fn test_bool_truthy_set() {
        for truthy in ["TRUE", "t", "Y", "yes", "On", "1"] {
            assert_eq!(bool::from_column(truthy.as_bytes()).unwrap(), Some(true));
        }
        for falsy in ["false", "f", "no", "0", "anything else"] {
            assert_eq!(bool::from_column(falsy.as_bytes()).unwrap(), Some(false));
        }
        assert_eq!(bool::missing_default(), Some(false));
    }

    #[test]
    fn test_double_duration_fallback() {
        assert_eq!(f64::from_column(b"104.5").unwrap(), Some(104.5));
        assert_eq!(f64::from_column(b"01:02:03").unwrap(), Some(3723.0));
        assert_eq!(
            f64::from_column(b"2 01:02:03").unwrap(),
            Some(2.0 * 86400.0 + 3723.0)
        );
        assert!(f64::from_column(b"1:2").is_err());
        assert!(f64::from_column(b"a:b:c").is_err());
    }

    #[test]
    fn test_date_requires_iso8601() {
        assert!(DateTime::<Utc>::from_column(b"1970-01-01T00:00:00.0Z").is_ok());
        assert!(DateTime::<Utc>::from_column(b"01/01/1970").is_err());
    }

    #[test]
    fn test_bytes_verbatim() {
        let raw = [0u8, 159, 146, 150];
        assert_eq!(
            Bytes::from_column(&raw).unwrap(),
            Some(Bytes(raw.to_vec()))
        );
    }

    #[test]
    fn test_point_deviation_is_absent() {
        assert_eq!(
            Point::from_column(b"(115,116)").unwrap(),
            Some(Point::new(115.0, 116.0))
        );
        assert_eq!(Point::from_column(b"115,116").unwrap(), None);
        assert_eq!(Point::from_column(b"(115)").unwrap(), None);
    }

    #[test]
    fn test_time_parse() {
        assert_eq!(
            Time::from_column(b"7:8:9").unwrap(),
            Some(Time::new(7, 8, 9))
        );
        assert!(Time::from_column(b"25:27").is_err());
    }
}
