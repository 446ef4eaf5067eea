//! # Wire Value Representation
//!
//! This module provides `Value`, the closed union of primitive types the
//! database understands. Values are constructed at the boundary between
//! native code and the wire layer on the encode side, or parsed from raw
//! column bytes on the decode side; they are never mutated, only replaced.
//!
//! ## Value Variants
//!
//! | Variant | Rust Type | Description |
//! |---------|-----------|-------------|
//! | Null | - | SQL NULL |
//! | Bool | bool | Boolean |
//! | String | String | UTF-8 text |
//! | Bytes | Vec<u8> | Binary data |
//! | Int / UInt | i64 / u64 | Default-width integers |
//! | Int8..Int64 | i8..i64 | Signed integers by width |
//! | UInt8..UInt64 | u8..u64 | Unsigned integers by width |
//! | Float32 / Float64 | f32 / f64 | Floating point |
//! | Point | {x, y: f32} | 2D point |
//! | Time | {hour, minute, second} | Time of day |
//!
//! `Int`/`UInt` are the default-width variants. They carry 64-bit payloads
//! but remain distinct tags from `Int64`/`UInt64` so a column's declared
//! width survives a round trip through the value layer.
//!
//! ## Literal Rendering
//!
//! [`Value::render_literal`] produces inline SQL literal text for the few
//! places that cannot bind arguments (generated DEFAULT clauses). Binary
//! data has no safe inline escape rule and fails to render.

use eyre::Result;

use super::{Point, Time};
use crate::error::SqlError;

/// One wire-level database value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    String(String),
    Bytes(Vec<u8>),

    Int(i64),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),

    UInt(u64),
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),

    Float32(f32),
    Float64(f64),

    Point { x: f32, y: f32 },
    Time { hour: u8, minute: u8, second: u8 },
}

impl Value {
    /// Returns true if this value is NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Renders this value as inline SQL literal text.
    ///
    /// Used for generated DEFAULT clauses where argument binding is not
    /// available. Binary data fails: no inline escape rule is defined.
    pub fn render_literal(&self) -> Result<String> {
        match self {
            Value::Null => Ok("NULL".to_string()),
            Value::Bool(b) => Ok(if *b { "true" } else { "false" }.to_string()),
            Value::String(s) => Ok(format!("'{}'", s.replace('\'', "''"))),
            Value::Bytes(_) => Err(SqlError::new(
                "binary data cannot be rendered as an inline literal",
            )
            .into()),
            Value::Int(i) => Ok(i.to_string()),
            Value::Int8(i) => Ok(i.to_string()),
            Value::Int16(i) => Ok(i.to_string()),
            Value::Int32(i) => Ok(i.to_string()),
            Value::Int64(i) => Ok(i.to_string()),
            Value::UInt(u) => Ok(u.to_string()),
            Value::UInt8(u) => Ok(u.to_string()),
            Value::UInt16(u) => Ok(u.to_string()),
            Value::UInt32(u) => Ok(u.to_string()),
            Value::UInt64(u) => Ok(u.to_string()),
            Value::Float32(f) => Ok(f.to_string()),
            Value::Float64(f) => Ok(f.to_string()),
            Value::Point { x, y } => Ok(format!("{},{}", x, y)),
            Value::Time {
                hour,
                minute,
                second,
            } => Ok(format!("{:02}:{:02}:{:02}", hour, minute, second)),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Int8(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int16(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::UInt8(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::UInt16(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::UInt32(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float32(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<Point> for Value {
    fn from(p: Point) -> Self {
        Value::Point { x: p.x, y: p.y }
    }
}

impl From<Time> for Value {
    fn from(t: Time) -> Self {
        Value::Time {
            hour: t.hour,
            minute: t.minute,
            second: t.second,
        }
    }
}

impl From<super::Bytes> for Value {
    fn from(b: super::Bytes) -> Self {
        Value::Bytes(b.0)
    }
}

impl From<chrono::DateTime<chrono::Utc>> for Value {
    fn from(dt: chrono::DateTime<chrono::Utc>) -> Self {
        Value::String(super::timestamp::format_iso8601(&dt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_literal_scalars() {
        assert_eq!(Value::Null.render_literal().unwrap(), "NULL");
        assert_eq!(Value::Bool(true).render_literal().unwrap(), "true");
        assert_eq!(Value::Bool(false).render_literal().unwrap(), "false");
        assert_eq!(Value::Int(42).render_literal().unwrap(), "42");
        assert_eq!(Value::Float64(4.5).render_literal().unwrap(), "4.5");
    }

    #[test]
    fn test_render_literal_string_escapes_quotes() {
        let v = Value::String("it's".to_string());
        assert_eq!(v.render_literal().unwrap(), "'it''s'");
    }

    #[test]
    fn test_render_literal_point_and_time() {
        let p = Value::Point { x: 115.0, y: 116.0 };
        assert_eq!(p.render_literal().unwrap(), "115,116");
        let t = Value::Time {
            hour: 7,
            minute: 8,
            second: 9,
        };
        assert_eq!(t.render_literal().unwrap(), "07:08:09");
    }

    #[test]
    fn test_render_literal_bytes_fails() {
        assert!(Value::Bytes(vec![1, 2, 3]).render_literal().is_err());
    }

    #[test]
    fn test_default_width_conversions() {
        assert_eq!(Value::from(1i64), Value::Int(1));
        assert_eq!(Value::from(1u64), Value::UInt(1));
        assert_ne!(Value::Int(1), Value::Int64(1));
    }
}
