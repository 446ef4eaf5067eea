//! # Column Data Types
//!
//! This module provides the `DataType` enum consumed by schema definitions
//! and the change DSL. Each variant renders to its SQL type text for the
//! single target dialect.
//!
//! ## Type Categories
//!
//! | Category | Types |
//! |----------|-------|
//! | **Text** | String (optional length), Json (stored as varchar) |
//! | **Numeric** | Serial, Integer, SmallInt, Double, Float |
//! | **Date/Time** | Date, Time, Timestamp, TimestampWithTimeZone, Interval |
//! | **Other** | Bool, IpAddress, Uuid, Data, Point |

/// Column type for schema definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    /// Varchar with optional length limit.
    String(Option<u32>),
    Timestamp,
    TimestampWithTimeZone,
    Date,
    Time,
    Interval,
    Bool,
    /// Auto-incrementing integer.
    Serial,
    Integer,
    SmallInt,
    Double,
    Float,
    IpAddress,
    Uuid,
    /// Binary data.
    Data,
    /// JSON document stored as varchar.
    Json,
    Point,
}

impl DataType {
    /// Returns the SQL type text for this data type.
    pub fn sql(&self) -> String {
        match self {
            DataType::String(Some(length)) => format!("varchar({})", length),
            DataType::String(None) => "varchar".to_string(),
            DataType::Timestamp => "timestamp".to_string(),
            DataType::TimestampWithTimeZone => "timestamp with time zone".to_string(),
            DataType::Date => "date".to_string(),
            DataType::Time => "time".to_string(),
            DataType::Interval => "interval".to_string(),
            DataType::Bool => "boolean".to_string(),
            DataType::Serial => "SERIAL".to_string(),
            DataType::Integer => "integer".to_string(),
            DataType::SmallInt => "smallint".to_string(),
            DataType::Double => "double precision".to_string(),
            DataType::Float => "real".to_string(),
            DataType::IpAddress => "inet".to_string(),
            DataType::Uuid => "uuid".to_string(),
            DataType::Data => "bytea".to_string(),
            DataType::Json => "varchar".to_string(),
            DataType::Point => "point".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_rendering() {
        assert_eq!(DataType::String(Some(255)).sql(), "varchar(255)");
        assert_eq!(DataType::String(None).sql(), "varchar");
        assert_eq!(DataType::Json.sql(), "varchar");
        assert_eq!(
            DataType::TimestampWithTimeZone.sql(),
            "timestamp with time zone"
        );
        assert_eq!(DataType::Double.sql(), "double precision");
        assert_eq!(DataType::Serial.sql(), "SERIAL");
    }
}
