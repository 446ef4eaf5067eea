//! # SQL Functions
//!
//! The function calls the builder can render. `ToTimestamp` binds its date
//! argument through a `%@` slot with the dialect's timestamp format;
//! `Custom` covers anything not modeled explicitly.

use chrono::{DateTime, Utc};
use eyre::Result;

use super::{Parameter, QueryComponent, SqlText};
use crate::types::{timestamp, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Function {
    Sum(Box<Parameter>),
    CountAll,
    GenerateUuidV4,
    ToTimestamp(DateTime<Utc>),
    Custom {
        name: String,
        params: Vec<Parameter>,
    },
}

impl Function {
    pub fn sum(param: impl Into<Parameter>) -> Self {
        Function::Sum(Box::new(param.into()))
    }

    pub fn custom(name: impl Into<String>, params: Vec<Parameter>) -> Self {
        Function::Custom {
            name: name.into(),
            params,
        }
    }

    /// Renders this function with its arguments inlined as literals, for
    /// DDL default clauses where argument binding is unavailable.
    pub fn rendered(&self) -> Result<String> {
        match self {
            Function::Sum(param) => Ok(format!("sum({})", param.rendered()?)),
            Function::CountAll => Ok("count(*)".to_string()),
            Function::GenerateUuidV4 => Ok("uuid_generate_v4()".to_string()),
            Function::ToTimestamp(date) => Ok(format!(
                "to_timestamp('{}','YYYY-MM-DD HH24:MI:SS.USZ')",
                timestamp::format_iso8601(date)
            )),
            Function::Custom { name, params } => {
                let rendered: Result<Vec<String>> =
                    params.iter().map(|p| p.rendered()).collect();
                Ok(format!("{}({})", name, rendered?.join(",")))
            }
        }
    }
}

impl SqlText for Function {
    fn sql(&self) -> String {
        match self {
            Function::Sum(param) => format!("sum({})", param.sql()),
            Function::CountAll => "count(*)".to_string(),
            Function::GenerateUuidV4 => "uuid_generate_v4()".to_string(),
            Function::ToTimestamp(_) => {
                "to_timestamp(%@,'YYYY-MM-DD HH24:MI:SS.USZ')".to_string()
            }
            Function::Custom { name, params } => {
                let rendered: Vec<String> = params.iter().map(|p| p.sql()).collect();
                format!("{}({})", name, rendered.join(","))
            }
        }
    }
}

impl QueryComponent for Function {
    fn arguments(&self) -> Vec<Value> {
        match self {
            Function::Sum(param) => param.arguments(),
            Function::CountAll | Function::GenerateUuidV4 => Vec::new(),
            Function::ToTimestamp(date) => {
                vec![Value::String(timestamp::format_iso8601(date))]
            }
            Function::Custom { params, .. } => {
                params.iter().flat_map(|p| p.arguments()).collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::QualifiedField;
    use chrono::TimeZone;

    #[test]
    fn test_sum_sql() {
        let f = Function::sum(Parameter::Field(QualifiedField::new("total")));
        assert_eq!(f.sql(), "sum(total)");
        assert!(f.arguments().is_empty());
    }

    #[test]
    fn test_to_timestamp_binds_argument() {
        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        let f = Function::ToTimestamp(epoch);
        assert_eq!(f.sql(), "to_timestamp(%@,'YYYY-MM-DD HH24:MI:SS.USZ')");
        assert_eq!(
            f.arguments(),
            vec![Value::String("1970-01-01T00:00:00.0Z".to_string())]
        );
    }

    #[test]
    fn test_custom_function() {
        let f = Function::custom("lower", vec![Parameter::Value(Value::from("ABC"))]);
        assert_eq!(f.sql(), "lower(%@)");
        assert_eq!(f.arguments(), vec![Value::from("ABC")]);
    }
}
