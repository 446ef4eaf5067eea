//! # Statement Parameters
//!
//! A `Parameter` is one slot in a statement: a column reference, a bound
//! value, a value list, a function call, or an arithmetic calculation.
//! Bound values render as `%@` and surface through
//! [`QueryComponent::arguments`]; [`Parameter::rendered`] inlines them as
//! literals instead for the few places that cannot bind (DDL DEFAULT
//! clauses).

use chrono::{DateTime, Utc};
use eyre::Result;

use super::{Function, QualifiedField, QueryComponent, SqlText};
use crate::types::{Bytes, Point, Time, Value};

/// One statement slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    Field(QualifiedField),
    Value(Value),
    Values(Vec<Value>),
    Function(Function),
    Calculation(Box<Calculation>),
    Null,
}

impl Parameter {
    /// Renders this parameter with its values inlined as SQL literals.
    ///
    /// Binary values fail as in [`Value::render_literal`].
    pub fn rendered(&self) -> Result<String> {
        match self {
            Parameter::Field(field) => Ok(field.sql()),
            Parameter::Value(value) => value.render_literal(),
            Parameter::Values(values) => {
                let rendered: Result<Vec<String>> =
                    values.iter().map(|v| v.render_literal()).collect();
                Ok(format!("({})", rendered?.join(",")))
            }
            Parameter::Function(function) => function.rendered(),
            Parameter::Calculation(calculation) => calculation.rendered(),
            Parameter::Null => Ok("NULL".to_string()),
        }
    }
}

impl SqlText for Parameter {
    fn sql(&self) -> String {
        match self {
            Parameter::Field(field) => field.sql(),
            Parameter::Value(_) => "%@".to_string(),
            Parameter::Values(values) => {
                let slots: Vec<&str> = values.iter().map(|_| "%@").collect();
                format!("({})", slots.join(","))
            }
            Parameter::Function(function) => function.sql(),
            Parameter::Calculation(calculation) => calculation.sql(),
            Parameter::Null => "NULL".to_string(),
        }
    }
}

impl QueryComponent for Parameter {
    fn arguments(&self) -> Vec<Value> {
        match self {
            Parameter::Field(_) | Parameter::Null => Vec::new(),
            Parameter::Value(value) => vec![value.clone()],
            Parameter::Values(values) => values.clone(),
            Parameter::Function(function) => function.arguments(),
            Parameter::Calculation(calculation) => calculation.arguments(),
        }
    }
}

/// Conversion into a statement parameter.
///
/// Implemented for every primitive that maps onto a [`Value`], for
/// [`QualifiedField`], [`Function`], and [`Calculation`]. Dates convert
/// through `to_timestamp` so the textual wire format round-trips.
pub trait ToParameter {
    fn to_parameter(&self) -> Parameter;
}

impl ToParameter for Parameter {
    fn to_parameter(&self) -> Parameter {
        self.clone()
    }
}

impl ToParameter for QualifiedField {
    fn to_parameter(&self) -> Parameter {
        Parameter::Field(self.clone())
    }
}

impl ToParameter for Function {
    fn to_parameter(&self) -> Parameter {
        Parameter::Function(self.clone())
    }
}

impl ToParameter for Calculation {
    fn to_parameter(&self) -> Parameter {
        Parameter::Calculation(Box::new(self.clone()))
    }
}

impl ToParameter for DateTime<Utc> {
    fn to_parameter(&self) -> Parameter {
        Parameter::Function(Function::ToTimestamp(*self))
    }
}

macro_rules! value_to_parameter {
    ($($ty:ty),* $(,)?) => {$(
        impl ToParameter for $ty {
            fn to_parameter(&self) -> Parameter {
                Parameter::Value(Value::from(self.clone()))
            }
        }
    )*};
}

value_to_parameter!(
    Value, bool, String, &str, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, Point, Time, Bytes,
);

/// Arithmetic over parameters, rendered with explicit grouping.
#[derive(Debug, Clone, PartialEq)]
pub enum Calculation {
    Negate(Parameter),
    Add { lhs: Parameter, rhs: Parameter },
    Subtract { lhs: Parameter, rhs: Parameter },
    Multiply { lhs: Parameter, rhs: Parameter },
    Divide { lhs: Parameter, rhs: Parameter },
}

impl Calculation {
    pub fn negate(param: impl ToParameter) -> Self {
        Calculation::Negate(param.to_parameter())
    }

    pub fn add(lhs: impl ToParameter, rhs: impl ToParameter) -> Self {
        Calculation::Add {
            lhs: lhs.to_parameter(),
            rhs: rhs.to_parameter(),
        }
    }

    pub fn subtract(lhs: impl ToParameter, rhs: impl ToParameter) -> Self {
        Calculation::Subtract {
            lhs: lhs.to_parameter(),
            rhs: rhs.to_parameter(),
        }
    }

    pub fn multiply(lhs: impl ToParameter, rhs: impl ToParameter) -> Self {
        Calculation::Multiply {
            lhs: lhs.to_parameter(),
            rhs: rhs.to_parameter(),
        }
    }

    pub fn divide(lhs: impl ToParameter, rhs: impl ToParameter) -> Self {
        Calculation::Divide {
            lhs: lhs.to_parameter(),
            rhs: rhs.to_parameter(),
        }
    }

    fn operands(&self) -> (&Parameter, Option<&Parameter>, &'static str) {
        match self {
            Calculation::Negate(param) => (param, None, ""),
            Calculation::Add { lhs, rhs } => (lhs, Some(rhs), "+"),
            Calculation::Subtract { lhs, rhs } => (lhs, Some(rhs), "-"),
            Calculation::Multiply { lhs, rhs } => (lhs, Some(rhs), "*"),
            Calculation::Divide { lhs, rhs } => (lhs, Some(rhs), "/"),
        }
    }

    /// Renders this calculation with its values inlined as literals.
    pub fn rendered(&self) -> Result<String> {
        match self.operands() {
            (param, None, _) => Ok(format!("-({})", param.rendered()?)),
            (lhs, Some(rhs), op) => {
                Ok(format!("({} {} {})", lhs.rendered()?, op, rhs.rendered()?))
            }
        }
    }
}

impl SqlText for Calculation {
    fn sql(&self) -> String {
        match self.operands() {
            (param, None, _) => format!("-({})", param.sql()),
            (lhs, Some(rhs), op) => format!("({} {} {})", lhs.sql(), op, rhs.sql()),
        }
    }
}

impl QueryComponent for Calculation {
    fn arguments(&self) -> Vec<Value> {
        match self.operands() {
            (param, None, _) => param.arguments(),
            (lhs, Some(rhs), _) => {
                let mut arguments = lhs.arguments();
                arguments.extend(rhs.arguments());
                arguments
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_parameter_binds() {
        let param = 42i32.to_parameter();
        assert_eq!(param.sql(), "%@");
        assert_eq!(param.arguments(), vec![Value::Int32(42)]);
    }

    #[test]
    fn test_field_parameter_has_no_arguments() {
        let param = QualifiedField::qualified("users", "id").to_parameter();
        assert_eq!(param.sql(), "\"users\".\"id\"");
        assert!(param.arguments().is_empty());
    }

    #[test]
    fn test_values_list() {
        let param = Parameter::Values(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        assert_eq!(param.sql(), "(%@,%@,%@)");
        assert_eq!(param.arguments().len(), 3);
    }

    #[test]
    fn test_rendered_inlines_literals() {
        let param = Parameter::Values(vec![Value::Int(1), Value::from("two")]);
        assert_eq!(param.rendered().unwrap(), "(1,'two')");
        assert_eq!(Parameter::Null.rendered().unwrap(), "NULL");
    }

    #[test]
    fn test_calculation_sql() {
        let calc = Calculation::add(QualifiedField::new("price"), 5i32);
        assert_eq!(calc.sql(), "(price + %@)");
        assert_eq!(calc.arguments(), vec![Value::Int32(5)]);
        assert_eq!(Calculation::negate(1i64).sql(), "-(%@)");
    }

    #[test]
    fn test_calculation_rendered() {
        let calc = Calculation::multiply(2i64, 3i64);
        assert_eq!(calc.rendered().unwrap(), "(2 * 3)");
    }

    #[test]
    fn test_date_parameter_uses_to_timestamp() {
        use chrono::TimeZone;
        let epoch = Utc.timestamp_opt(0, 0).unwrap();
        let param = epoch.to_parameter();
        assert_eq!(param.sql(), "to_timestamp(%@,'YYYY-MM-DD HH24:MI:SS.USZ')");
    }
}
