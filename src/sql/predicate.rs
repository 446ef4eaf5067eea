//! # Predicates
//!
//! The boolean expression tree behind WHERE and HAVING clauses: binary
//! expressions over parameters, AND/OR lists, and negation. Builder
//! methods live on [`ParameterExt`], which is implemented for everything
//! that converts into a [`Parameter`].

use super::{Parameter, QueryComponent, SqlText, ToParameter};
use crate::types::Value;

/// Comparison operator in a binary expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Contains,
    ContainedIn,
}

impl SqlText for Operator {
    fn sql(&self) -> String {
        match self {
            Operator::Equal => "=",
            Operator::NotEqual => "!=",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqual => "<=",
            Operator::Contains => "CONTAINS",
            Operator::ContainedIn => "IN",
        }
        .to_string()
    }
}

/// A boolean expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Expression {
        left: Parameter,
        operator: Operator,
        right: Parameter,
    },
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
    Not(Box<Predicate>),
}

impl Predicate {
    pub fn expression(
        left: impl ToParameter,
        operator: Operator,
        right: impl ToParameter,
    ) -> Self {
        Predicate::Expression {
            left: left.to_parameter(),
            operator,
            right: right.to_parameter(),
        }
    }

    pub fn and(predicates: Vec<Predicate>) -> Self {
        Predicate::And(predicates)
    }

    pub fn or(predicates: Vec<Predicate>) -> Self {
        Predicate::Or(predicates)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(predicate: Predicate) -> Self {
        Predicate::Not(Box::new(predicate))
    }
}

impl SqlText for Predicate {
    fn sql(&self) -> String {
        match self {
            Predicate::Expression {
                left,
                operator,
                right,
            } => format!("{} {} {}", left.sql(), operator.sql(), right.sql()),
            Predicate::And(predicates) => {
                let parts: Vec<String> = predicates.iter().map(|p| p.sql()).collect();
                format!("({})", parts.join(" AND "))
            }
            Predicate::Or(predicates) => {
                let parts: Vec<String> = predicates.iter().map(|p| p.sql()).collect();
                format!("({})", parts.join(" OR "))
            }
            Predicate::Not(predicate) => format!("NOT {}", predicate.sql()),
        }
    }
}

impl QueryComponent for Predicate {
    fn arguments(&self) -> Vec<Value> {
        match self {
            Predicate::Expression { left, right, .. } => {
                let mut arguments = left.arguments();
                arguments.extend(right.arguments());
                arguments
            }
            Predicate::And(predicates) | Predicate::Or(predicates) => {
                predicates.iter().flat_map(|p| p.arguments()).collect()
            }
            Predicate::Not(predicate) => predicate.arguments(),
        }
    }
}

/// Predicate builders on anything parameter-convertible.
pub trait ParameterExt: ToParameter {
    fn equals(&self, other: impl ToParameter) -> Predicate {
        Predicate::expression(self.to_parameter(), Operator::Equal, other)
    }

    fn not_equals(&self, other: impl ToParameter) -> Predicate {
        Predicate::expression(self.to_parameter(), Operator::NotEqual, other)
    }

    fn greater_than(&self, other: impl ToParameter) -> Predicate {
        Predicate::expression(self.to_parameter(), Operator::GreaterThan, other)
    }

    fn greater_than_or_equal(&self, other: impl ToParameter) -> Predicate {
        Predicate::expression(self.to_parameter(), Operator::GreaterThanOrEqual, other)
    }

    fn less_than(&self, other: impl ToParameter) -> Predicate {
        Predicate::expression(self.to_parameter(), Operator::LessThan, other)
    }

    fn less_than_or_equal(&self, other: impl ToParameter) -> Predicate {
        Predicate::expression(self.to_parameter(), Operator::LessThanOrEqual, other)
    }

    fn contains(&self, values: Vec<Value>) -> Predicate {
        Predicate::Expression {
            left: self.to_parameter(),
            operator: Operator::Contains,
            right: Parameter::Values(values),
        }
    }

    fn contained_in(&self, values: Vec<Value>) -> Predicate {
        Predicate::Expression {
            left: self.to_parameter(),
            operator: Operator::ContainedIn,
            right: Parameter::Values(values),
        }
    }

    fn is_null(&self) -> Predicate {
        Predicate::Expression {
            left: self.to_parameter(),
            operator: Operator::Equal,
            right: Parameter::Null,
        }
    }

    fn is_not_null(&self) -> Predicate {
        Predicate::not(self.is_null())
    }
}

impl<T: ToParameter> ParameterExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::QualifiedField;

    #[test]
    fn test_expression_sql() {
        let predicate = QualifiedField::qualified("users", "id").equals(1i64);
        assert_eq!(predicate.sql(), "\"users\".\"id\" = %@");
        assert_eq!(predicate.arguments(), vec![Value::Int(1)]);
    }

    #[test]
    fn test_and_or_grouping() {
        let a = QualifiedField::new("a").equals(1i64);
        let b = QualifiedField::new("b").equals(2i64);
        let combined = Predicate::or(vec![Predicate::and(vec![a, b.clone()]), b]);
        assert_eq!(combined.sql(), "((a = %@ AND b = %@) OR b = %@)");
        assert_eq!(combined.arguments().len(), 3);
    }

    #[test]
    fn test_not() {
        let predicate = Predicate::not(QualifiedField::new("active").equals(true));
        assert_eq!(predicate.sql(), "NOT active = %@");
    }

    #[test]
    fn test_contained_in() {
        let predicate =
            QualifiedField::new("id").contained_in(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(predicate.sql(), "id IN (%@,%@)");
        assert_eq!(predicate.arguments(), vec![Value::Int(1), Value::Int(2)]);
    }

    #[test]
    fn test_is_null() {
        assert_eq!(QualifiedField::new("deleted_at").is_null().sql(), "deleted_at = NULL");
        assert_eq!(
            QualifiedField::new("deleted_at").is_not_null().sql(),
            "NOT deleted_at = NULL"
        );
    }
}
