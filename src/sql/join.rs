//! # Join Clauses

use super::{Predicate, QueryComponent, SqlText};
use crate::types::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Cross,
    LeftOuter,
    RightOuter,
    FullOuter,
}

impl JoinKind {
    fn keyword(&self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Cross => "CROSS JOIN",
            JoinKind::LeftOuter => "LEFT OUTER JOIN",
            JoinKind::RightOuter => "RIGHT OUTER JOIN",
            JoinKind::FullOuter => "FULL OUTER JOIN",
        }
    }
}

/// One join clause: a table joined on a predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Join {
    pub table: String,
    pub kind: JoinKind,
    pub on: Predicate,
}

impl Join {
    pub fn new(table: &str, kind: JoinKind, on: Predicate) -> Self {
        Self {
            table: table.to_lowercase(),
            kind,
            on,
        }
    }

    pub fn inner(table: &str, on: Predicate) -> Self {
        Self::new(table, JoinKind::Inner, on)
    }

    pub fn cross(table: &str, on: Predicate) -> Self {
        Self::new(table, JoinKind::Cross, on)
    }

    pub fn left_outer(table: &str, on: Predicate) -> Self {
        Self::new(table, JoinKind::LeftOuter, on)
    }

    pub fn right_outer(table: &str, on: Predicate) -> Self {
        Self::new(table, JoinKind::RightOuter, on)
    }

    pub fn full_outer(table: &str, on: Predicate) -> Self {
        Self::new(table, JoinKind::FullOuter, on)
    }
}

impl SqlText for Join {
    fn sql(&self) -> String {
        format!("{} {} ON {}", self.kind.keyword(), self.table, self.on.sql())
    }
}

impl QueryComponent for Join {
    fn arguments(&self) -> Vec<Value> {
        self.on.arguments()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{ParameterExt, QualifiedField};

    #[test]
    fn test_inner_join_sql() {
        let join = Join::inner(
            "posts",
            QualifiedField::qualified("posts", "user_id")
                .equals(QualifiedField::qualified("users", "id")),
        );
        assert_eq!(
            join.sql(),
            "INNER JOIN posts ON \"posts\".\"user_id\" = \"users\".\"id\""
        );
        assert!(join.arguments().is_empty());
    }

    #[test]
    fn test_left_outer_join_binds_arguments() {
        let join = Join::left_outer(
            "posts",
            QualifiedField::qualified("posts", "status").equals("published"),
        );
        assert_eq!(
            join.sql(),
            "LEFT OUTER JOIN posts ON \"posts\".\"status\" = %@"
        );
        assert_eq!(join.arguments(), vec![Value::from("published")]);
    }
}
