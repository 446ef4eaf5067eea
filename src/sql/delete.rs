//! # DELETE Builder

use super::{AnyQuery, ChangeQuery, EmptyResultQuery, Predicate, QueryComponent, SqlText};
use crate::types::Value;

/// A DELETE against one table.
#[derive(Debug, Clone)]
pub struct DeleteQuery {
    table: String,
    predicate: Option<Predicate>,
}

impl DeleteQuery {
    pub fn from_table(table: &str) -> Self {
        Self {
            table: table.to_lowercase(),
            predicate: None,
        }
    }

    /// Adds a predicate, AND-merging with any existing one.
    pub fn filtered(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(match self.predicate.take() {
            Some(existing) => Predicate::and(vec![existing, predicate]),
            None => predicate,
        });
        self
    }
}

impl AnyQuery for DeleteQuery {
    fn statement(&self) -> String {
        let mut sql = format!("DELETE FROM {}", self.table);
        if let Some(predicate) = &self.predicate {
            sql.push_str(" WHERE ");
            sql.push_str(&predicate.sql());
        }
        sql
    }

    fn arguments(&self) -> Vec<Value> {
        self.predicate
            .iter()
            .flat_map(|p| p.arguments())
            .collect()
    }
}

impl EmptyResultQuery for DeleteQuery {}
impl ChangeQuery for DeleteQuery {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::{ParameterExt, QualifiedField};

    #[test]
    fn test_delete_all() {
        let query = DeleteQuery::from_table("Users");
        assert_eq!(query.statement(), "DELETE FROM users");
        assert!(query.arguments().is_empty());
    }

    #[test]
    fn test_delete_filtered() {
        let query = DeleteQuery::from_table("users")
            .filtered(QualifiedField::qualified("users", "id").equals(9i64));
        assert_eq!(
            query.statement(),
            "DELETE FROM users WHERE \"users\".\"id\" = %@"
        );
        assert_eq!(query.arguments(), vec![Value::Int(9)]);
    }
}
