//! # SELECT Builders
//!
//! `SelectQuery` renders full row selects with joins, filtering, grouping,
//! ordering, and limit/offset. `SelectScalarQuery` selects a single
//! expression aliased `scalar`, which the connection helpers read back by
//! that column name.

use std::marker::PhantomData;

use super::{
    AnyQuery, Join, Parameter, Predicate, QualifiedField, QueryComponent, RowReturningQuery,
    ScalarReturningQuery, SqlText, Table,
};
use crate::sql::Function;
use crate::types::Value;

/// One item in a SELECT list.
#[derive(Debug, Clone, PartialEq)]
pub enum Selectable {
    All,
    Field(QualifiedField),
    Function(Function),
    Parameter(Parameter),
}

impl SqlText for Selectable {
    fn sql(&self) -> String {
        match self {
            Selectable::All => "*".to_string(),
            Selectable::Field(field) => field.sql(),
            Selectable::Function(function) => function.sql(),
            Selectable::Parameter(parameter) => parameter.sql(),
        }
    }
}

impl QueryComponent for Selectable {
    fn arguments(&self) -> Vec<Value> {
        match self {
            Selectable::All | Selectable::Field(_) => Vec::new(),
            Selectable::Function(function) => function.arguments(),
            Selectable::Parameter(parameter) => parameter.arguments(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderDirection {
    #[default]
    Ascending,
    Descending,
}

/// A SELECT over one table plus any joined tables.
#[derive(Debug, Clone)]
pub struct SelectQuery<T: Table> {
    selections: Vec<Selectable>,
    predicate: Option<Predicate>,
    joins: Vec<Join>,
    group_by: Vec<Parameter>,
    having: Option<Predicate>,
    order_by: Vec<QualifiedField>,
    order_direction: OrderDirection,
    limit: Option<u64>,
    offset: Option<u64>,
    table: PhantomData<T>,
}

impl<T: Table> Default for SelectQuery<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Table> SelectQuery<T> {
    pub fn new() -> Self {
        Self {
            selections: vec![Selectable::All],
            predicate: None,
            joins: Vec::new(),
            group_by: Vec::new(),
            having: None,
            order_by: Vec::new(),
            order_direction: OrderDirection::Ascending,
            limit: None,
            offset: None,
            table: PhantomData,
        }
    }

    pub fn selecting(mut self, selections: Vec<Selectable>) -> Self {
        self.selections = selections;
        self
    }

    /// Adds a predicate, AND-merging with any existing one.
    pub fn filtered(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(match self.predicate.take() {
            Some(existing) => Predicate::and(vec![existing, predicate]),
            None => predicate,
        });
        self
    }

    pub fn joined(mut self, join: Join) -> Self {
        self.joins.push(join);
        self
    }

    pub fn grouped_by(mut self, fields: Vec<Parameter>) -> Self {
        self.group_by = fields;
        self
    }

    pub fn having(mut self, predicate: Predicate) -> Self {
        self.having = Some(predicate);
        self
    }

    pub fn ordered_by(mut self, fields: Vec<QualifiedField>, direction: OrderDirection) -> Self {
        self.order_by = fields;
        self.order_direction = direction;
        self
    }

    pub fn limited_to(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset_by(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}

impl<T: Table> AnyQuery for SelectQuery<T> {
    fn statement(&self) -> String {
        let selections: Vec<String> = self.selections.iter().map(|s| s.sql()).collect();
        let mut sql = format!("SELECT {} FROM {}", selections.join(", "), T::NAME);

        for join in &self.joins {
            sql.push(' ');
            sql.push_str(&join.sql());
        }

        if let Some(predicate) = &self.predicate {
            sql.push_str(" WHERE ");
            sql.push_str(&predicate.sql());
        }

        if !self.group_by.is_empty() {
            let fields: Vec<String> = self.group_by.iter().map(|f| f.sql()).collect();
            sql.push_str(" GROUP BY ");
            sql.push_str(&fields.join(", "));

            if let Some(having) = &self.having {
                sql.push_str(" HAVING ");
                sql.push_str(&having.sql());
            }
        }

        if !self.order_by.is_empty() {
            let fields: Vec<String> = self.order_by.iter().map(|f| f.sql()).collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&fields.join(", "));
            if self.order_direction == OrderDirection::Descending {
                sql.push_str(" DESC");
            }
        }

        if let Some(limit) = self.limit {
            sql.push_str(&format!(" LIMIT {}", limit));
        }

        if let Some(offset) = self.offset {
            sql.push_str(&format!(" OFFSET {}", offset));
        }

        sql
    }

    fn arguments(&self) -> Vec<Value> {
        let mut arguments: Vec<Value> = self
            .selections
            .iter()
            .flat_map(|s| s.arguments())
            .collect();
        arguments.extend(self.joins.iter().flat_map(|j| j.arguments()));
        arguments.extend(self.predicate.iter().flat_map(|p| p.arguments()));
        arguments.extend(self.group_by.iter().flat_map(|f| f.arguments()));
        arguments.extend(self.having.iter().flat_map(|h| h.arguments()));
        arguments
    }
}

impl<T: Table> RowReturningQuery for SelectQuery<T> {}

/// A SELECT of one expression, aliased `scalar`.
#[derive(Debug, Clone)]
pub struct SelectScalarQuery<T: Table> {
    selection: Parameter,
    predicate: Option<Predicate>,
    group_by: Vec<Parameter>,
    having: Option<Predicate>,
    table: PhantomData<T>,
}

impl<T: Table> SelectScalarQuery<T> {
    pub fn new(selection: Parameter) -> Self {
        Self {
            selection,
            predicate: None,
            group_by: Vec::new(),
            having: None,
            table: PhantomData,
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

    pub fn grouped_by(mut self, fields: Vec<Parameter>) -> Self {
        self.group_by = fields;
        self
    }

    pub fn having(mut self, predicate: Predicate) -> Self {
        self.having = Some(predicate);
        self
    }
}

impl<T: Table> AnyQuery for SelectScalarQuery<T> {
    fn statement(&self) -> String {
        let mut sql = format!("SELECT {} AS scalar FROM {}", self.selection.sql(), T::NAME);

        if let Some(predicate) = &self.predicate {
            sql.push_str(" WHERE ");
            sql.push_str(&predicate.sql());
        }

        if !self.group_by.is_empty() {
            let fields: Vec<String> = self.group_by.iter().map(|f| f.sql()).collect();
            sql.push_str(" GROUP BY ");
            sql.push_str(&fields.join(", "));

            if let Some(having) = &self.having {
                sql.push_str(" HAVING ");
                sql.push_str(&having.sql());
            }
        }

        sql
    }

    fn arguments(&self) -> Vec<Value> {
        let mut arguments = self.selection.arguments();
        arguments.extend(self.predicate.iter().flat_map(|p| p.arguments()));
        arguments.extend(self.group_by.iter().flat_map(|f| f.arguments()));
        arguments.extend(self.having.iter().flat_map(|h| h.arguments()));
        arguments
    }
}

impl<T: Table> RowReturningQuery for SelectScalarQuery<T> {}
impl<T: Table> ScalarReturningQuery for SelectScalarQuery<T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::ParameterExt;

    struct Users;

    impl Table for Users {
        const NAME: &'static str = "users";
    }

    #[test]
    fn test_select_all() {
        assert_eq!(Users::select().statement(), "SELECT * FROM users");
    }

    #[test]
    fn test_clause_order() {
        let query = Users::select()
            .joined(Join::inner(
                "posts",
                QualifiedField::qualified("posts", "user_id")
                    .equals(QualifiedField::qualified("users", "id")),
            ))
            .filtered(Users::field("active").equals(true))
            .grouped_by(vec![Parameter::Field(Users::field("id"))])
            .having(QualifiedField::new("count").greater_than(1i64))
            .ordered_by(vec![Users::field("name")], OrderDirection::Descending)
            .limited_to(10)
            .offset_by(20);
        assert_eq!(
            query.statement(),
            "SELECT * FROM users \
             INNER JOIN posts ON \"posts\".\"user_id\" = \"users\".\"id\" \
             WHERE \"users\".\"active\" = %@ \
             GROUP BY \"users\".\"id\" \
             HAVING count > %@ \
             ORDER BY \"users\".\"name\" DESC \
             LIMIT 10 OFFSET 20"
        );
        assert_eq!(
            query.arguments(),
            vec![Value::Bool(true), Value::Int(1)]
        );
    }

    #[test]
    fn test_filtered_merges_with_and() {
        let query = Users::select()
            .filtered(Users::field("a").equals(1i64))
            .filtered(Users::field("b").equals(2i64));
        assert_eq!(
            query.statement(),
            "SELECT * FROM users WHERE (\"users\".\"a\" = %@ AND \"users\".\"b\" = %@)"
        );
    }

    #[test]
    fn test_select_count_scalar() {
        let query = Users::select_count().filtered(Users::field("active").equals(true));
        assert_eq!(
            query.statement(),
            "SELECT count(*) AS scalar FROM users WHERE \"users\".\"active\" = %@"
        );
        assert_eq!(query.arguments(), vec![Value::Bool(true)]);
    }
}
