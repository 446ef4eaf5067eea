//! # Statement Building
//!
//! Typed builders for SELECT/INSERT/UPDATE/DELETE statements. Every
//! component renders its SQL text with `%@` parameter slots and exposes the
//! ordered [`Value`](crate::types::Value) arguments bound to those slots;
//! [`Connection::run`](crate::database::Connection) renumbers the slots to
//! `$1…$n` before the text reaches the driver.

mod delete;
mod field;
mod function;
mod insert;
mod join;
mod parameter;
mod predicate;
mod select;
mod update;

pub use delete::DeleteQuery;
pub use field::QualifiedField;
pub use function::Function;
pub use insert::{insert_query, InsertQuery, InsertReturningQuery};
pub use join::{Join, JoinKind};
pub use parameter::{Calculation, Parameter, ToParameter};
pub use predicate::{Operator, ParameterExt, Predicate};
pub use select::{OrderDirection, Selectable, SelectQuery, SelectScalarQuery};
pub use update::{update_query, UpdateArbitraryQuery, UpdateQuery};

use crate::types::Value;

/// Anything that renders to SQL text.
pub trait SqlText {
    fn sql(&self) -> String;
}

/// A statement fragment: SQL text plus the arguments bound to its `%@`
/// slots, in order.
pub trait QueryComponent: SqlText {
    fn arguments(&self) -> Vec<Value> {
        Vec::new()
    }
}

/// A complete runnable statement.
pub trait AnyQuery {
    fn statement(&self) -> String;
    fn arguments(&self) -> Vec<Value>;
}

/// Statements whose results carry rows.
pub trait RowReturningQuery: AnyQuery {}

/// Statements that change data and report an affected-row count.
pub trait ChangeQuery: AnyQuery {}

/// Statements with no meaningful result.
pub trait EmptyResultQuery: AnyQuery {}

/// Statements selecting a single value aliased `scalar`.
pub trait ScalarReturningQuery: AnyQuery {}

/// A record type stored in a named table.
pub trait Table {
    const NAME: &'static str;

    /// A field of this table, qualified with the table name.
    fn field(name: &str) -> QualifiedField {
        QualifiedField::qualified(Self::NAME, name)
    }

    fn select() -> SelectQuery<Self>
    where
        Self: Sized,
    {
        SelectQuery::new()
    }

    fn select_count() -> SelectScalarQuery<Self>
    where
        Self: Sized,
    {
        SelectScalarQuery::new(Parameter::Function(Function::CountAll))
    }

    fn update() -> UpdateQuery<Self>
    where
        Self: Sized,
    {
        UpdateQuery::new()
    }

    fn delete() -> DeleteQuery
    where
        Self: Sized,
    {
        DeleteQuery::from_table(Self::NAME)
    }
}

/// Literal SQL with pre-bound arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct RawQuery {
    pub statement: String,
    pub arguments: Vec<Value>,
}

impl RawQuery {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            statement: sql.into(),
            arguments: Vec::new(),
        }
    }

    pub fn with_arguments(sql: impl Into<String>, arguments: Vec<Value>) -> Self {
        Self {
            statement: sql.into(),
            arguments,
        }
    }
}

impl AnyQuery for RawQuery {
    fn statement(&self) -> String {
        self.statement.clone()
    }

    fn arguments(&self) -> Vec<Value> {
        self.arguments.clone()
    }
}

impl RowReturningQuery for RawQuery {}
impl ChangeQuery for RawQuery {}
impl EmptyResultQuery for RawQuery {}
