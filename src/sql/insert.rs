//! # INSERT Builders
//!
//! Setters are kept in insertion order; [`insert_query`] encodes a whole
//! record into setters sorted by column name so the statement text is
//! deterministic.

use std::marker::PhantomData;

use eyre::Result;

use super::{
    AnyQuery, ChangeQuery, Parameter, QueryComponent, RowReturningQuery, Selectable, SqlText,
    Table, ToParameter,
};
use crate::records::{encode, Encodable};
use crate::types::Value;

/// An INSERT of one row.
#[derive(Debug, Clone)]
pub struct InsertQuery<T: Table> {
    setters: Vec<(String, Parameter)>,
    table: PhantomData<T>,
}

impl<T: Table> Default for InsertQuery<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Table> InsertQuery<T> {
    pub fn new() -> Self {
        Self {
            setters: Vec::new(),
            table: PhantomData,
        }
    }

    pub fn setting(mut self, field: &str, value: impl ToParameter) -> Self {
        self.setters.push((field.to_lowercase(), value.to_parameter()));
        self
    }

    /// Appends a RETURNING clause so the insert hands back rows.
    pub fn returning(self, selections: Vec<Selectable>) -> InsertReturningQuery<T> {
        InsertReturningQuery {
            setters: self.setters,
            selections,
            table: PhantomData,
        }
    }
}

fn insert_statement(table: &str, setters: &[(String, Parameter)]) -> String {
    let keys: Vec<String> = setters.iter().map(|(k, _)| format!("\"{}\"", k)).collect();
    let slots: Vec<String> = setters.iter().map(|(_, p)| p.sql()).collect();
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        table,
        keys.join(","),
        slots.join(", ")
    )
}

impl<T: Table> AnyQuery for InsertQuery<T> {
    fn statement(&self) -> String {
        insert_statement(T::NAME, &self.setters)
    }

    fn arguments(&self) -> Vec<Value> {
        self.setters.iter().flat_map(|(_, p)| p.arguments()).collect()
    }
}

impl<T: Table> ChangeQuery for InsertQuery<T> {}

/// An INSERT with a RETURNING clause.
#[derive(Debug, Clone)]
pub struct InsertReturningQuery<T: Table> {
    setters: Vec<(String, Parameter)>,
    selections: Vec<Selectable>,
    table: PhantomData<T>,
}

impl<T: Table> AnyQuery for InsertReturningQuery<T> {
    fn statement(&self) -> String {
        let selections: Vec<String> = self.selections.iter().map(|s| s.sql()).collect();
        format!(
            "{} RETURNING {}",
            insert_statement(T::NAME, &self.setters),
            selections.join(", ")
        )
    }

    fn arguments(&self) -> Vec<Value> {
        self.setters.iter().flat_map(|(_, p)| p.arguments()).collect()
    }
}

impl<T: Table> RowReturningQuery for InsertReturningQuery<T> {}
impl<T: Table> ChangeQuery for InsertReturningQuery<T> {}

/// Encodes `record` into an INSERT with one setter per encoded column.
pub fn insert_query<T: Table + Encodable>(record: &T) -> Result<InsertQuery<T>> {
    let mut setters: Vec<(String, Value)> = encode(record)?.into_iter().collect();
    setters.sort_by(|a, b| a.0.cmp(&b.0));

    let mut query = InsertQuery::new();
    for (key, value) in setters {
        query = query.setting(&key, Parameter::Value(value));
    }
    Ok(query)
}
