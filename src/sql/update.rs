//! # UPDATE Builders

use std::marker::PhantomData;

use eyre::Result;

use super::{AnyQuery, ChangeQuery, Parameter, Predicate, QueryComponent, Table, ToParameter};
use crate::records::{encode, Encodable};
use crate::sql::SqlText;
use crate::types::Value;

fn update_statement(
    table: &str,
    setters: &[(String, Parameter)],
    predicate: Option<&Predicate>,
) -> String {
    let assignments: Vec<String> = setters
        .iter()
        .map(|(k, p)| format!("\"{}\" = {}", k, p.sql()))
        .collect();
    let mut sql = format!("UPDATE {} SET {}", table, assignments.join(", "));
    if let Some(predicate) = predicate {
        sql.push_str(" WHERE ");
        sql.push_str(&predicate.sql());
    }
    sql
}

fn update_arguments(setters: &[(String, Parameter)], predicate: Option<&Predicate>) -> Vec<Value> {
    let mut arguments: Vec<Value> = setters.iter().flat_map(|(_, p)| p.arguments()).collect();
    arguments.extend(predicate.iter().flat_map(|p| p.arguments()));
    arguments
}

/// An UPDATE against a known table type.
#[derive(Debug, Clone)]
pub struct UpdateQuery<T: Table> {
    setters: Vec<(String, Parameter)>,
    predicate: Option<Predicate>,
    table: PhantomData<T>,
}

impl<T: Table> Default for UpdateQuery<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Table> UpdateQuery<T> {
    pub fn new() -> Self {
        Self {
            setters: Vec::new(),
            predicate: None,
            table: PhantomData,
        }
    }

    pub fn setting(mut self, field: &str, value: impl ToParameter) -> Self {
        self.setters.push((field.to_lowercase(), value.to_parameter()));
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
}

impl<T: Table> AnyQuery for UpdateQuery<T> {
    fn statement(&self) -> String {
        update_statement(T::NAME, &self.setters, self.predicate.as_ref())
    }

    fn arguments(&self) -> Vec<Value> {
        update_arguments(&self.setters, self.predicate.as_ref())
    }
}

impl<T: Table> ChangeQuery for UpdateQuery<T> {}

/// An UPDATE against a table known only by name.
#[derive(Debug, Clone)]
pub struct UpdateArbitraryQuery {
    table: String,
    setters: Vec<(String, Parameter)>,
    predicate: Option<Predicate>,
}

impl UpdateArbitraryQuery {
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_lowercase(),
            setters: Vec::new(),
            predicate: None,
        }
    }

    pub fn setting(mut self, field: &str, value: impl ToParameter) -> Self {
        self.setters.push((field.to_lowercase(), value.to_parameter()));
        self
    }

    pub fn filtered(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(match self.predicate.take() {
            Some(existing) => Predicate::and(vec![existing, predicate]),
            None => predicate,
        });
        self
    }
}

impl AnyQuery for UpdateArbitraryQuery {
    fn statement(&self) -> String {
        update_statement(&self.table, &self.setters, self.predicate.as_ref())
    }

    fn arguments(&self) -> Vec<Value> {
        update_arguments(&self.setters, self.predicate.as_ref())
    }
}

impl ChangeQuery for UpdateArbitraryQuery {}

/// Encodes `record` into an UPDATE with one setter per encoded column.
///
/// The returned query has no predicate; callers filter it down to the
/// intended rows.
pub fn update_query<T: Table + Encodable>(record: &T) -> Result<UpdateQuery<T>> {
    let mut setters: Vec<(String, Value)> = encode(record)?.into_iter().collect();
    setters.sort_by(|a, b| a.0.cmp(&b.0));

    let mut query = UpdateQuery::new();
    for (key, value) in setters {
        query = query.setting(&key, Parameter::Value(value));
    }
    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sql::ParameterExt;

    struct Users;

    impl Table for Users {
        const NAME: &'static str = "users";
    }

    #[test]
    fn test_update_statement() {
        let query = Users::update()
            .setting("name", "amelia")
            .setting("age", 31i32)
            .filtered(Users::field("id").equals(7i64));
        assert_eq!(
            query.statement(),
            "UPDATE users SET \"name\" = %@, \"age\" = %@ WHERE \"users\".\"id\" = %@"
        );
        assert_eq!(
            query.arguments(),
            vec![Value::from("amelia"), Value::Int32(31), Value::Int(7)]
        );
    }

    #[test]
    fn test_update_arbitrary_table() {
        let query = UpdateArbitraryQuery::new("Counters").setting("count", 0i64);
        assert_eq!(query.statement(), "UPDATE counters SET \"count\" = %@");
    }
}
