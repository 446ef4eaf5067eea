//! # Database Changes
//!
//! The migration change model: each change renders the queries that apply
//! it and, when the operation is reversible, the queries that undo it.
//! [`ConnectionExt::apply`](crate::database::ConnectionExt) runs a
//! change's forward queries in order.

use eyre::Result;

use super::{Constraint, FieldSpec};
use crate::sql::RawQuery;

/// One schema change.
pub trait DatabaseChange {
    fn forward_queries(&self) -> Result<Vec<RawQuery>>;

    /// The queries that undo this change, or `None` when it cannot be
    /// reverted.
    fn revert_queries(&self) -> Option<Vec<RawQuery>> {
        None
    }
}

/// Creates a table from field specs, an optional composite primary key,
/// and named constraints.
#[derive(Debug, Clone)]
pub struct CreateTable {
    name: String,
    if_not_exists: bool,
    fields: Vec<FieldSpec>,
    primary_key: Vec<String>,
    constraints: Vec<Constraint>,
}

impl CreateTable {
    pub fn new(name: &str, fields: Vec<FieldSpec>) -> Self {
        Self {
            name: name.to_lowercase(),
            if_not_exists: false,
            fields,
            primary_key: Vec::new(),
            constraints: Vec::new(),
        }
    }

    pub fn if_not_exists(mut self) -> Self {
        self.if_not_exists = true;
        self
    }

    pub fn primary_key(mut self, columns: Vec<String>) -> Self {
        self.primary_key = columns;
        self
    }

    pub fn constraint(mut self, constraint: Constraint) -> Self {
        self.constraints.push(constraint);
        self
    }
}

impl DatabaseChange for CreateTable {
    fn forward_queries(&self) -> Result<Vec<RawQuery>> {
        let mut sql = "CREATE TABLE".to_string();
        if self.if_not_exists {
            sql.push_str(" IF NOT EXISTS");
        }
        sql.push_str(&format!(" {} (", self.name));

        let mut specs = Vec::with_capacity(self.fields.len() + 1 + self.constraints.len());
        for field in &self.fields {
            specs.push(field.sql()?);
        }
        if !self.primary_key.is_empty() {
            specs.push(format!("PRIMARY KEY ({})", self.primary_key.join(",")));
        }
        specs.extend(self.constraints.iter().map(|c| c.sql()));
        sql.push_str(&specs.join(","));
        sql.push(')');

        Ok(vec![RawQuery::new(sql)])
    }

    fn revert_queries(&self) -> Option<Vec<RawQuery>> {
        Some(vec![RawQuery::new(format!("DROP TABLE {}", self.name))])
    }
}

/// Adds one column to an existing table.
#[derive(Debug, Clone)]
pub struct AddColumn {
    table: String,
    spec: FieldSpec,
}

impl AddColumn {
    pub fn new(table: &str, spec: FieldSpec) -> Self {
        Self {
            table: table.to_lowercase(),
            spec,
        }
    }
}

impl DatabaseChange for AddColumn {
    fn forward_queries(&self) -> Result<Vec<RawQuery>> {
        Ok(vec![RawQuery::new(format!(
            "ALTER TABLE {} ADD COLUMN {}",
            self.table,
            self.spec.sql()?
        ))])
    }

    fn revert_queries(&self) -> Option<Vec<RawQuery>> {
        Some(vec![RawQuery::new(format!(
            "ALTER TABLE {} DROP COLUMN {}",
            self.table, self.spec.name
        ))])
    }
}

/// Drops one column. Not revertible: the column's data is gone.
#[derive(Debug, Clone)]
pub struct RemoveColumn {
    table: String,
    name: String,
}

impl RemoveColumn {
    pub fn new(table: &str, name: &str) -> Self {
        Self {
            table: table.to_lowercase(),
            name: name.to_lowercase(),
        }
    }
}

impl DatabaseChange for RemoveColumn {
    fn forward_queries(&self) -> Result<Vec<RawQuery>> {
        Ok(vec![RawQuery::new(format!(
            "ALTER TABLE {} DROP COLUMN {}",
            self.table, self.name
        ))])
    }
}

/// Creates an index named `index_<table>_on_<columns>`.
#[derive(Debug, Clone)]
pub struct AddIndex {
    table: String,
    columns: Vec<String>,
    is_unique: bool,
}

impl AddIndex {
    pub fn new(table: &str, columns: Vec<String>, is_unique: bool) -> Self {
        Self {
            table: table.to_lowercase(),
            columns,
            is_unique,
        }
    }

    fn name(&self) -> String {
        format!("index_{}_on_{}", self.table, self.columns.join("_"))
    }
}

impl DatabaseChange for AddIndex {
    fn forward_queries(&self) -> Result<Vec<RawQuery>> {
        let mut sql = "CREATE".to_string();
        if self.is_unique {
            sql.push_str(" UNIQUE");
        }
        sql.push_str(&format!(
            " INDEX {} ON {} ({})",
            self.name(),
            self.table,
            self.columns.join(",")
        ));
        Ok(vec![RawQuery::new(sql)])
    }

    fn revert_queries(&self) -> Option<Vec<RawQuery>> {
        Some(vec![RawQuery::new(format!(
            "DROP INDEX {} ON {}",
            self.name(),
            self.table
        ))])
    }
}

#[derive(Debug, Clone)]
pub struct CreateSequence {
    name: String,
}

impl CreateSequence {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_lowercase(),
        }
    }
}

impl DatabaseChange for CreateSequence {
    fn forward_queries(&self) -> Result<Vec<RawQuery>> {
        Ok(vec![RawQuery::new(format!(
            "CREATE SEQUENCE {}",
            self.name
        ))])
    }

    fn revert_queries(&self) -> Option<Vec<RawQuery>> {
        Some(vec![RawQuery::new(format!("DROP SEQUENCE {}", self.name))])
    }
}

/// A change expressed directly as raw queries.
#[derive(Debug, Clone)]
pub struct CustomChange {
    forward: Vec<RawQuery>,
    revert: Option<Vec<RawQuery>>,
}

impl CustomChange {
    pub fn new(forward: Vec<RawQuery>, revert: Option<Vec<RawQuery>>) -> Self {
        Self { forward, revert }
    }
}

impl DatabaseChange for CustomChange {
    fn forward_queries(&self) -> Result<Vec<RawQuery>> {
        Ok(self.forward.clone())
    }

    fn revert_queries(&self) -> Option<Vec<RawQuery>> {
        self.revert.clone()
    }
}
