//! # Field Specifications
//!
//! The immutable descriptors a table definition is made of: a column's
//! name and type plus nullability, uniqueness, primary key, foreign-key
//! reference, and an inline-rendered default. Created once when defining
//! a table and never mutated.

use eyre::Result;

use crate::sql::{Parameter, ToParameter};
use crate::types::DataType;

/// Referential action on the referenced row's delete or update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReferenceAction {
    #[default]
    NoAction,
    Cascade,
    SetNull,
    SetDefault,
}

impl ReferenceAction {
    pub fn sql(&self) -> &'static str {
        match self {
            ReferenceAction::NoAction => "NO ACTION",
            ReferenceAction::Cascade => "CASCADE",
            ReferenceAction::SetNull => "SET NULL",
            ReferenceAction::SetDefault => "SET DEFAULT",
        }
    }
}

/// A foreign-key reference to a field in another table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReference {
    pub table: String,
    pub field: String,
    pub on_delete: ReferenceAction,
    pub on_update: ReferenceAction,
}

impl FieldReference {
    pub fn to_field(field: &str, table: &str) -> Self {
        Self {
            table: table.to_lowercase(),
            field: field.to_lowercase(),
            on_delete: ReferenceAction::NoAction,
            on_update: ReferenceAction::NoAction,
        }
    }

    pub fn on_delete(mut self, action: ReferenceAction) -> Self {
        self.on_delete = action;
        self
    }

    pub fn on_update(mut self, action: ReferenceAction) -> Self {
        self.on_update = action;
        self
    }
}

/// A named table constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    pub name: String,
    pub kind: ConstraintKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique(Vec<String>),
}

impl Constraint {
    pub fn unique(name: &str, columns: Vec<String>) -> Self {
        Self {
            name: name.to_lowercase(),
            kind: ConstraintKind::Unique(columns),
        }
    }

    pub fn sql(&self) -> String {
        match &self.kind {
            ConstraintKind::Unique(columns) => {
                format!("CONSTRAINT {} UNIQUE ({})", self.name, columns.join(","))
            }
        }
    }
}

/// One column of a table definition.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub data_type: DataType,
    pub allow_null: bool,
    pub is_unique: bool,
    pub is_primary_key: bool,
    pub references: Option<FieldReference>,
    pub default_value: Option<Parameter>,
}

impl FieldSpec {
    pub fn new(name: &str, data_type: DataType) -> Self {
        Self {
            name: name.to_lowercase(),
            data_type,
            allow_null: true,
            is_unique: false,
            is_primary_key: false,
            references: None,
            default_value: None,
        }
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    pub fn not_null(mut self) -> Self {
        self.allow_null = false;
        self
    }

    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    pub fn references(mut self, reference: FieldReference) -> Self {
        self.references = Some(reference);
        self
    }

    /// Sets a default, rendered inline in the DDL text.
    pub fn default_value(mut self, value: impl ToParameter) -> Self {
        self.default_value = Some(value.to_parameter());
        self
    }

    /// Renders this field's column definition.
    ///
    /// Fails only when the default value cannot be rendered inline
    /// (binary data).
    pub fn sql(&self) -> Result<String> {
        let mut sql = format!("\"{}\" {}", self.name, self.data_type.sql());
        if self.is_primary_key {
            sql.push_str(" PRIMARY KEY");
        }
        if self.is_unique {
            sql.push_str(" UNIQUE");
        }
        if !self.allow_null {
            sql.push_str(" NOT NULL");
        }
        if let Some(default_value) = &self.default_value {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default_value.rendered()?);
        }
        if let Some(references) = &self.references {
            sql.push_str(&format!(
                " REFERENCES {}({}) ON DELETE {} ON UPDATE {}",
                references.table,
                references.field,
                references.on_delete.sql(),
                references.on_update.sql()
            ));
        }
        Ok(sql)
    }
}
