//! # Qualified Column References
//!
//! A `QualifiedField` identifies one column: a name, an optional owning
//! table, and an optional output alias. All three are normalized to
//! lowercase at construction so that every name comparison in the layer is
//! effectively case-insensitive.
//!
//! Joined selects that pull same-named columns from several tables
//! disambiguate them as `table__name`. [`QualifiedField::possible_keys`]
//! produces the ordered candidate spellings a decode probes against a row,
//! most specific first.

use std::hash::{Hash, Hasher};

use smallvec::{smallvec, SmallVec};

use super::{QueryComponent, SqlText};

/// A column reference with optional table qualifier and output alias.
#[derive(Debug, Clone)]
pub struct QualifiedField {
    pub name: String,
    pub table: Option<String>,
    pub alias: Option<String>,
}

impl QualifiedField {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            table: None,
            alias: None,
        }
    }

    pub fn qualified(table: &str, name: &str) -> Self {
        Self {
            name: name.to_lowercase(),
            table: Some(table.to_lowercase()),
            alias: None,
        }
    }

    pub fn aliased(mut self, alias: &str) -> Self {
        self.alias = Some(alias.to_lowercase());
        self
    }

    /// The ordered column-name candidates to probe against a row.
    ///
    /// An alias is the sole candidate. A table qualifier yields the
    /// joined-select form `table__name`, then `table.name`, then the bare
    /// name. Otherwise the bare name is the only candidate.
    pub fn possible_keys(&self) -> SmallVec<[String; 3]> {
        if let Some(alias) = &self.alias {
            smallvec![alias.clone()]
        } else if let Some(table) = &self.table {
            smallvec![
                format!("{}__{}", table, self.name),
                format!("{}.{}", table, self.name),
                self.name.clone(),
            ]
        } else {
            smallvec![self.name.clone()]
        }
    }

    fn uniqueness_key(&self) -> String {
        if let Some(alias) = &self.alias {
            alias.clone()
        } else if let Some(table) = &self.table {
            format!("{}.{}", table, self.name)
        } else {
            self.name.clone()
        }
    }
}

impl PartialEq for QualifiedField {
    fn eq(&self, other: &Self) -> bool {
        self.uniqueness_key() == other.uniqueness_key()
    }
}

impl Eq for QualifiedField {}

impl Hash for QualifiedField {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.uniqueness_key().hash(state);
    }
}

impl SqlText for QualifiedField {
    fn sql(&self) -> String {
        let mut sql = match &self.table {
            Some(table) => format!("\"{}\".\"{}\"", table, self.name),
            None => self.name.clone(),
        };
        if let Some(alias) = &self.alias {
            sql.push_str(" AS ");
            sql.push_str(alias);
        }
        sql
    }
}

impl QueryComponent for QualifiedField {}
