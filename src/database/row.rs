//! # Row Access
//!
//! `Row` is the minimal contract a driver implements for one retrieved
//! record: the ordered column names and raw-bytes lookup by name. All
//! typed access layers on top through [`RowExt`], which probes the ordered
//! candidate spellings of a field and hands the winning bytes to the
//! [`FromColumn`](crate::records::FromColumn) parse rules.
//!
//! A row is read-only and scoped to one decode pass; it buffers nothing
//! beyond what the driver already returned for the current row.

use std::collections::HashMap;

use eyre::Result;

use crate::error::SqlError;
use crate::records::{decode_row, Decodable, FromColumn};
use crate::sql::{QualifiedField, SqlText};

/// One retrieved record, exposed as named-column raw byte access.
pub trait Row {
    /// The columns this row's result shape carries.
    fn columns(&self) -> &[String];

    /// Raw bytes for one column, or `None` when the result shape has no
    /// such column.
    fn bytes(&self, column: &str) -> Option<&[u8]>;
}

pub(crate) fn no_value_error(name: &str, columns: &[String]) -> eyre::Report {
    SqlError::with_detail(
        format!("a value for '{}' does not exist", name),
        format!(
            "this result has the following columns: '{}'",
            columns.join("', '")
        ),
    )
    .into()
}

/// Typed access over any [`Row`].
pub trait RowExt: Row {
    /// Raw bytes for the first present candidate column.
    ///
    /// When no candidate is present directly, every row column is split
    /// on `__` and candidates are matched against the suffix after the
    /// last separator. Joined selects that pull every column of several
    /// tables disambiguate same-named columns as `table__field`, while a
    /// decode target may only know its own field name; the suffix scan
    /// bridges the two.
    fn bytes_for(&self, candidates: &[String]) -> Option<&[u8]> {
        for candidate in candidates {
            if let Some(bytes) = self.bytes(candidate) {
                return Some(bytes);
            }
        }

        let mut by_suffix: HashMap<&str, &str> = HashMap::new();
        for column in self.columns() {
            let mut segments = column.split("__");
            let first = segments.next();
            let last = segments.last();
            if let (Some(_), Some(suffix)) = (first, last) {
                by_suffix.insert(suffix, column);
            }
        }
        for candidate in candidates {
            if let Some(column) = by_suffix.get(candidate.as_str()) {
                if let Some(bytes) = self.bytes(column) {
                    return Some(bytes);
                }
            }
        }
        None
    }

    /// Parses the first present candidate column; `Ok(None)` when every
    /// candidate is absent or the bytes parse to no value.
    fn value_for<T: FromColumn>(&self, candidates: &[String]) -> Result<Option<T>> {
        match self.bytes_for(candidates) {
            Some(bytes) => T::from_column(bytes),
            None => Ok(None),
        }
    }

    /// Typed lookup of a required field; fails naming the field and
    /// listing this row's columns.
    fn get<T: FromColumn>(&self, field: &QualifiedField) -> Result<T> {
        match self.get_if_exists(field)? {
            Some(value) => Ok(value),
            None => Err(no_value_error(&field.sql(), self.columns())),
        }
    }

    /// Typed lookup of an optional field.
    fn get_if_exists<T: FromColumn>(&self, field: &QualifiedField) -> Result<Option<T>> {
        self.value_for(&field.possible_keys())
    }

    /// Decodes this whole row into a record, scoped to `table` when given
    /// (else the record's own table declaration).
    fn decode<T: Decodable>(&self, table: Option<&str>) -> Result<T>
    where
        Self: Sized,
    {
        decode_row(self, table)
    }
}

impl<R: Row + ?Sized> RowExt for R {}

/// An in-memory row backed by a name-to-bytes map. Used by tests and by
/// drivers that buffer whole results.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    columns: Vec<String>,
    values: HashMap<String, Vec<u8>>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column, normalizing its name to lowercase.
    pub fn with_column(mut self, name: &str, bytes: impl Into<Vec<u8>>) -> Self {
        let name = name.to_lowercase();
        self.columns.push(name.clone());
        self.values.insert(name, bytes.into());
        self
    }
}

impl Row for RawRow {
    fn columns(&self) -> &[String] {
        &self.columns
    }

    fn bytes(&self, column: &str) -> Option<&[u8]> {
        self.values.get(column).map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_precedence() {
        let row = RawRow::new()
            .with_column("users__id", "7")
            .with_column("id", "999");
        let field = QualifiedField::qualified("users", "id");
        let id: i64 = row.get(&field).unwrap();
        assert_eq!(id, 7);
    }

    #[test]
    fn test_bare_name_fallback() {
        let row = RawRow::new().with_column("id", "42");
        let field = QualifiedField::qualified("users", "id");
        let id: i64 = row.get(&field).unwrap();
        assert_eq!(id, 42);
    }

    #[test]
    fn test_suffix_scan_matches_disambiguated_columns() {
        let row = RawRow::new().with_column("users__id", "7");
        // The target knows only its bare field name.
        let id: Option<i64> = row.value_for(&["id".to_string()]).unwrap();
        assert_eq!(id, Some(7));
    }

    #[test]
    fn test_missing_column_error_lists_columns() {
        let row = RawRow::new().with_column("name", "amelia");
        let err = row.get::<i64>(&QualifiedField::new("id")).unwrap_err();
        let sql_err = err.downcast_ref::<SqlError>().unwrap();
        assert_eq!(sql_err.message, "a value for 'id' does not exist");
        assert_eq!(
            sql_err.more_information.as_deref(),
            Some("this result has the following columns: 'name'")
        );
    }

    #[test]
    fn test_column_names_lowercased() {
        let row = RawRow::new().with_column("Name", "amelia");
        let name: String = row.get(&QualifiedField::new("NAME")).unwrap();
        assert_eq!(name, "amelia");
    }

    #[test]
    fn test_alias_is_sole_candidate() {
        let row = RawRow::new()
            .with_column("uid", "5")
            .with_column("users__id", "7");
        let field = QualifiedField::qualified("users", "id").aliased("uid");
        let id: i64 = row.get(&field).unwrap();
        assert_eq!(id, 5);
    }
}
