//! # Record Decoding
//!
//! `Decodable` and `Decoder` walk a structured record field by field
//! against one [`Row`](crate::database::Row). For each field the decoder
//! resolves candidate column names (carrying the record's table context),
//! probes the row, and parses the bytes with the [`FromColumn`] rules.
//!
//! Nested records decode natively first, with a decoder scoped to the
//! nested type's own table: a joined select that materializes another
//! table's columns as `table__field` decodes this way. When native decode
//! fails the raw bytes are decoded as a complete JSON document instead,
//! which serves JSON blob columns holding a serialized sub-object. Both
//! shapes go through the same call site.

use eyre::Result;
use serde::de::DeserializeOwned;
use smallvec::SmallVec;
use tracing::debug;

use super::FromColumn;
use crate::database::{no_value_error, Row, RowExt};
use crate::error::SqlError;
use crate::sql::QualifiedField;

/// A record that decodes from a row.
pub trait Decodable: Sized {
    fn decode(d: &mut Decoder<'_>) -> Result<Self>;

    /// The table this record belongs to, if any. Provides the column-name
    /// disambiguation context for joined selects.
    fn table() -> Option<&'static str> {
        None
    }
}

/// One decode pass over one row.
pub struct Decoder<'r> {
    row: &'r dyn Row,
    table: Option<String>,
    path: Vec<String>,
}

impl<'r> Decoder<'r> {
    pub fn new(row: &'r dyn Row, table: Option<&str>) -> Self {
        Self {
            row,
            table: table.map(|t| t.to_lowercase()),
            path: Vec::new(),
        }
    }

    fn candidates(&self, name: &str) -> SmallVec<[String; 3]> {
        match &self.table {
            Some(table) => QualifiedField::qualified(table, name).possible_keys(),
            None => QualifiedField::new(name).possible_keys(),
        }
    }

    /// Decodes a required primitive field.
    ///
    /// An absent column falls back to the primitive's missing default
    /// (booleans decode to `false`); primitives without one fail, naming
    /// the field and listing the row's columns.
    pub fn field<T: FromColumn>(&mut self, name: &str) -> Result<T> {
        match self.field_opt(name)? {
            Some(value) => Ok(value),
            None => match T::missing_default() {
                Some(value) => Ok(value),
                None => Err(no_value_error(name, self.row.columns())),
            },
        }
    }

    /// Decodes an optional primitive field; absent columns become `None`.
    pub fn field_opt<T: FromColumn>(&mut self, name: &str) -> Result<Option<T>> {
        self.row.value_for(&self.candidates(name))
    }

    /// Decodes a required nested record.
    pub fn nested<T: Decodable + DeserializeOwned>(&mut self, name: &str) -> Result<T> {
        match self.nested_opt(name)? {
            Some(value) => Ok(value),
            None => Err(no_value_error(name, self.row.columns())),
        }
    }

    /// Decodes an optional nested record.
    ///
    /// Native decode runs first, scoped to the nested type's own table if
    /// it declares one, else this decoder's. On native failure the field's
    /// raw bytes are decoded as one JSON document; no bytes at all means
    /// the record is absent.
    pub fn nested_opt<T: Decodable + DeserializeOwned>(
        &mut self,
        name: &str,
    ) -> Result<Option<T>> {
        let table = T::table()
            .map(|t| t.to_lowercase())
            .or_else(|| self.table.clone());
        let mut path = self.path.clone();
        path.push(name.to_lowercase());
        let mut child = Decoder {
            row: self.row,
            table,
            path,
        };

        let native_error = match T::decode(&mut child) {
            Ok(value) => return Ok(Some(value)),
            Err(error) => error,
        };

        let Some(bytes) = self.row.bytes_for(&self.candidates(name)) else {
            return Ok(None);
        };
        debug!(field = name, error = %native_error, "native row decode failed, decoding as json");
        let value = serde_json::from_slice(bytes).map_err(|error| {
            SqlError::with_detail(
                format!("invalid json value for '{}'", name),
                error.to_string(),
            )
        })?;
        Ok(Some(value))
    }

    /// Decodes a record represented as one scalar, keyed by the last
    /// segment of the path used to reach it.
    pub fn scalar<T: FromColumn>(&mut self) -> Result<T> {
        let Some(name) = self.path.last().cloned() else {
            return Err(
                SqlError::new("decoding a single value at the root is not supported").into(),
            );
        };
        self.field(&name)
    }

    /// Unkeyed containers at the row level are structural misuse.
    pub fn unkeyed<T>(&mut self) -> Result<T> {
        Err(SqlError::new("decoding an unkeyed container is not supported").into())
    }

    /// Keyed sub-containers that are not full nested-record decodes are
    /// structural misuse.
    pub fn nested_container<T>(&mut self, _name: &str) -> Result<T> {
        Err(SqlError::new("decoding nested containers is not supported").into())
    }
}

/// Decodes one row into a record.
///
/// `table` overrides the record's own [`Decodable::table`] declaration
/// when given.
pub fn decode_row<T: Decodable>(row: &dyn Row, table: Option<&str>) -> Result<T> {
    let table = table.or_else(|| T::table());
    let mut decoder = Decoder::new(row, table);
    T::decode(&mut decoder)
}
