//! # Driver Contracts
//!
//! The boundary between this layer and a concrete database driver: `Row`
//! for reading one retrieved record, `Connection`/`ResultProvider` for
//! running statements, and the extension traits layering typed access and
//! transactions on top.

mod connection;
mod row;

pub use connection::{number_parameters, Connection, ConnectionExt, ResultProvider};
pub use row::{RawRow, Row, RowExt};

pub(crate) use row::no_value_error;
