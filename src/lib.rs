//! # tabula - Typed Database Access Layer
//!
//! tabula is a typed access layer for PostgreSQL-style databases: a SQL
//! statement builder, a schema-change model, and a bidirectional codec
//! between native structured records and database rows. It prioritizes:
//!
//! - **Typed values end to end**: a closed [`Value`](types::Value) union is
//!   the only currency between records, statements, and the driver
//! - **All-or-nothing codec**: no partial decode or encode ever escapes a
//!   failed call
//! - **Driver agnosticism**: the database itself is reached only through
//!   the minimal [`Connection`](database::Connection) contract
//!
//! ## Quick Start
//!
//! ```ignore
//! use tabula::records::{Decodable, Decoder};
//!
//! struct User {
//!     id: i64,
//!     name: String,
//! }
//!
//! impl Decodable for User {
//!     fn decode(d: &mut Decoder<'_>) -> eyre::Result<Self> {
//!         Ok(User {
//!             id: d.field("id")?,
//!             name: d.field("name")?,
//!         })
//!     }
//!
//!     fn table() -> Option<&'static str> {
//!         Some("users")
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Record Codec (encode / decode)     │
//! ├─────────────────────────────────────┤
//! │  Statement Builder │ Schema Changes  │
//! ├────────────────────┼────────────────┤
//! │        Value Model (types)           │
//! ├─────────────────────────────────────┤
//! │  Connection Contract (external I/O)  │
//! └─────────────────────────────────────┘
//! ```
//!
//! ## Module Overview
//!
//! - [`types`]: the `Value` union, `Point`, `Time`, `Bytes`, column types
//! - [`records`]: record encoding/decoding against rows and JSON blobs
//! - [`sql`]: SELECT/INSERT/UPDATE/DELETE builders, predicates, joins
//! - [`schema`]: field specifications and the database-change DSL
//! - [`database`]: the `Row` and `Connection` contracts, transactions

pub mod database;
pub mod error;
pub mod records;
pub mod schema;
pub mod sql;
pub mod types;

pub use database::{Connection, ConnectionExt, RawRow, ResultProvider, Row, RowExt};
pub use error::{EncodeError, SqlError};
pub use records::{decode_row, encode, Decodable, Decoder, Encodable, Encoder, FromColumn};
pub use sql::QualifiedField;
pub use types::{Bytes, DataType, Point, Time, Value};
