//! # Record Codec
//!
//! The bidirectional codec between native structured records and database
//! rows. Decoding walks a record description against one row, resolving
//! candidate column names and parsing raw bytes; encoding walks a record
//! into a tree of wire values that flattens to a column-to-value mapping
//! for INSERT/UPDATE setters.
//!
//! Each encode or decode call owns its private accumulator, so concurrent
//! codec calls need no locking.

mod column;
mod decoder;
mod encoder;
pub mod json;

pub use column::FromColumn;
pub use decoder::{decode_row, Decodable, Decoder};
pub use encoder::{encode, Encodable, Encoded, Encoder};
