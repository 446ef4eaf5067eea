//! # Record Encoding
//!
//! `Encodable` and `Encoder` walk a structured record into an [`Encoded`]
//! tree: leaves are wire [`Value`]s, sub-records become dicts, and
//! sequences become arrays. The tree keeps nested structure until
//! [`Encoder::generate_setters`] flattens it: top-level leaves become
//! setters directly and every dict or array subtree is serialized to a
//! single JSON text value.
//!
//! Inside JSON documents, binary data becomes a base64 string, points
//! become `{"x":…,"y":…}` objects, times become unpadded `"H:M:S"`
//! strings, and dates are the same ISO-8601 strings used on the row wire.

use std::collections::{BTreeMap, HashMap};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use eyre::Result;
use serde_json::json;

use crate::error::EncodeError;
use crate::types::{timestamp, Bytes, Point, Time, Value};

/// The in-progress shape of one encode pass.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Encoded {
    #[default]
    None,
    Leaf(Value),
    Dict(BTreeMap<String, Encoded>),
    Array(Vec<Encoded>),
}

impl Encoded {
    /// Flattens this node into one settable value: leaves pass through,
    /// dicts and arrays serialize to JSON text.
    fn into_value(self) -> Value {
        match self {
            Encoded::None => Value::Null,
            Encoded::Leaf(value) => value,
            Encoded::Dict(_) | Encoded::Array(_) => {
                Value::String(self.json_value().to_string())
            }
        }
    }

    fn json_value(&self) -> serde_json::Value {
        match self {
            Encoded::None => serde_json::Value::Null,
            Encoded::Leaf(value) => leaf_json(value),
            Encoded::Dict(map) => serde_json::Value::Object(
                map.iter()
                    .map(|(key, value)| (key.clone(), value.json_value()))
                    .collect(),
            ),
            Encoded::Array(items) => {
                serde_json::Value::Array(items.iter().map(|item| item.json_value()).collect())
            }
        }
    }
}

fn leaf_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => json!(b),
        Value::String(s) => json!(s),
        Value::Bytes(data) => json!(STANDARD.encode(data)),
        Value::Int(i) | Value::Int64(i) => json!(i),
        Value::Int8(i) => json!(i),
        Value::Int16(i) => json!(i),
        Value::Int32(i) => json!(i),
        Value::UInt(u) | Value::UInt64(u) => json!(u),
        Value::UInt8(u) => json!(u),
        Value::UInt16(u) => json!(u),
        Value::UInt32(u) => json!(u),
        Value::Float32(f) => json!(f),
        Value::Float64(f) => json!(f),
        Value::Point { x, y } => json!({ "x": x, "y": y }),
        Value::Time {
            hour,
            minute,
            second,
        } => json!(format!("{}:{}:{}", hour, minute, second)),
    }
}

/// A record (or fragment of one) that encodes into the tree.
pub trait Encodable {
    fn encode(&self, e: &mut Encoder) -> Result<()>;
}

/// One encode pass building an [`Encoded`] tree.
///
/// Keyed writes, sequence appends, and scalar sets are mutually exclusive
/// shapes for one aggregate; mixing them fails with
/// [`EncodeError::InvalidValueCombination`].
#[derive(Debug, Default)]
pub struct Encoder {
    value: Encoded,
}

impl Encoder {
    pub fn new() -> Self {
        Self {
            value: Encoded::None,
        }
    }

    /// Encodes a keyed field into the aggregate.
    pub fn encode_field(&mut self, key: &str, value: &dyn Encodable) -> Result<()> {
        let mut child = Encoder::new();
        value.encode(&mut child)?;
        match &mut self.value {
            Encoded::None => {
                let mut map = BTreeMap::new();
                map.insert(key.to_lowercase(), child.value);
                self.value = Encoded::Dict(map);
                Ok(())
            }
            Encoded::Dict(map) => {
                map.insert(key.to_lowercase(), child.value);
                Ok(())
            }
            Encoded::Leaf(_) | Encoded::Array(_) => {
                Err(EncodeError::InvalidValueCombination.into())
            }
        }
    }

    /// Appends a sequence element to the aggregate.
    pub fn encode_element(&mut self, value: &dyn Encodable) -> Result<()> {
        let mut child = Encoder::new();
        value.encode(&mut child)?;
        match &mut self.value {
            Encoded::None => {
                self.value = Encoded::Array(vec![child.value]);
                Ok(())
            }
            Encoded::Array(items) => {
                items.push(child.value);
                Ok(())
            }
            Encoded::Leaf(_) | Encoded::Dict(_) => {
                Err(EncodeError::InvalidValueCombination.into())
            }
        }
    }

    /// Sets the aggregate to a single scalar leaf.
    pub fn encode_value(&mut self, value: impl Into<Value>) -> Result<()> {
        match &self.value {
            Encoded::None => {
                self.value = Encoded::Leaf(value.into());
                Ok(())
            }
            _ => Err(EncodeError::InvalidValueCombination.into()),
        }
    }

    /// The encoded tree so far.
    pub fn encoded(&self) -> &Encoded {
        &self.value
    }

    /// Flattens the tree into a column-to-value mapping.
    ///
    /// The root must have finished as a keyed aggregate; fails with
    /// [`EncodeError::InvalidRootValue`] otherwise. Absent optionals become
    /// explicit null setters.
    pub fn generate_setters(self) -> Result<HashMap<String, Value>> {
        match self.value {
            Encoded::Dict(map) => Ok(map
                .into_iter()
                .map(|(key, value)| (key, value.into_value()))
                .collect()),
            _ => Err(EncodeError::InvalidRootValue.into()),
        }
    }
}

/// Encodes a whole record into its column-to-value mapping.
pub fn encode<T: Encodable + ?Sized>(record: &T) -> Result<HashMap<String, Value>> {
    let mut encoder = Encoder::new();
    record.encode(&mut encoder)?;
    encoder.generate_setters()
}

macro_rules! leaf_encodable {
    ($($ty:ty),* $(,)?) => {$(
        impl Encodable for $ty {
            fn encode(&self, e: &mut Encoder) -> Result<()> {
                e.encode_value(self.clone())
            }
        }
    )*};
}

leaf_encodable!(
    Value, bool, String, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, Point, Time, Bytes,
);

impl Encodable for &str {
    fn encode(&self, e: &mut Encoder) -> Result<()> {
        e.encode_value(*self)
    }
}

/// Dates encode as their ISO-8601 string form so they round-trip through
/// the textual wire format.
impl Encodable for DateTime<Utc> {
    fn encode(&self, e: &mut Encoder) -> Result<()> {
        e.encode_value(Value::String(timestamp::format_iso8601(self)))
    }
}

/// An absent optional leaves the child as `None`, which flattens to an
/// explicit null setter rather than an omitted key.
impl<T: Encodable> Encodable for Option<T> {
    fn encode(&self, e: &mut Encoder) -> Result<()> {
        match self {
            Some(value) => value.encode(e),
            None => Ok(()),
        }
    }
}

impl<T: Encodable> Encodable for [T] {
    fn encode(&self, e: &mut Encoder) -> Result<()> {
        for item in self {
            e.encode_element(item)?;
        }
        Ok(())
    }
}

impl<T: Encodable> Encodable for Vec<T> {
    fn encode(&self, e: &mut Encoder) -> Result<()> {
        self.as_slice().encode(e)
    }
}
