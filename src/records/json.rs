//! # JSON Field Helpers
//!
//! Serde helpers for record types that derive `Serialize`/`Deserialize`
//! for the JSON blob path.

/// Serializes a raw `Vec<u8>` field as a base64 string, the form binary
/// data takes inside JSON documents.
///
/// ```ignore
/// #[derive(Serialize, Deserialize)]
/// struct Attachment {
///     #[serde(with = "tabula::records::json::base64_bytes")]
///     payload: Vec<u8>,
/// }
/// ```
pub mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD
            .decode(text.as_bytes())
            .map_err(|e| D::Error::custom(format!("invalid base64 data: {}", e)))
    }
}
