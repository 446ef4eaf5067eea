//! # Error Types
//!
//! Two concrete error types back the layer's failure taxonomy: `SqlError`
//! carries a message plus optional extra detail and wraps everything from
//! primitive parse failures to driver-reported execution errors;
//! `EncodeError` names the two structural misuses an encode pass can hit.
//! Both convert into `eyre::Report`, which is what every fallible API in
//! the crate returns.

use thiserror::Error;

/// Uniform error for value parsing, row access, and statement execution.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SqlError {
    pub message: String,
    pub more_information: Option<String>,
}

impl SqlError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            more_information: None,
        }
    }

    pub fn with_detail(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            more_information: Some(detail.into()),
        }
    }
}

/// Structural misuse of the encoding engine.
///
/// A single encode pass owns one in-progress aggregate. Keyed writes,
/// sequence appends, and scalar sets are mutually exclusive shapes for
/// that aggregate, and the root must finish as a keyed aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EncodeError {
    #[error("encoding a mixture of unkeyed, keyed, and regular values is not supported")]
    InvalidValueCombination,
    #[error("the root value encoded must be keyed")]
    InvalidRootValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sql_error_display() {
        let err = SqlError::with_detail("invalid i32 value", "was 'abc'");
        assert_eq!(err.to_string(), "invalid i32 value");
        assert_eq!(err.more_information.as_deref(), Some("was 'abc'"));
    }

    #[test]
    fn test_encode_error_display() {
        assert_eq!(
            EncodeError::InvalidRootValue.to_string(),
            "the root value encoded must be keyed"
        );
    }
}
