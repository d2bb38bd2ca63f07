//! Error types for schema construction and codec operations.
//!
//! Decode and encode failures are local to a single call; schema-build
//! failures are raised by [`SchemaBuilder::build`](crate::SchemaBuilder::build)
//! before any value is decoded with the schema.
//!
//! # Error Codes
//!
//! Every [`Error`] maps to an [`ErrorCode`]. Codec errors keep the numeric
//! codes `1001`-`1004`; schema errors use the `2xxx` range.
//!
//! # Example
//! ```rust
//! use jsonmodel::{Error, ErrorCode};
//!
//! let err = Error::missing("user_id");
//! assert_eq!(err.code(), ErrorCode::MissingRequiredField);
//! assert_eq!(err.to_string(), "Missing required key: 'user_id'");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Type-safe error codes.
///
/// When serialized, codes are converted to SCREAMING_SNAKE_CASE
/// (e.g., `TypeMismatch` becomes `"TYPE_MISMATCH"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Codec errors
    /// A present value had the wrong shape
    TypeMismatch,
    /// A required field had no satisfiable candidate
    MissingRequiredField,
    /// A value had the right shape but was rejected
    InvalidValue,
    /// The payload was not valid JSON
    InvalidData,

    // Schema-build errors
    /// Two identifiers of one schema collide
    SchemaConflict,
    /// A non-nullable field declares no default
    MissingDefault,
    /// A field's candidate keys are malformed
    InvalidKeys,
}

impl ErrorCode {
    /// Returns the string representation of the error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TypeMismatch => "TYPE_MISMATCH",
            Self::MissingRequiredField => "MISSING_REQUIRED_FIELD",
            Self::InvalidValue => "INVALID_VALUE",
            Self::InvalidData => "INVALID_DATA",
            Self::SchemaConflict => "SCHEMA_CONFLICT",
            Self::MissingDefault => "MISSING_DEFAULT",
            Self::InvalidKeys => "INVALID_KEYS",
        }
    }

    /// Numeric code.
    pub fn as_u16(&self) -> u16 {
        match self {
            Self::TypeMismatch => 1001,
            Self::MissingRequiredField => 1002,
            Self::InvalidValue => 1003,
            Self::InvalidData => 1004,
            Self::SchemaConflict => 2001,
            Self::MissingDefault => 2002,
            Self::InvalidKeys => 2003,
        }
    }

    /// Returns true if this error can only be raised while building a schema.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            Self::SchemaConflict | Self::MissingDefault | Self::InvalidKeys
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors raised by schema construction, decoding and encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A present value could not be converted to the declared type.
    #[error("{}", mismatch_message(.expected, .actual, .key.as_deref()))]
    TypeMismatch {
        expected: String,
        actual: String,
        key: Option<String>,
    },

    /// No candidate key produced a value and the field has no default.
    #[error("Missing required key: '{key}'")]
    MissingRequiredField { key: String },

    /// The value has an acceptable shape but is semantically invalid.
    #[error("{}", invalid_message(.key.as_deref(), .reason))]
    InvalidValue { key: Option<String>, reason: String },

    /// The payload could not be parsed as JSON.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Two identifiers of one schema collide.
    #[error("Schema conflict: '{name}' conflicts with '{other}'")]
    SchemaConflict { name: String, other: String },

    /// A non-nullable field declares neither a default nor `required`.
    #[error("Field '{field}' is not nullable and declares no default value")]
    MissingDefault { field: String },

    /// A field's candidate keys are malformed.
    #[error("Invalid keys for field '{field}': {reason}")]
    InvalidKeys { field: String, reason: String },
}

fn mismatch_message(expected: &str, actual: &str, key: Option<&str>) -> String {
    match key {
        Some(key) => format!("Type mismatch for key '{key}': expected {expected}, got {actual}"),
        None => format!("Type mismatch: expected {expected}, got {actual}"),
    }
}

fn invalid_message(key: Option<&str>, reason: &str) -> String {
    match key {
        Some(key) => format!("Invalid value for key '{key}': {reason}"),
        None => format!("Invalid value: {reason}"),
    }
}

impl Error {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            Self::MissingRequiredField { .. } => ErrorCode::MissingRequiredField,
            Self::InvalidValue { .. } => ErrorCode::InvalidValue,
            Self::InvalidData(_) => ErrorCode::InvalidData,
            Self::SchemaConflict { .. } => ErrorCode::SchemaConflict,
            Self::MissingDefault { .. } => ErrorCode::MissingDefault,
            Self::InvalidKeys { .. } => ErrorCode::InvalidKeys,
        }
    }

    // Convenience constructors

    /// Create a TYPE_MISMATCH error without key context.
    pub fn mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
            key: None,
        }
    }

    /// Create a MISSING_REQUIRED_FIELD error.
    pub fn missing(key: impl Into<String>) -> Self {
        Self::MissingRequiredField { key: key.into() }
    }

    /// Create an INVALID_VALUE error.
    pub fn invalid(key: Option<&str>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.map(str::to_string),
            reason: reason.into(),
        }
    }

    /// Create a SCHEMA_CONFLICT error.
    pub fn conflict(name: impl Into<String>, other: impl Into<String>) -> Self {
        Self::SchemaConflict {
            name: name.into(),
            other: other.into(),
        }
    }

    /// Create an INVALID_KEYS error.
    pub fn invalid_keys(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidKeys {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Attach key context to mismatch and invalid-value errors that lack it.
    pub fn with_key(self, key: &str) -> Self {
        match self {
            Self::TypeMismatch {
                expected,
                actual,
                key: None,
            } => Self::TypeMismatch {
                expected,
                actual,
                key: Some(key.to_string()),
            },
            Self::InvalidValue { key: None, reason } => Self::InvalidValue {
                key: Some(key.to_string()),
                reason,
            },
            other => other,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidData(err.to_string())
    }
}

/// Result type alias for jsonmodel operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(ErrorCode::TypeMismatch.as_u16(), 1001);
        assert_eq!(ErrorCode::MissingRequiredField.as_u16(), 1002);
        assert_eq!(ErrorCode::InvalidValue.as_u16(), 1003);
        assert_eq!(ErrorCode::InvalidData.as_u16(), 1004);
        assert!(ErrorCode::SchemaConflict.is_schema_error());
        assert!(!ErrorCode::TypeMismatch.is_schema_error());
    }

    #[test]
    fn test_error_code_serialization() {
        let json = serde_json::to_string(&ErrorCode::MissingRequiredField).unwrap();
        assert_eq!(json, "\"MISSING_REQUIRED_FIELD\"");
        assert_eq!(ErrorCode::InvalidKeys.to_string(), "INVALID_KEYS");
    }

    #[test]
    fn test_messages() {
        let err = Error::mismatch("Int", "string");
        assert_eq!(err.to_string(), "Type mismatch: expected Int, got string");

        let err = err.with_key("age");
        assert_eq!(
            err.to_string(),
            "Type mismatch for key 'age': expected Int, got string"
        );

        let err = Error::invalid(None, "not a URL");
        assert_eq!(err.to_string(), "Invalid value: not a URL");
        assert_eq!(
            err.with_key("site").to_string(),
            "Invalid value for key 'site': not a URL"
        );
    }

    #[test]
    fn test_with_key_keeps_existing_key() {
        let err = Error::TypeMismatch {
            expected: "Int".into(),
            actual: "bool".into(),
            key: Some("inner".into()),
        };
        assert_eq!(err.clone().with_key("outer"), err);
        assert_eq!(
            Error::missing("a").with_key("b"),
            Error::missing("a"),
            "missing-field errors keep their own key"
        );
    }

    #[test]
    fn test_from_serde_json_error() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert_eq!(err.code(), ErrorCode::InvalidData);
    }
}
