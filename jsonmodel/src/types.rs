//! Declared field types.
//!
//! [`FieldType`] is the declared shape a field expects. During keyed and
//! full-path decode a candidate node is "convertible" when
//! [`FieldType::accepts`] returns `true`; otherwise the candidate is skipped
//! and the mismatch is remembered for the error report.

use serde_json::Value;
use std::fmt;

/// Declared shape of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    /// Any JSON value.
    Any,
    Bool,
    /// A string of exactly one character.
    Char,
    String,
    /// An integer, optionally bounded by width.
    Integer { signed: bool, bits: Option<u8> },
    Float,
    Array(Box<FieldType>),
    /// An object with string keys and uniform values.
    Map(Box<FieldType>),
    /// A nested model or enum, checked by its own decoder.
    Object(String),
}

impl FieldType {
    /// Returns true if `value` has this shape.
    ///
    /// `null` is never accepted; nullability is a property of the field.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => false,
            (Self::Any, _) => true,
            (Self::Bool, Value::Bool(_)) => true,
            (Self::String, Value::String(_)) => true,
            (Self::Char, Value::String(s)) => s.chars().count() == 1,
            (Self::Integer { signed, bits }, Value::Number(n)) => {
                integer_fits(n, *signed, *bits)
            }
            (Self::Float, Value::Number(_)) => true,
            (Self::Array(inner), Value::Array(items)) => {
                items.iter().all(|item| inner.accepts_element(item))
            }
            (Self::Map(inner), Value::Object(map)) => {
                map.values().all(|item| inner.accepts_element(item))
            }
            // Nested types run their own conversion
            (Self::Object(_), _) => true,
            _ => false,
        }
    }

    // Only `Any` has a representation for `null` elements.
    fn accepts_element(&self, item: &Value) -> bool {
        match item {
            Value::Null => matches!(self, Self::Any),
            _ => self.accepts(item),
        }
    }

    /// Human-readable expected shape, used in mismatch errors.
    pub fn name(&self) -> String {
        match self {
            Self::Any => "Any".to_string(),
            Self::Bool => "Bool".to_string(),
            Self::Char => "Char".to_string(),
            Self::String => "String".to_string(),
            Self::Integer {
                signed,
                bits: Some(bits),
            } => format!("{}{}", if *signed { "Int" } else { "UInt" }, bits),
            Self::Integer { signed, bits: None } => {
                if *signed { "Int" } else { "UInt" }.to_string()
            }
            Self::Float => "Float".to_string(),
            Self::Array(inner) => format!("[{}]", inner.name()),
            Self::Map(inner) => format!("[String: {}]", inner.name()),
            Self::Object(name) => name.clone(),
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

fn integer_fits(n: &serde_json::Number, signed: bool, bits: Option<u8>) -> bool {
    let bits = bits.unwrap_or(64).min(64);
    if let Some(v) = n.as_i64() {
        if signed {
            let min = if bits == 64 { i64::MIN } else { -(1i64 << (bits - 1)) };
            let max = if bits == 64 { i64::MAX } else { (1i64 << (bits - 1)) - 1 };
            v >= min && v <= max
        } else {
            v >= 0 && (bits == 64 || (v as u64) < (1u64 << bits))
        }
    } else if let Some(v) = n.as_u64() {
        // Only reached for values above i64::MAX
        !signed && bits == 64 && v > 0
    } else {
        false
    }
}

/// Observed shape of a JSON node, used in mismatch errors.
pub fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
