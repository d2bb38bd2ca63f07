//! Value transformers.
//!
//! A transformer maps a present, non-null JSON node to an optional value.
//! Returning `None` is the same as the candidate key being absent: decode
//! moves on to the next candidate key and finally to the field's default.
//!
//! Transformers are stored per field as a plain function value
//! ([`Transformer`]). The [`Transform`] trait is the typed way to write one;
//! [`transformer`] turns it into the stored form.
//!
//! # Built-ins
//!
//! | Transformer | Accepts | Output |
//! |-------------|---------|--------|
//! | [`LenientInt`] | integers, integral floats, numeric strings | `i64` |
//! | [`LenientFloat`] | numbers, numeric strings | `f64` |
//! | [`LenientBool`] | booleans, `0`/`1`, `"true"`/`"false"`/`"1"`/`"0"` | `bool` |
//! | [`NonEmptyString`] | strings with non-whitespace content | `String` |
//!
//! # Example
//! ```rust
//! use jsonmodel::transform::{transformer, LenientInt};
//! use serde_json::json;
//!
//! let lenient = transformer::<LenientInt>();
//! assert_eq!(lenient(&json!("42")), Some(json!(42)));
//! assert_eq!(lenient(&json!("forty-two")), None);
//! ```

use crate::convert::ToJson;
use serde_json::Value;
use std::sync::Arc;

/// Stored form of a field transformer.
pub type Transformer = Arc<dyn Fn(&Value) -> Option<Value> + Send + Sync>;

/// A typed transformer.
pub trait Transform {
    /// Value produced by the transform.
    type Output: ToJson;

    /// Convert a node, or return `None` to fall back.
    fn transform(value: &Value) -> Option<Self::Output>;
}

/// Build the stored transformer for `T`.
pub fn transformer<T: Transform + 'static>() -> Transformer {
    Arc::new(|value: &Value| T::transform(value).map(|output| output.to_json()))
}

/// Integers from numbers or numeric strings.
#[derive(Debug, Clone, Copy)]
pub struct LenientInt;

impl Transform for LenientInt {
    type Output = i64;

    fn transform(value: &Value) -> Option<i64> {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

/// Floats from numbers or numeric strings.
#[derive(Debug, Clone, Copy)]
pub struct LenientFloat;

impl Transform for LenientFloat {
    type Output = f64;

    fn transform(value: &Value) -> Option<f64> {
        match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
            _ => None,
        }
    }
}

/// Booleans from booleans, `0`/`1` and their string forms.
#[derive(Debug, Clone, Copy)]
pub struct LenientBool;

impl Transform for LenientBool {
    type Output = bool;

    fn transform(value: &Value) -> Option<bool> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Strings that are not empty or whitespace-only.
#[derive(Debug, Clone, Copy)]
pub struct NonEmptyString;

impl Transform for NonEmptyString {
    type Output = String;

    fn transform(value: &Value) -> Option<String> {
        value
            .as_str()
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lenient_int() {
        assert_eq!(LenientInt::transform(&json!(5)), Some(5));
        assert_eq!(LenientInt::transform(&json!(5.0)), Some(5));
        assert_eq!(LenientInt::transform(&json!(5.5)), None);
        assert_eq!(LenientInt::transform(&json!(" -12 ")), Some(-12));
        assert_eq!(LenientInt::transform(&json!(true)), None);
    }

    #[test]
    fn test_lenient_float() {
        assert_eq!(LenientFloat::transform(&json!("2.5")), Some(2.5));
        assert_eq!(LenientFloat::transform(&json!(3)), Some(3.0));
        assert_eq!(LenientFloat::transform(&json!("NaN")), None);
    }

    #[test]
    fn test_lenient_bool() {
        assert_eq!(LenientBool::transform(&json!("TRUE")), Some(true));
        assert_eq!(LenientBool::transform(&json!(0)), Some(false));
        assert_eq!(LenientBool::transform(&json!("0")), Some(false));
        assert_eq!(LenientBool::transform(&json!(2)), None);
        assert_eq!(LenientBool::transform(&json!("yes")), None);
    }

    #[test]
    fn test_non_empty_string() {
        assert_eq!(NonEmptyString::transform(&json!("a")), Some("a".into()));
        assert_eq!(NonEmptyString::transform(&json!("  ")), None);
        assert_eq!(NonEmptyString::transform(&json!(1)), None);
    }

    #[test]
    fn test_stored_transformer() {
        let f = transformer::<LenientBool>();
        assert_eq!(f(&json!("1")), Some(json!(true)));
        assert_eq!(f(&json!({})), None);
    }
}
