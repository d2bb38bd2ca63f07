//! Typed conversion between Rust values and JSON nodes.
//!
//! | Trait | Direction | Failure |
//! |-------|-----------|---------|
//! | [`FromJson`] | node → value | [`Error::TypeMismatch`] / [`Error::InvalidValue`] |
//! | [`ToJson`] | value → node | infallible |
//! | [`JsonType`] | declared shape | n/a |
//!
//! `Option<T>` converts `null` and unconvertible nodes to `None`.

use crate::error::{Error, Result};
use crate::types::{FieldType, shape_of};
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Decode a typed value from a JSON node.
pub trait FromJson: Sized {
    fn from_json(value: &Value) -> Result<Self>;
}

/// Export a typed value as a JSON node.
pub trait ToJson {
    fn to_json(&self) -> Value;
}

/// The declared JSON shape of a Rust type.
pub trait JsonType {
    /// Whether a missing value may decode to `null`.
    const NULLABLE: bool = false;

    fn field_type() -> FieldType;

    /// Returns true if a non-null `value` converts to this type.
    fn accepts(value: &Value) -> bool {
        Self::field_type().accepts(value)
    }
}

fn mismatch<T: JsonType>(value: &Value) -> Error {
    Error::mismatch(T::field_type().name(), shape_of(value))
}

// =============================================================================
// Scalars
// =============================================================================

impl JsonType for bool {
    fn field_type() -> FieldType {
        FieldType::Bool
    }
}

impl FromJson for bool {
    fn from_json(value: &Value) -> Result<Self> {
        value.as_bool().ok_or_else(|| mismatch::<Self>(value))
    }
}

impl ToJson for bool {
    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

macro_rules! impl_signed {
    ($($ty:ty => $bits:expr),* $(,)?) => {
        $(
            impl JsonType for $ty {
                fn field_type() -> FieldType {
                    FieldType::Integer { signed: true, bits: Some($bits) }
                }
            }

            impl FromJson for $ty {
                fn from_json(value: &Value) -> Result<Self> {
                    value
                        .as_i64()
                        .and_then(|n| <$ty>::try_from(n).ok())
                        .ok_or_else(|| mismatch::<Self>(value))
                }
            }

            impl ToJson for $ty {
                fn to_json(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

macro_rules! impl_unsigned {
    ($($ty:ty => $bits:expr),* $(,)?) => {
        $(
            impl JsonType for $ty {
                fn field_type() -> FieldType {
                    FieldType::Integer { signed: false, bits: Some($bits) }
                }
            }

            impl FromJson for $ty {
                fn from_json(value: &Value) -> Result<Self> {
                    value
                        .as_u64()
                        .and_then(|n| <$ty>::try_from(n).ok())
                        .ok_or_else(|| mismatch::<Self>(value))
                }
            }

            impl ToJson for $ty {
                fn to_json(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

impl_signed!(i8 => 8, i16 => 16, i32 => 32, i64 => 64, isize => 64);
impl_unsigned!(u8 => 8, u16 => 16, u32 => 32, u64 => 64, usize => 64);

macro_rules! impl_float {
    ($($ty:ty),*) => {
        $(
            impl JsonType for $ty {
                fn field_type() -> FieldType {
                    FieldType::Float
                }
            }

            impl FromJson for $ty {
                fn from_json(value: &Value) -> Result<Self> {
                    value
                        .as_f64()
                        .map(|n| n as $ty)
                        .ok_or_else(|| mismatch::<Self>(value))
                }
            }

            impl ToJson for $ty {
                fn to_json(&self) -> Value {
                    Value::from(*self)
                }
            }
        )*
    };
}

impl_float!(f32, f64);

impl JsonType for char {
    fn field_type() -> FieldType {
        FieldType::Char
    }
}

impl FromJson for char {
    fn from_json(value: &Value) -> Result<Self> {
        let s = value.as_str().ok_or_else(|| mismatch::<Self>(value))?;
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Error::invalid(None, format!("expected one character, got {s:?}"))),
        }
    }
}

impl ToJson for char {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl JsonType for String {
    fn field_type() -> FieldType {
        FieldType::String
    }
}

impl FromJson for String {
    fn from_json(value: &Value) -> Result<Self> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| mismatch::<Self>(value))
    }
}

impl ToJson for String {
    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToJson for str {
    fn to_json(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl JsonType for Value {
    const NULLABLE: bool = true;

    fn field_type() -> FieldType {
        FieldType::Any
    }
}

impl FromJson for Value {
    fn from_json(value: &Value) -> Result<Self> {
        Ok(value.clone())
    }
}

impl ToJson for Value {
    fn to_json(&self) -> Value {
        self.clone()
    }
}

// =============================================================================
// Wrappers and containers
// =============================================================================

impl<T: JsonType> JsonType for Option<T> {
    const NULLABLE: bool = true;

    fn field_type() -> FieldType {
        T::field_type()
    }

    fn accepts(value: &Value) -> bool {
        T::accepts(value)
    }
}

impl<T: FromJson> FromJson for Option<T> {
    fn from_json(value: &Value) -> Result<Self> {
        if value.is_null() {
            return Ok(None);
        }
        Ok(T::from_json(value).ok())
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn to_json(&self) -> Value {
        match self {
            Some(value) => value.to_json(),
            None => Value::Null,
        }
    }
}

impl<T: JsonType> JsonType for Box<T> {
    const NULLABLE: bool = T::NULLABLE;

    fn field_type() -> FieldType {
        T::field_type()
    }

    fn accepts(value: &Value) -> bool {
        T::accepts(value)
    }
}

impl<T: FromJson> FromJson for Box<T> {
    fn from_json(value: &Value) -> Result<Self> {
        T::from_json(value).map(Box::new)
    }
}

impl<T: ToJson + ?Sized> ToJson for Box<T> {
    fn to_json(&self) -> Value {
        (**self).to_json()
    }
}

impl<T: ToJson + ?Sized> ToJson for &T {
    fn to_json(&self) -> Value {
        (**self).to_json()
    }
}

impl<T: JsonType> JsonType for Vec<T> {
    fn field_type() -> FieldType {
        FieldType::Array(Box::new(T::field_type()))
    }

    fn accepts(value: &Value) -> bool {
        value
            .as_array()
            .is_some_and(|items| items.iter().all(element_accepts::<T>))
    }
}

impl<T: FromJson> FromJson for Vec<T> {
    fn from_json(value: &Value) -> Result<Self> {
        let items = value.as_array().ok_or_else(|| {
            Error::mismatch("Array", shape_of(value))
        })?;
        items.iter().map(T::from_json).collect()
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn to_json(&self) -> Value {
        self.as_slice().to_json()
    }
}

impl<T: ToJson> ToJson for [T] {
    fn to_json(&self) -> Value {
        Value::Array(self.iter().map(ToJson::to_json).collect())
    }
}

fn map_entries<T: FromJson>(value: &Value) -> Result<impl Iterator<Item = Result<(String, T)>>> {
    let map = value
        .as_object()
        .ok_or_else(|| Error::mismatch("Dictionary", shape_of(value)))?;
    Ok(map.iter().map(|(key, item)| {
        T::from_json(item)
            .map(|item| (key.clone(), item))
            .map_err(|err| Error::invalid(Some(key.as_str()), err.to_string()))
    }))
}

fn map_accepts<T: JsonType>(value: &Value) -> bool {
    value
        .as_object()
        .is_some_and(|map| map.values().all(element_accepts::<T>))
}

/// Container elements may only be `null` when `T` itself decodes `null`.
fn element_accepts<T: JsonType>(item: &Value) -> bool {
    if item.is_null() {
        T::NULLABLE
    } else {
        T::accepts(item)
    }
}

impl<T: JsonType, S> JsonType for HashMap<String, T, S> {
    fn field_type() -> FieldType {
        FieldType::Map(Box::new(T::field_type()))
    }

    fn accepts(value: &Value) -> bool {
        map_accepts::<T>(value)
    }
}

impl<T: FromJson, S: BuildHasher + Default> FromJson for HashMap<String, T, S> {
    fn from_json(value: &Value) -> Result<Self> {
        map_entries(value)?.collect()
    }
}

impl<T: ToJson, S> ToJson for HashMap<String, T, S> {
    fn to_json(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect(),
        )
    }
}

impl<T: JsonType> JsonType for BTreeMap<String, T> {
    fn field_type() -> FieldType {
        FieldType::Map(Box::new(T::field_type()))
    }

    fn accepts(value: &Value) -> bool {
        map_accepts::<T>(value)
    }
}

impl<T: FromJson> FromJson for BTreeMap<String, T> {
    fn from_json(value: &Value) -> Result<Self> {
        map_entries(value)?.collect()
    }
}

impl<T: ToJson> ToJson for BTreeMap<String, T> {
    fn to_json(&self) -> Value {
        Value::Object(
            self.iter()
                .map(|(key, value)| (key.clone(), value.to_json()))
                .collect::<Map<String, Value>>(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_integers() {
        assert_eq!(i32::from_json(&json!(-7)).unwrap(), -7);
        assert_eq!(u8::from_json(&json!(255)).unwrap(), 255);
        let err = u8::from_json(&json!(256)).unwrap_err();
        assert_eq!(err.to_string(), "Type mismatch: expected UInt8, got number");
        let err = i64::from_json(&json!("12")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::TypeMismatch);
    }

    #[test]
    fn test_floats_accept_integers() {
        assert_eq!(f64::from_json(&json!(2)).unwrap(), 2.0);
        assert_eq!(f32::from_json(&json!(1.5)).unwrap(), 1.5);
        assert_eq!(f64::NAN.to_json(), Value::Null);
    }

    #[test]
    fn test_char() {
        assert_eq!(char::from_json(&json!("x")).unwrap(), 'x');
        let err = char::from_json(&json!("xy")).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidValue);
    }

    #[test]
    fn test_option_swallows_errors() {
        assert_eq!(Option::<i32>::from_json(&Value::Null).unwrap(), None);
        assert_eq!(Option::<i32>::from_json(&json!("nope")).unwrap(), None);
        assert_eq!(Option::<i32>::from_json(&json!(3)).unwrap(), Some(3));
        assert!(<Option<i32> as JsonType>::NULLABLE);
        assert!(!<i32 as JsonType>::NULLABLE);
    }

    #[test]
    fn test_vec() {
        assert_eq!(Vec::<u16>::from_json(&json!([1, 2])).unwrap(), vec![1, 2]);
        assert!(Vec::<u16>::from_json(&json!([1, -2])).is_err());
        assert_eq!(vec![Some(1), None].to_json(), json!([1, null]));
    }

    #[test]
    fn test_map_entry_errors_name_the_entry() {
        let map = BTreeMap::<String, i32>::from_json(&json!({"a": 1, "b": 2})).unwrap();
        assert_eq!(map.get("b"), Some(&2));

        let err = HashMap::<String, i32>::from_json(&json!({"bad": "x"})).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidValue);
        assert!(err.to_string().starts_with("Invalid value for key 'bad'"));
    }

    #[test]
    fn test_null_elements_follow_nullability() {
        assert!(!Vec::<i32>::accepts(&json!([1, null])));
        assert!(Vec::<Option<i32>>::accepts(&json!([1, null])));
        assert!(Vec::<Value>::accepts(&json!([null])));
        assert!(!BTreeMap::<String, i32>::accepts(&json!({"a": null})));
        assert!(BTreeMap::<String, Option<i32>>::accepts(&json!({"a": null})));
    }

    #[test]
    fn test_field_types() {
        assert_eq!(
            <Vec<Option<String>>>::field_type(),
            FieldType::Array(Box::new(FieldType::String))
        );
        assert_eq!(<BTreeMap<String, bool>>::field_type().name(), "[String: Bool]");
    }
}
