//! Decoded field values keyed by field name.
//!
//! A [`Record`] sits between the JSON tree and a typed value: decode fills
//! one per schema in the family, and [`JsonModel::from_record`] moves the
//! values out into struct fields. Encode goes the other way.

use crate::convert::{FromJson, ToJson};
use crate::error::{Error, Result};
use crate::model::JsonModel;
use serde_json::{Map, Value};

/// Field values of one schema plus the record of its parent schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    values: Map<String, Value>,
    parent: Option<Box<Record>>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field value, returning the previous one.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) -> Option<Value> {
        self.values.insert(name.into(), value)
    }

    /// Builder form of [`Record::insert`] for typed values.
    pub fn with(mut self, name: impl Into<String>, value: impl ToJson) -> Self {
        self.insert(name, value.to_json());
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Remove a field value and convert it to `T`.
    ///
    /// Conversion errors carry `name` as their key.
    pub fn take<T: FromJson>(&mut self, name: &str) -> Result<T> {
        let value = self.values.remove(name).ok_or_else(|| Error::missing(name))?;
        T::from_json(&value).map_err(|err| err.with_key(name))
    }

    /// Remove the parent record and convert it to the parent model.
    pub fn take_parent_as<T: JsonModel>(&mut self) -> Result<T> {
        let parent = self
            .parent
            .take()
            .ok_or_else(|| Error::missing(T::schema().name()))?;
        T::from_record(*parent)
    }

    pub fn parent(&self) -> Option<&Record> {
        self.parent.as_deref()
    }

    pub fn set_parent(&mut self, parent: Record) {
        self.parent = Some(Box::new(parent));
    }

    pub fn with_parent(mut self, parent: Record) -> Self {
        self.set_parent(parent);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorCode;
    use serde_json::json;

    #[test]
    fn test_take_converts() {
        let mut record = Record::new().with("age", 30u8).with("name", "ada");
        assert_eq!(record.len(), 2);
        assert_eq!(record.take::<u8>("age").unwrap(), 30);
        assert_eq!(record.take::<String>("name").unwrap(), "ada");
        assert!(record.is_empty());
    }

    #[test]
    fn test_take_missing() {
        let mut record = Record::new();
        let err = record.take::<i32>("id").unwrap_err();
        assert_eq!(err, Error::missing("id"));
    }

    #[test]
    fn test_take_mismatch_names_field() {
        let mut record = Record::new().with("age", "old");
        let err = record.take::<u8>("age").unwrap_err();
        assert_eq!(err.code(), ErrorCode::TypeMismatch);
        assert_eq!(
            err.to_string(),
            "Type mismatch for key 'age': expected UInt8, got string"
        );
    }

    #[test]
    fn test_parent_chain() {
        let record = Record::new()
            .with("x", 1)
            .with_parent(Record::new().with("id", "p"));
        assert_eq!(record.parent().unwrap().get("id"), Some(&json!("p")));
        assert_eq!(record.iter().count(), 1);
    }
}
