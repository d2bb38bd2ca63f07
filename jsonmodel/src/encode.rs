//! Schema-driven encoding.
//!
//! Two distinct outputs:
//!
//! | Operation | Null fields | Used by |
//! |-----------|-------------|---------|
//! | [`encode_keyed`] | nullable `null` fields omitted | keyed schema families |
//! | [`export_tree`] | written as explicit `null` | full-path families, documents for other consumers |
//!
//! Both write each field at its primary key, parent fields first, and merge
//! the child's fields over the parent's in one flat key space.

use crate::error::Result;
use crate::inherit::merge_into;
use crate::path;
use crate::record::Record;
use crate::schema::{CodecStrategy, SchemaDescriptor};
use serde_json::{Map, Value};

/// Sparse keyed encode.
pub fn encode_keyed(schema: &SchemaDescriptor, record: &Record) -> Map<String, Value> {
    encode_with(schema, record, true)
}

/// Complete tree export with explicit `null`s.
pub fn export_tree(schema: &SchemaDescriptor, record: &Record) -> Value {
    Value::Object(encode_with(schema, record, false))
}

/// Serialize with the family's strategy.
pub fn encode_to_vec(schema: &SchemaDescriptor, record: &Record) -> Result<Vec<u8>> {
    let bytes = match schema.family_strategy() {
        CodecStrategy::Keyed => serde_json::to_vec(&encode_keyed(schema, record))?,
        CodecStrategy::FullPath => serde_json::to_vec(&export_tree(schema, record))?,
    };
    Ok(bytes)
}

/// Serialize with the family's strategy.
pub fn encode_to_string(schema: &SchemaDescriptor, record: &Record) -> Result<String> {
    let text = match schema.family_strategy() {
        CodecStrategy::Keyed => serde_json::to_string(&encode_keyed(schema, record))?,
        CodecStrategy::FullPath => serde_json::to_string(&export_tree(schema, record))?,
    };
    Ok(text)
}

fn encode_with(schema: &SchemaDescriptor, record: &Record, sparse: bool) -> Map<String, Value> {
    let mut out = match schema.parent() {
        Some(parent) => {
            let empty = Record::new();
            encode_with(parent, record.parent().unwrap_or(&empty), sparse)
        }
        None => Map::new(),
    };

    let mut own = Value::Object(Map::new());
    for field in schema.fields() {
        let value = match record.get(field.name()) {
            Some(value) => value.clone(),
            None => {
                tracing::debug!(schema = %schema.name(), field = %field.name(), "field missing from record, writing null");
                Value::Null
            }
        };
        if sparse && value.is_null() && field.is_nullable() {
            continue;
        }
        path::insert(&mut own, field.primary_key(), value);
    }

    if let Value::Object(own) = own {
        merge_into(&mut out, own);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldDescriptor;
    use crate::decode::decode;
    use serde_json::json;
    use std::sync::LazyLock;

    fn place_schema() -> SchemaDescriptor {
        SchemaDescriptor::builder("Place")
            .field(FieldDescriptor::of::<String>("name").default_value(""))
            .field(FieldDescriptor::of::<f64>("lat").keys(["geo/lat", "latitude"]).default_value(0.0))
            .field(FieldDescriptor::of::<f64>("lng").keys(["geo/lng"]).default_value(0.0))
            .field(FieldDescriptor::of::<Option<String>>("note"))
            .build()
            .unwrap()
    }

    fn place_record() -> Record {
        Record::new()
            .with("name", "Paris")
            .with("lat", 48.85)
            .with("lng", 2.35)
            .with("note", Value::Null)
    }

    #[test]
    fn test_keyed_omits_null_nullable_fields() {
        let out = encode_keyed(&place_schema(), &place_record());
        insta::assert_json_snapshot!(Value::Object(out), @r###"
        {
          "geo": {
            "lat": 48.85,
            "lng": 2.35
          },
          "name": "Paris"
        }
        "###);
    }

    #[test]
    fn test_export_writes_explicit_nulls() {
        let tree = export_tree(&place_schema(), &place_record());
        insta::assert_json_snapshot!(tree, @r###"
        {
          "geo": {
            "lat": 48.85,
            "lng": 2.35
          },
          "name": "Paris",
          "note": null
        }
        "###);
    }

    #[test]
    fn test_keyed_round_trip() {
        let schema = place_schema();
        let record = place_record();
        let encoded = Value::Object(encode_keyed(&schema, &record));
        let decoded = decode(&schema, &encoded).unwrap();
        assert_eq!(decoded, record);
    }

    #[test]
    fn test_full_path_export() {
        let schema = SchemaDescriptor::builder("Feed")
            .field(FieldDescriptor::of::<Vec<String>>("titles").keys(["items/*/title"]).default_value(Vec::<String>::new()))
            .field(FieldDescriptor::of::<String>("newest").keys(["latest/-1"]).default_value(""))
            .build()
            .unwrap();
        let record = Record::new()
            .with("titles", vec!["a", "b"])
            .with("newest", "b");
        let text = encode_to_string(&schema, &record).unwrap();
        assert_eq!(
            text,
            r#"{"items":[{"title":"a"},{"title":"b"}],"latest":["b"]}"#
        );
    }

    static BASE: LazyLock<SchemaDescriptor> = LazyLock::new(|| {
        SchemaDescriptor::builder("Base")
            .field(FieldDescriptor::of::<String>("id").default_value(""))
            .field(FieldDescriptor::of::<String>("kind").default_value("base"))
            .build()
            .unwrap()
    });

    #[test]
    fn test_parent_merged_flat_child_wins() {
        let child = SchemaDescriptor::builder("Child")
            .field(FieldDescriptor::of::<String>("kind").default_value("child"))
            .field(FieldDescriptor::of::<i64>("size").default_value(0))
            .extends(&BASE)
            .build()
            .unwrap();
        let record = Record::new()
            .with("kind", "child")
            .with("size", 3)
            .with_parent(Record::new().with("id", "x").with("kind", "base"));

        let out = encode_keyed(&child, &record);
        assert_eq!(
            Value::Object(out),
            json!({"id": "x", "kind": "child", "size": 3})
        );
    }

    #[test]
    fn test_missing_parent_record_writes_nulls() {
        let child = SchemaDescriptor::builder("Child")
            .field(FieldDescriptor::of::<i64>("size").default_value(0))
            .extends(&BASE)
            .build()
            .unwrap();
        let tree = export_tree(&child, &Record::new().with("size", 1));
        assert_eq!(tree, json!({"id": null, "kind": null, "size": 1}));
    }
}
