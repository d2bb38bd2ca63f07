//! The [`JsonModel`] trait.

use crate::decode;
use crate::encode;
use crate::error::Result;
use crate::record::Record;
use crate::schema::{CodecStrategy, SchemaDescriptor};
use serde_json::{Map, Value};

/// A type with a static schema that it decodes from and encodes to.
///
/// Implementations provide [`schema`](JsonModel::schema) and the conversion
/// between the type and a [`Record`]; everything else is provided. Usually
/// derived with `#[derive(JsonModel)]`.
///
/// # Example
///
/// ```rust
/// use jsonmodel::{FieldDescriptor, JsonModel, Record, Result, SchemaDescriptor};
/// use std::sync::OnceLock;
///
/// struct Tag {
///     label: String,
/// }
///
/// impl JsonModel for Tag {
///     fn schema() -> &'static SchemaDescriptor {
///         static SCHEMA: OnceLock<SchemaDescriptor> = OnceLock::new();
///         SCHEMA.get_or_init(|| {
///             SchemaDescriptor::builder("Tag")
///                 .field(FieldDescriptor::of::<String>("label").keys(["label", "name"]).default_value(""))
///                 .build()
///                 .expect("valid schema")
///         })
///     }
///
///     fn from_record(mut record: Record) -> Result<Self> {
///         Ok(Self { label: record.take("label")? })
///     }
///
///     fn to_record(&self) -> Record {
///         Record::new().with("label", &self.label)
///     }
/// }
///
/// let tag = Tag::decode_str(r#"{"name": "rust"}"#).unwrap();
/// assert_eq!(tag.label, "rust");
/// assert_eq!(tag.encode_to_string().unwrap(), r#"{"label":"rust"}"#);
/// ```
pub trait JsonModel: Sized {
    /// The type's schema, built once.
    fn schema() -> &'static SchemaDescriptor;

    /// Build a value from decoded field values.
    fn from_record(record: Record) -> Result<Self>;

    /// Collect field values for encoding.
    fn to_record(&self) -> Record;

    /// Decode from a JSON tree.
    fn decode(tree: &Value) -> Result<Self> {
        Self::from_record(decode::decode(Self::schema(), tree)?)
    }

    /// Decode from JSON bytes.
    fn decode_slice(bytes: &[u8]) -> Result<Self> {
        Self::from_record(decode::decode_slice(Self::schema(), bytes)?)
    }

    /// Decode from JSON text.
    fn decode_str(text: &str) -> Result<Self> {
        Self::from_record(decode::decode_str(Self::schema(), text)?)
    }

    /// Sparse keyed encode; nullable `None` fields are omitted.
    fn encode_keyed(&self) -> Map<String, Value> {
        encode::encode_keyed(Self::schema(), &self.to_record())
    }

    /// Full tree export; nullable `None` fields are written as `null`.
    fn export_tree(&self) -> Value {
        encode::export_tree(Self::schema(), &self.to_record())
    }

    fn encode_to_vec(&self) -> Result<Vec<u8>> {
        encode::encode_to_vec(Self::schema(), &self.to_record())
    }

    fn encode_to_string(&self) -> Result<String> {
        encode::encode_to_string(Self::schema(), &self.to_record())
    }

    /// Encode to a tree with the family's strategy.
    fn encode_value(&self) -> Value {
        match Self::schema().family_strategy() {
            CodecStrategy::Keyed => Value::Object(self.encode_keyed()),
            CodecStrategy::FullPath => self.export_tree(),
        }
    }
}
