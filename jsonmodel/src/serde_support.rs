//! Serde interop for [`JsonModel`] types.
//!
//! Use with `#[serde(with = "jsonmodel::serde_support")]` on a field, or
//! through the `#[json(serde)]` container attribute, which implements
//! `Serialize`/`Deserialize` with these functions.
//!
//! Keyed families go through a keyed container (`Map<String, Value>`);
//! full-path families go through an opaque tree.

use crate::model::JsonModel;
use crate::schema::CodecStrategy;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: JsonModel,
    S: Serializer,
{
    match T::schema().family_strategy() {
        CodecStrategy::Keyed => value.encode_keyed().serialize(serializer),
        CodecStrategy::FullPath => value.export_tree().serialize(serializer),
    }
}

pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
where
    T: JsonModel,
    D: Deserializer<'de>,
{
    let tree = match T::schema().family_strategy() {
        CodecStrategy::Keyed => Value::Object(Map::deserialize(deserializer)?),
        CodecStrategy::FullPath => Value::deserialize(deserializer)?,
    };
    T::decode(&tree).map_err(D::Error::custom)
}
