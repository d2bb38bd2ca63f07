//! Schema-driven decoding.
//!
//! Every schema family decodes with exactly one [`CodecStrategy`], taken
//! from [`SchemaDescriptor::family_strategy`]:
//!
//! - **Keyed**: the root must be an object. Each candidate key is walked
//!   segment by segment through nested objects using the field's
//!   pre-split lookup table.
//! - **FullPath**: each candidate key is resolved with [`path::query`], so
//!   wildcards and negative indices work.
//!
//! For each field the candidate keys are tried in priority order. A missing
//! or `null` node is skipped. With a transformer, the first `Some` result
//! wins; without one, the first node accepted by the declared type wins.
//! When no candidate succeeds the field falls back to its default, then to
//! `null` if nullable, and otherwise the whole decode fails.
//!
//! Parent fields are decoded after the child's own fields, from the same
//! tree and with the same strategy.

use crate::descriptor::FieldDescriptor;
use crate::error::{Error, Result};
use crate::path;
use crate::record::Record;
use crate::schema::{CodecStrategy, SchemaDescriptor};
use crate::types::shape_of;
use serde_json::{Map, Value};
use std::borrow::Cow;

/// Decode `tree` into a [`Record`] for `schema` and its ancestors.
pub fn decode(schema: &SchemaDescriptor, tree: &Value) -> Result<Record> {
    decode_with(schema, tree, schema.family_strategy())
}

/// Parse `bytes` and decode them.
///
/// Keyed schemas parse the payload as a keyed container; full-path schemas
/// parse it as an opaque tree.
pub fn decode_slice(schema: &SchemaDescriptor, bytes: &[u8]) -> Result<Record> {
    let tree = match schema.family_strategy() {
        CodecStrategy::Keyed => Value::Object(serde_json::from_slice::<Map<String, Value>>(bytes)?),
        CodecStrategy::FullPath => serde_json::from_slice::<Value>(bytes)?,
    };
    decode(schema, &tree)
}

/// Parse `text` and decode it.
pub fn decode_str(schema: &SchemaDescriptor, text: &str) -> Result<Record> {
    decode_slice(schema, text.as_bytes())
}

fn decode_with(schema: &SchemaDescriptor, tree: &Value, strategy: CodecStrategy) -> Result<Record> {
    if strategy == CodecStrategy::Keyed && !tree.is_object() {
        return Err(Error::mismatch(schema.name(), shape_of(tree)));
    }

    let mut record = Record::new();
    for field in schema.fields() {
        let value = decode_field(schema, field, tree, strategy)?;
        record.insert(field.name(), value);
    }

    if let Some(parent) = schema.parent() {
        record.set_parent(decode_with(parent, tree, strategy)?);
    }

    Ok(record)
}

fn decode_field(
    schema: &SchemaDescriptor,
    field: &FieldDescriptor,
    tree: &Value,
    strategy: CodecStrategy,
) -> Result<Value> {
    let mut first_mismatch = None;

    for (key, segments) in field.candidate_keys().iter().zip(field.lookups()) {
        let node = match strategy {
            CodecStrategy::Keyed => lookup_keyed(tree, segments).map(Cow::Borrowed),
            CodecStrategy::FullPath => path::query(tree, key).map(Cow::Owned),
        };

        let Some(node) = node.filter(|node| !node.is_null()) else {
            tracing::trace!(schema = %schema.name(), field = %field.name(), key = %key, "candidate absent");
            continue;
        };

        if let Some(transform) = field.transformer() {
            match transform(&*node) {
                Some(value) => return Ok(value),
                None => {
                    tracing::trace!(schema = %schema.name(), field = %field.name(), key = %key, "transformer declined candidate");
                    continue;
                }
            }
        }

        if field.accepts(&node) {
            return Ok(node.into_owned());
        }

        tracing::trace!(
            schema = %schema.name(),
            field = %field.name(),
            key = %key,
            actual = shape_of(&node),
            "candidate has wrong shape"
        );
        if first_mismatch.is_none() {
            first_mismatch = Some(Error::TypeMismatch {
                expected: field.declared_type().name(),
                actual: shape_of(&node).to_string(),
                key: Some(key.clone()),
            });
        }
    }

    if let Some(default) = field.default_node() {
        tracing::debug!(schema = %schema.name(), field = %field.name(), "substituting default");
        return Ok(default);
    }
    if field.is_nullable() {
        return Ok(Value::Null);
    }
    Err(first_mismatch.unwrap_or_else(|| Error::missing(field.primary_key())))
}

/// Walk plain key segments through nested objects.
fn lookup_keyed<'a>(tree: &'a Value, segments: &[String]) -> Option<&'a Value> {
    segments
        .iter()
        .try_fold(tree, |node, segment| node.as_object()?.get(segment))
}
