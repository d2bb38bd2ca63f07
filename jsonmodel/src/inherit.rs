//! Inheritance composition.
//!
//! Parent and child fields share one flat key space: the parent's output is
//! written first and the child's output is merged over it.

use crate::path;
use crate::schema::SchemaDescriptor;
use serde_json::{Map, Value};

/// Deep-merge `overlay` into `base`.
///
/// Objects present on both sides are merged key by key; any other value in
/// `overlay` replaces the one in `base`.
pub fn merge_into(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        match value {
            Value::Object(incoming) => match base.get_mut(&key) {
                Some(Value::Object(existing)) => merge_into(existing, incoming),
                _ => {
                    base.insert(key, Value::Object(incoming));
                }
            },
            value => {
                base.insert(key, value);
            }
        }
    }
}

/// Primary keys of `schema` that collide with a primary key of one of its
/// ancestors, as `(child_key, ancestor_key)` pairs.
///
/// Two keys collide when they are equal or one is a path prefix of the
/// other, since either way one value overwrites the other on encode.
pub fn parent_key_collisions(schema: &SchemaDescriptor) -> Vec<(String, String)> {
    let ancestor_keys: Vec<&str> = schema
        .ancestry()
        .skip(1)
        .flat_map(|ancestor| ancestor.fields().iter().map(|field| field.primary_key()))
        .collect();

    let mut collisions = Vec::new();
    for field in schema.fields() {
        let child = path::segments(field.primary_key());
        for ancestor_key in &ancestor_keys {
            let parent = path::segments(ancestor_key);
            let shared = child.len().min(parent.len());
            if child[..shared] == parent[..shared] {
                collisions.push((field.primary_key().to_string(), ancestor_key.to_string()));
            }
        }
    }
    collisions
}
