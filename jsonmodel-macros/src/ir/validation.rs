//! Compile-time validation of parsed models and enums.
//!
//! These checks mirror the ones `SchemaBuilder::build` runs, so that a
//! derived schema that compiles also builds. Each error points at the field
//! that caused it.

use std::collections::HashSet;

use crate::error::ParseError;
use crate::ir::{EnumIR, FieldRole, ModelIR};

/// Maximum number of candidate keys per field.
pub const MAX_CANDIDATE_KEYS: usize = 5;

/// Maximum number of segments in a key.
pub const MAX_PATH_DEPTH: usize = 100;

/// Split a key into its non-empty `/` segments.
pub fn segments(key: &str) -> Vec<&str> {
    key.split('/').filter(|segment| !segment.is_empty()).collect()
}

fn is_index(segment: &str) -> bool {
    let digits = segment.strip_prefix('-').unwrap_or(segment);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn is_complex(key: &str) -> bool {
    key.contains('*')
        || key.contains('[')
        || key.contains(']')
        || segments(key).into_iter().any(is_index)
}

/// Container segments of a plain nested key.
fn nested_parents(key: &str) -> Option<Vec<&str>> {
    let segments = segments(key);
    if is_complex(key) || segments.len() < 2 {
        return None;
    }
    Some(segments[..segments.len() - 1].to_vec())
}

/// The single segment of a simple key.
fn simple_key(key: &str) -> Option<&str> {
    match segments(key).as_slice() {
        [segment] if !is_complex(key) => Some(*segment),
        _ => None,
    }
}

pub fn validate_model(model: &ModelIR) -> Result<(), ParseError> {
    let parents: Vec<_> = model
        .fields
        .iter()
        .filter(|field| field.role == FieldRole::Parent)
        .collect();
    if let Some(extra) = parents.get(1) {
        return Err(ParseError::new(format!(
            "`{}` declares more than one parent field",
            model.schema_name
        ))
        .with_span(extra.span));
    }

    for field in model.schema_fields() {
        let name = field.record_name();

        if field.keys.len() > MAX_CANDIDATE_KEYS {
            return Err(ParseError::new(format!(
                "field `{}` declares {} candidate keys, at most {} allowed",
                name,
                field.keys.len(),
                MAX_CANDIDATE_KEYS
            ))
            .with_span(field.span)
            .with_suggestion("keep the primary key and at most 4 fallbacks"));
        }

        for key in &field.keys {
            let depth = segments(key).len();
            if depth == 0 {
                return Err(ParseError::new(format!(
                    "key {:?} of field `{}` has no path segments",
                    key, name
                ))
                .with_span(field.span));
            }
            if depth > MAX_PATH_DEPTH {
                return Err(ParseError::new(format!(
                    "key {:?} of field `{}` has {} segments, at most {} allowed",
                    key, name, depth, MAX_PATH_DEPTH
                ))
                .with_span(field.span));
            }
        }

        if field.required && field.default.is_some() {
            return Err(ParseError::new(format!(
                "field `{}` is required and cannot also declare a default",
                name
            ))
            .with_span(field.span));
        }

        if field.default.is_none() && !field.nullable && !field.required {
            return Err(ParseError::new(format!("field `{}` has no default value", name))
                .with_span(field.span)
                .with_suggestion("add `#[json(default)]` or `#[json(default_value = ...)]`")
                .with_suggestion("mark it `#[json(required)]` to fail decode instead")
                .with_suggestion("or make it an `Option`"));
        }
    }

    let mut primary_keys = HashSet::new();
    for field in model.schema_fields() {
        if let Some(key) = field.primary_key() {
            if !primary_keys.insert(key) {
                return Err(ParseError::new(format!(
                    "primary key {:?} of field `{}` is already used by another field",
                    key,
                    field.record_name()
                ))
                .with_span(field.span));
            }
        }
    }

    for field in model.schema_fields() {
        let Some(parents) = field.primary_key().and_then(nested_parents) else {
            continue;
        };
        for segment in parents {
            let clash = model.schema_fields().find(|other| {
                other.ident != field.ident
                    && (other.record_name() == segment
                        || other.primary_key().and_then(simple_key) == Some(segment))
            });
            if let Some(other) = clash {
                return Err(ParseError::new(format!(
                    "nested key {:?} of field `{}` passes through `{}`, which is also field `{}`",
                    field.primary_key().unwrap_or_default(),
                    field.record_name(),
                    segment,
                    other.record_name()
                ))
                .with_span(field.span));
            }
        }
    }

    Ok(())
}

pub fn validate_enum(ir: &EnumIR) -> Result<(), ParseError> {
    if ir.variants.is_empty() {
        return Err(ParseError::new(format!("`{}` has no variants", ir.schema_name))
            .with_span(ir.rust_name.span()));
    }

    let mut seen = HashSet::new();
    for variant in &ir.variants {
        if !seen.insert(&variant.value) {
            return Err(ParseError::new(format!(
                "raw value {} of `{}` is used by more than one variant",
                variant.value, variant.ident
            ))
            .with_span(variant.ident.span()));
        }
    }

    Ok(())
}
