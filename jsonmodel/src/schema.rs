//! Schema descriptors.
//!
//! A [`SchemaDescriptor`] is the validated, per-type table of
//! [`FieldDescriptor`]s plus the codec strategy flag and an optional
//! reference to a parent schema. It is built once through
//! [`SchemaBuilder`] and reused for every decode and encode of the type.
//!
//! # Build-time checks
//!
//! | Check | Error |
//! |-------|-------|
//! | candidate key list empty, blank, too long, or too deep | [`Error::InvalidKeys`] |
//! | non-nullable field with no default and not `required` | [`Error::MissingDefault`] |
//! | duplicate field names or primary keys | [`Error::SchemaConflict`] |
//! | nested container segment equal to another field's identifier | [`Error::SchemaConflict`] |
//! | primary key colliding with the parent's, under [`CollisionPolicy::Reject`] | [`Error::SchemaConflict`] |
//!
//! # Example
//! ```rust
//! use jsonmodel::{CodecStrategy, FieldDescriptor, SchemaDescriptor};
//!
//! let schema = SchemaDescriptor::builder("Point")
//!     .field(FieldDescriptor::of::<f64>("lat").keys(["geo/lat"]).default_value(0.0))
//!     .field(FieldDescriptor::of::<f64>("lng").keys(["geo/lng"]).default_value(0.0))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schema.strategy(), CodecStrategy::Keyed);
//! ```

use crate::classify::PathClassification;
use crate::config::{CollisionPolicy, SchemaConfig};
use crate::descriptor::FieldDescriptor;
use crate::error::{Error, Result};
use crate::inherit;
use crate::path::{self, MAX_PATH_DEPTH};
use std::collections::HashSet;

/// How a schema reads and writes its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodecStrategy {
    /// Keyed lookups through objects; sparse encode.
    Keyed,
    /// Path queries over the whole tree; explicit-null tree encode.
    FullPath,
}

/// The validated field table of one type.
#[derive(Debug)]
pub struct SchemaDescriptor {
    name: String,
    fields: Vec<FieldDescriptor>,
    has_complex_field: bool,
    parent: Option<&'static SchemaDescriptor>,
    config: SchemaConfig,
}

impl SchemaDescriptor {
    /// Start building a schema named `name`.
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Non-ignored fields, in declaration order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Look up a field by name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name() == name)
    }

    pub fn has_complex_field(&self) -> bool {
        self.has_complex_field
    }

    pub fn parent(&self) -> Option<&'static SchemaDescriptor> {
        self.parent
    }

    pub fn config(&self) -> &SchemaConfig {
        &self.config
    }

    /// Strategy selected by this schema's own fields.
    pub fn strategy(&self) -> CodecStrategy {
        if self.has_complex_field {
            CodecStrategy::FullPath
        } else {
            CodecStrategy::Keyed
        }
    }

    /// Strategy shared by this schema and its ancestors.
    ///
    /// A single complex field anywhere in the chain moves the whole family
    /// to [`CodecStrategy::FullPath`].
    pub fn family_strategy(&self) -> CodecStrategy {
        if self.ancestry().any(|schema| schema.has_complex_field) {
            CodecStrategy::FullPath
        } else {
            CodecStrategy::Keyed
        }
    }

    /// This schema followed by its ancestors, nearest first.
    pub fn ancestry(&self) -> impl Iterator<Item = &SchemaDescriptor> {
        std::iter::successors(Some(self), |schema| schema.parent)
    }
}

/// Builder for [`SchemaDescriptor`].
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
    parent: Option<&'static SchemaDescriptor>,
    config: SchemaConfig,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
            parent: None,
            config: SchemaConfig::default(),
        }
    }

    /// Append a field.
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Append several fields.
    pub fn fields(mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }

    /// Inherit from `parent`.
    pub fn extends(mut self, parent: &'static SchemaDescriptor) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_config(mut self, config: SchemaConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the field table and build the schema.
    pub fn build(self) -> Result<SchemaDescriptor> {
        let Self {
            name,
            fields,
            parent,
            config,
        } = self;

        config
            .validate()
            .map_err(|reason| Error::invalid(Some(name.as_str()), reason))?;

        let fields: Vec<FieldDescriptor> = fields
            .into_iter()
            .filter(|field| {
                if field.is_ignored() {
                    tracing::trace!(schema = %name, field = %field.name(), "dropping ignored field");
                }
                !field.is_ignored()
            })
            .collect();

        for field in &fields {
            validate_keys(field, &config)?;
            if !field.has_default() && !field.is_nullable() && !field.is_required() {
                return Err(Error::MissingDefault {
                    field: field.name().to_string(),
                });
            }
        }

        check_identifiers(&fields)?;

        let has_complex_field = fields.iter().any(FieldDescriptor::requires_full_path);

        let schema = SchemaDescriptor {
            name,
            fields,
            has_complex_field,
            parent,
            config,
        };

        for (child_key, parent_key) in inherit::parent_key_collisions(&schema) {
            match schema.config.parent_key_collision {
                CollisionPolicy::Reject => return Err(Error::conflict(child_key, parent_key)),
                CollisionPolicy::ChildWins => tracing::warn!(
                    schema = %schema.name,
                    child_key = %child_key,
                    parent_key = %parent_key,
                    "child key overwrites parent key on encode"
                ),
            }
        }

        tracing::debug!(
            schema = %schema.name,
            fields = schema.fields.len(),
            strategy = ?schema.strategy(),
            has_parent = schema.parent.is_some(),
            "built schema"
        );

        Ok(schema)
    }
}

fn validate_keys(field: &FieldDescriptor, config: &SchemaConfig) -> Result<()> {
    let keys = field.candidate_keys();
    if keys.is_empty() {
        return Err(Error::invalid_keys(field.name(), "no candidate keys"));
    }
    if keys.len() > config.max_candidate_keys {
        return Err(Error::invalid_keys(
            field.name(),
            format!(
                "{} candidate keys declared, at most {} allowed",
                keys.len(),
                config.max_candidate_keys
            ),
        ));
    }
    for key in keys {
        let depth = path::segments(key).len();
        if depth == 0 {
            return Err(Error::invalid_keys(
                field.name(),
                format!("key {key:?} has no path segments"),
            ));
        }
        if depth > MAX_PATH_DEPTH {
            return Err(Error::invalid_keys(
                field.name(),
                format!("key {key:?} has {depth} segments, at most {MAX_PATH_DEPTH} allowed"),
            ));
        }
    }
    Ok(())
}

/// Field names, simple primary keys and nested container segments must not
/// collide.
fn check_identifiers(fields: &[FieldDescriptor]) -> Result<()> {
    let mut names = HashSet::new();
    for field in fields {
        if !names.insert(field.name()) {
            return Err(Error::conflict(field.name(), field.name()));
        }
    }

    let mut primary_keys: Vec<(&str, &str)> = Vec::new();
    for field in fields {
        let key = field.primary_key();
        if let Some((_, other)) = primary_keys.iter().find(|(k, _)| *k == key) {
            return Err(Error::conflict(key, *other));
        }
        primary_keys.push((key, field.name()));
    }

    for field in fields {
        let PathClassification::Nested { parents, .. } = field.classification() else {
            continue;
        };
        for segment in parents {
            let clash = fields.iter().find(|other| {
                other.name() != field.name()
                    && (other.name() == segment
                        || matches!(other.classification(), PathClassification::Simple(key) if key == segment))
            });
            if let Some(other) = clash {
                return Err(Error::conflict(segment.as_str(), other.name()));
            }
        }
    }

    Ok(())
}
