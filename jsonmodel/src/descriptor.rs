//! Field descriptors.
//!
//! A [`FieldDescriptor`] is the normalized metadata of one field: the
//! candidate keys tried in order, the declared type, nullability, an
//! optional default thunk and an optional transformer.
//!
//! # Example
//! ```rust
//! use jsonmodel::{FieldDescriptor, PathClassification};
//! use jsonmodel::transform::LenientInt;
//!
//! let field = FieldDescriptor::of::<i64>("age")
//!     .keys(["age", "user_age", "profile/age"])
//!     .transform::<LenientInt>()
//!     .default_value(0);
//!
//! assert_eq!(field.primary_key(), "age");
//! assert_eq!(field.classification(), &PathClassification::Simple("age".into()));
//! assert!(field.has_default());
//! ```

use crate::classify::{PathClassification, classify};
use crate::convert::{JsonType, ToJson};
use crate::path;
use crate::transform::{Transform, Transformer, transformer};
use crate::types::FieldType;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Stored form of a default-value thunk.
pub type DefaultThunk = Arc<dyn Fn() -> Value + Send + Sync>;

/// Normalized metadata for one field.
#[derive(Clone)]
pub struct FieldDescriptor {
    name: String,
    declared_type: FieldType,
    acceptor: Option<fn(&Value) -> bool>,
    nullable: bool,
    default: Option<DefaultThunk>,
    candidate_keys: Vec<String>,
    transformer: Option<Transformer>,
    ignored: bool,
    required: bool,
    classification: PathClassification,
    lookups: Vec<Vec<String>>,
}

impl FieldDescriptor {
    /// Create a descriptor whose only candidate key is `name`.
    pub fn new(name: impl Into<String>, declared_type: FieldType) -> Self {
        let name = name.into();
        let mut field = Self {
            name: name.clone(),
            declared_type,
            acceptor: None,
            nullable: false,
            default: None,
            candidate_keys: Vec::new(),
            transformer: None,
            ignored: false,
            required: false,
            classification: PathClassification::Simple(name.clone()),
            lookups: Vec::new(),
        };
        field.set_keys(vec![name]);
        field
    }

    /// Create a descriptor typed after `T`; `Option<T>` fields are nullable.
    pub fn of<T: JsonType>(name: impl Into<String>) -> Self {
        let mut field = Self::new(name, T::field_type()).nullable(T::NULLABLE);
        field.acceptor = Some(T::accepts);
        field
    }

    fn set_keys(&mut self, keys: Vec<String>) {
        self.classification = keys
            .first()
            .map(|key| classify(key))
            .unwrap_or_else(|| PathClassification::Simple(self.name.clone()));
        self.lookups = keys
            .iter()
            .map(|key| path::segments(key).into_iter().map(str::to_string).collect())
            .collect();
        self.candidate_keys = keys;
    }

    // Builder methods

    /// Replace the candidate keys, in priority order.
    pub fn keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_keys(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Use a fixed default value.
    pub fn default_value(mut self, value: impl ToJson) -> Self {
        let value = value.to_json();
        self.default = Some(Arc::new(move || value.clone()));
        self
    }

    /// Use a default computed on every fallback.
    pub fn default_with<F>(mut self, thunk: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        self.default = Some(Arc::new(thunk));
        self
    }

    /// Apply the typed transformer `T` to candidate nodes.
    pub fn transform<T: Transform + 'static>(mut self) -> Self {
        self.transformer = Some(transformer::<T>());
        self
    }

    /// Apply a transformer function to candidate nodes.
    pub fn transform_with<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
    {
        self.transformer = Some(Arc::new(f));
        self
    }

    /// Fail decode with `MissingRequiredField` instead of requiring a default.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Exclude the field from decode and encode.
    pub fn ignored(mut self) -> Self {
        self.ignored = true;
        self
    }

    // Accessors

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_type(&self) -> &FieldType {
        &self.declared_type
    }

    /// Returns true if a non-null candidate node converts to the field's type.
    pub fn accepts(&self, value: &Value) -> bool {
        match self.acceptor {
            Some(accepts) => accepts(value),
            None => self.declared_type.accepts(value),
        }
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Evaluate the default thunk.
    pub fn default_node(&self) -> Option<Value> {
        self.default.as_ref().map(|thunk| thunk())
    }

    pub fn candidate_keys(&self) -> &[String] {
        &self.candidate_keys
    }

    /// The first candidate key; encode writes here.
    pub fn primary_key(&self) -> &str {
        self.candidate_keys
            .first()
            .map(String::as_str)
            .unwrap_or(&self.name)
    }

    pub fn transformer(&self) -> Option<&Transformer> {
        self.transformer.as_ref()
    }

    pub fn is_ignored(&self) -> bool {
        self.ignored
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Classification of the primary key.
    pub fn classification(&self) -> &PathClassification {
        &self.classification
    }

    /// Pre-split segments for each candidate key.
    pub fn lookups(&self) -> &[Vec<String>] {
        &self.lookups
    }

    /// Returns true if any candidate key needs the full-tree query.
    pub fn requires_full_path(&self) -> bool {
        self.classification.is_complex()
            || self.candidate_keys.iter().any(|key| classify(key).is_complex())
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .field("nullable", &self.nullable)
            .field("has_default", &self.default.is_some())
            .field("candidate_keys", &self.candidate_keys)
            .field("has_transformer", &self.transformer.is_some())
            .field("ignored", &self.ignored)
            .field("required", &self.required)
            .field("classification", &self.classification)
            .finish()
    }
}
