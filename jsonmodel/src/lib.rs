//! # jsonmodel
//!
//! Schema-driven JSON codecs for Rust types.
//!
//! Each field of a model declares where its value lives in a JSON document:
//! one or more candidate keys tried in order, `/`-delimited nested paths,
//! wildcard and negative-index paths, an optional value transformer and a
//! default. From that table the crate picks one codec strategy per type and
//! keeps decode and encode symmetric.
//!
//! ## Quick Start
//!
//! ```rust
//! use jsonmodel::JsonModel;
//!
//! #[derive(Debug, PartialEq, JsonModel)]
//! struct User {
//!     #[json(key = "user_id", key = "id", required)]
//!     id: u64,
//!
//!     #[json(key = "name", key = "login", default)]
//!     name: String,
//!
//!     #[json(key = "geo/lat", default)]
//!     lat: f64,
//!
//!     nickname: Option<String>,
//! }
//!
//! let user = User::decode_str(r#"{"id": 7, "login": "ada", "geo": {"lat": 51.5}}"#).unwrap();
//! assert_eq!(user.id, 7);
//! assert_eq!(user.name, "ada");
//! assert_eq!(user.nickname, None);
//!
//! // Sparse keyed encode writes primary keys and omits `None`
//! assert_eq!(
//!     user.encode_to_string().unwrap(),
//!     r#"{"geo":{"lat":51.5},"name":"ada","user_id":7}"#
//! );
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`path`] | `find` / `find_all` / `query` / `insert` over `serde_json::Value` |
//! | [`classify`] | Simple / Nested / Complex path classification |
//! | [`descriptor`] | [`FieldDescriptor`] builder |
//! | [`schema`] | [`SchemaDescriptor`] and build-time validation |
//! | [`decode`] / [`encode`] | schema-driven codecs over a [`Record`] |
//! | [`inherit`] | parent/child merge and collision detection |
//! | [`convert`] | [`FromJson`] / [`ToJson`] / [`JsonType`] |
//! | [`transform`] | [`Transform`] and built-in transformers |
//! | [`serde_support`] | `serialize` / `deserialize` for models |
//!
//! ## Features
//!
//! | Feature | Description | Default |
//! |---------|-------------|---------|
//! | `derive` | `#[derive(JsonModel)]` and `#[derive(JsonEnum)]` | ✅ |
//!
//! ## Container Attributes
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `#[json(rename = "Name")]` | Schema name used in errors |
//! | `#[json(rename_all = "camelCase")]` | Naming convention for implicit primary keys |
//! | `#[json(strict_inheritance)]` | Reject keys colliding with the parent's instead of overwriting |
//! | `#[json(serde)]` | Implement `Serialize`/`Deserialize` through the codec |
//!
//! ## Field Attributes
//!
//! | Attribute | Description |
//! |-----------|-------------|
//! | `#[json(key = "a", key = "b/c")]` | Candidate keys in priority order (at most 5) |
//! | `#[json(default)]` | Fall back to `Default::default()` |
//! | `#[json(default = "path::to::fn")]` | Fall back to the function's result |
//! | `#[json(default_value = 10)]` | Fall back to a literal |
//! | `#[json(transform = "LenientInt")]` | Apply a [`Transform`] to candidate nodes |
//! | `#[json(required)]` | Fail decode instead of requiring a default |
//! | `#[json(skip)]` | Exclude from decode and encode; uses `Default` |
//! | `#[json(parent)]` | The field holding the parent model |
//!
//! `Option<T>` fields are nullable and need no default.
//!
//! ## Path Grammar
//!
//! Segments are separated by `/` and empty segments are dropped. `*` fans
//! out over an array or object; an all-digit segment, optionally prefixed
//! with `-`, indexes an array from the front or back. Paths are limited to
//! [`path::MAX_PATH_DEPTH`] segments.
//!
//! A type whose keys contain a wildcard or an index decodes every field by
//! path query over the whole tree and encodes with [`encode::export_tree`];
//! otherwise it uses keyed lookups and the sparse [`encode::encode_keyed`].
//!
//! ## Serde Compatibility
//!
//! `#[serde(rename)]`, `#[serde(skip)]`, `#[serde(default)]` and container
//! `#[serde(rename_all)]` are honored when no `#[json(...)]` attribute
//! overrides them.

extern crate self as jsonmodel;

pub mod classify;
pub mod config;
pub mod convert;
pub mod decode;
pub mod descriptor;
pub mod encode;
pub mod error;
pub mod inherit;
pub mod model;
pub mod path;
pub mod record;
pub mod schema;
pub mod serde_support;
pub mod transform;
pub mod types;

pub use classify::{PathClassification, classify};
pub use config::{CollisionPolicy, SchemaConfig};
pub use convert::{FromJson, JsonType, ToJson};
pub use descriptor::{DefaultThunk, FieldDescriptor};
pub use error::{Error, ErrorCode, Result};
pub use model::JsonModel;
pub use record::Record;
pub use schema::{CodecStrategy, SchemaBuilder, SchemaDescriptor};
pub use transform::{Transform, Transformer};
pub use types::FieldType;

// Re-export derive macros when available
#[cfg(feature = "derive")]
pub use jsonmodel_macros::{JsonEnum, JsonModel};

#[doc(hidden)]
pub mod __private {
    pub use serde;
    pub use serde_json::{self, Value};
    pub use std::sync::OnceLock;
}
