//! # jsonmodel-macros
//!
//! Procedural macros for declaring schema-driven JSON models.
//!
//! This crate provides `#[derive(JsonModel)]` for named-field structs and
//! `#[derive(JsonEnum)]` for unit enums. Use them through the `jsonmodel`
//! crate, which re-exports both and holds the runtime they expand to.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jsonmodel::{JsonEnum, JsonModel};
//!
//! #[derive(JsonEnum)]
//! enum Role {
//!     Member = 1,
//!     Admin = 2,
//! }
//!
//! #[derive(JsonModel)]
//! #[json(rename_all = "camelCase")]
//! struct User {
//!     #[json(key = "user_id", key = "id", required)]
//!     id: u64,
//!
//!     #[json(key = "profile/display_name", key = "name", default)]
//!     display_name: String,
//!
//!     #[json(default_value = 1, transform = "jsonmodel::transform::LenientInt")]
//!     login_count: i64,
//!
//!     role: Option<Role>,
//! }
//! ```
//!
//! ## Attributes
//!
//! ### Container Attributes (on struct)
//!
//! - `#[json(rename = "Name")]` - Schema name used in errors
//! - `#[json(rename_all = "camelCase")]` - Rename implicit keys (camelCase, snake_case, PascalCase, etc.)
//! - `#[json(strict_inheritance)]` - Reject primary keys that collide with the parent's
//! - `#[json(serde)]` - Implement `Serialize`/`Deserialize` through the codec
//!
//! ### Field Attributes
//!
//! - `#[json(key = "a", key = "b/c")]` - Candidate keys in priority order
//! - `#[json(default)]` - Fall back to `Default::default()`
//! - `#[json(default = "path::to::fn")]` - Fall back to a function's result
//! - `#[json(default_value = 10)]` - Fall back to a literal
//! - `#[json(transform = "Type")]` - Apply a `Transform` to candidate nodes
//! - `#[json(required)]` - Fail decode when no candidate matches
//! - `#[json(skip)]` - Exclude from the codec
//! - `#[json(parent)]` - The field holding the parent model
//!
//! ### Enum Attributes
//!
//! - `#[json(rename_all = "snake_case")]` - Use renamed variant names as raw values
//! - `#[json(value = "text")]` / `#[json(value = 3)]` - Explicit raw value of a variant

use proc_macro::TokenStream;
use syn::DeriveInput;

mod codegen;
mod error;
mod ir;
mod parser;

use codegen::ImplBlockGenerator;
use error::DeriveError;
use parser::enum_parser::EnumParser;
use parser::struct_parser::StructParser;

/// Derive macro for schema-driven JSON models.
///
/// # Example
///
/// ```rust,ignore
/// use jsonmodel::JsonModel;
///
/// #[derive(JsonModel)]
/// struct Point {
///     #[json(key = "coords/x", default)]
///     x: f64,
///     #[json(key = "coords/y", default)]
///     y: f64,
/// }
/// ```
#[proc_macro_derive(JsonModel, attributes(json, serde))]
pub fn derive_json_model(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    match derive_json_model_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Derive macro for enums encoded as raw values.
///
/// # Example
///
/// ```rust,ignore
/// use jsonmodel::JsonEnum;
///
/// #[derive(JsonEnum)]
/// enum Status {
///     #[json(value = "active")]
///     Active,
///     #[json(value = "banned")]
///     Banned,
/// }
/// ```
#[proc_macro_derive(JsonEnum, attributes(json, serde))]
pub fn derive_json_enum(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);

    match derive_json_enum_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

fn derive_json_model_impl(input: &DeriveInput) -> Result<proc_macro2::TokenStream, DeriveError> {
    let model = StructParser::parse(input)?;
    Ok(ImplBlockGenerator::new().generate_model(&model))
}

fn derive_json_enum_impl(input: &DeriveInput) -> Result<proc_macro2::TokenStream, DeriveError> {
    let ir = EnumParser::parse(input)?;
    Ok(ImplBlockGenerator::new().generate_enum(&ir))
}
