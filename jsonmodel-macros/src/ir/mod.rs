//! Intermediate Representation (IR) module.
//!
//! Parsed models and enums, validated before code generation.

pub mod model;
pub mod validation;

pub use model::{DefaultIR, EnumIR, FieldIR, FieldRole, ModelIR, RawValue, VariantIR};
