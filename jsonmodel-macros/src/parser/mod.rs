//! Parser module for extracting model information from Rust AST.
//!
//! This module contains parsers for:
//! - Struct definitions (`JsonModel`)
//! - Unit enum definitions (`JsonEnum`)
//! - Field types
//! - Attributes

pub mod attributes;
pub mod enum_parser;
pub mod struct_parser;
pub mod type_parser;

#[cfg(feature = "serde-compat")]
pub mod serde_compat;
