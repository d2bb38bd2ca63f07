//! Rust code generation module.
//!
//! This module generates the trait impls emitted by the derive macros.

pub mod impl_block;

pub use impl_block::ImplBlockGenerator;
