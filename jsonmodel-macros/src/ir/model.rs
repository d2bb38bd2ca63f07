//! IR for derived models and raw-value enums.
//!
//! The parsers resolve every attribute precedence question up front, so the
//! generator only reads these structures.

use proc_macro2::Span;
use syn::{Expr, Ident, Path, Type};

use crate::parser::attributes::RawValueAttr;

/// A `#[derive(JsonModel)]` struct.
#[derive(Debug, Clone)]
pub struct ModelIR {
    /// Rust type name.
    pub rust_name: Ident,
    /// Name used in the schema and its errors.
    pub schema_name: String,
    /// Fields in declaration order, including skipped and parent fields.
    pub fields: Vec<FieldIR>,
    /// Map parent key collisions to `CollisionPolicy::Reject`.
    pub strict_inheritance: bool,
    /// Emit `Serialize`/`Deserialize`.
    pub serde: bool,
}

impl ModelIR {
    /// Fields that become descriptors.
    pub fn schema_fields(&self) -> impl Iterator<Item = &FieldIR> {
        self.fields.iter().filter(|field| field.role == FieldRole::Schema)
    }

    /// The field holding the parent model, if any.
    pub fn parent_field(&self) -> Option<&FieldIR> {
        self.fields.iter().find(|field| field.role == FieldRole::Parent)
    }
}

/// How a field takes part in the codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// Decoded and encoded through its candidate keys.
    Schema,
    /// Left out of the schema and filled with its default.
    Skipped,
    /// Holds the parent model.
    Parent,
}

#[derive(Debug, Clone)]
pub struct FieldIR {
    pub ident: Ident,
    pub ty: Type,
    pub role: FieldRole,
    /// Candidate keys in priority order.
    pub keys: Vec<String>,
    pub default: Option<DefaultIR>,
    pub transform: Option<Path>,
    pub required: bool,
    /// `Option<T>` or `Value`; decodes `null` when nothing matches.
    pub nullable: bool,
    pub span: Span,
}

impl FieldIR {
    /// Name the field's value is stored under in a record.
    pub fn record_name(&self) -> String {
        self.ident.to_string().trim_start_matches("r#").to_string()
    }

    pub fn primary_key(&self) -> Option<&str> {
        self.keys.first().map(String::as_str)
    }
}

/// Where a field's default comes from.
#[derive(Debug, Clone)]
pub enum DefaultIR {
    /// `Default::default()`
    Trait,
    /// A function returning the field type.
    Path(Path),
    /// A literal, converted with `From` when it is a string.
    Literal { expr: Expr, is_str: bool },
}

/// A `#[derive(JsonEnum)]` enum.
#[derive(Debug, Clone)]
pub struct EnumIR {
    pub rust_name: Ident,
    pub schema_name: String,
    pub variants: Vec<VariantIR>,
}

#[derive(Debug, Clone)]
pub struct VariantIR {
    pub ident: Ident,
    pub value: RawValue,
}

/// Raw value a variant decodes from and encodes to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RawValue {
    Str(String),
    Int(i64),
}

impl From<RawValueAttr> for RawValue {
    fn from(attr: RawValueAttr) -> Self {
        match attr {
            RawValueAttr::Str(s) => Self::Str(s),
            RawValueAttr::Int(n) => Self::Int(n),
        }
    }
}

impl std::fmt::Display for RawValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{:?}", s),
            Self::Int(n) => write!(f, "{}", n),
        }
    }
}
