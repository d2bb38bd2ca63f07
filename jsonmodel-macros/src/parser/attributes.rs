//! Attribute parsing using darling for ergonomic derive macro attributes.
//!
//! This module defines the attribute structures for `#[json(...)]` attributes
//! on containers (structs/enums), fields, and variants.

use darling::{FromDeriveInput, FromField, FromMeta, FromVariant};
use syn::{Expr, ExprUnary, Generics, Ident, UnOp};

/// Container-level attributes for model structs.
/// Parsed from `#[json(...)]` on the type definition.
#[derive(Debug, Clone, FromDeriveInput)]
#[darling(attributes(json), supports(struct_named))]
pub struct ContainerAttrs {
    /// The identifier of the type
    pub ident: Ident,

    /// Generic parameters of the type
    pub generics: Generics,

    /// Schema name used in errors
    #[darling(default)]
    pub rename: Option<String>,

    /// Naming convention for implicit primary keys
    #[darling(default)]
    pub rename_all: Option<RenameRule>,

    /// Reject primary keys that collide with the parent's
    #[darling(default)]
    pub strict_inheritance: bool,

    /// Emit `Serialize`/`Deserialize` impls through the codec
    #[darling(default)]
    pub serde: bool,
}

impl ContainerAttrs {
    /// Get the schema name (renamed or the type name).
    pub fn schema_name(&self) -> String {
        self.rename
            .clone()
            .unwrap_or_else(|| self.ident.to_string())
    }
}

/// Container-level attributes for raw-value enums.
#[derive(Debug, Clone, FromDeriveInput)]
#[darling(attributes(json), supports(enum_unit))]
pub struct EnumAttrs {
    pub ident: Ident,

    pub generics: Generics,

    /// Type name used in errors
    #[darling(default)]
    pub rename: Option<String>,

    /// Use renamed variant names as string raw values
    #[darling(default)]
    pub rename_all: Option<RenameRule>,
}

impl EnumAttrs {
    pub fn schema_name(&self) -> String {
        self.rename
            .clone()
            .unwrap_or_else(|| self.ident.to_string())
    }
}

/// Field-level attributes parsed from `#[json(...)]` on struct fields.
#[derive(Debug, Clone, FromField)]
#[darling(attributes(json))]
pub struct FieldAttrs {
    /// Field identifier
    pub ident: Option<Ident>,

    /// Candidate keys, in priority order
    #[darling(multiple, rename = "key")]
    pub keys: Vec<String>,

    /// `default` or `default = "path::to::fn"`
    #[darling(default)]
    pub default: Option<DefaultAttr>,

    /// Literal default
    #[darling(default)]
    pub default_value: Option<LiteralDefault>,

    /// Transformer type implementing `Transform`
    #[darling(default)]
    pub transform: Option<syn::Path>,

    /// Exclude from decode and encode
    #[darling(default)]
    pub skip: bool,

    /// Fail decode when no candidate key matches
    #[darling(default)]
    pub required: bool,

    /// Holds the parent model
    #[darling(default)]
    pub parent: bool,
}

impl FieldAttrs {
    /// Implicit primary key for this field when no `key` is declared.
    pub fn implicit_key(&self, rename_rule: Option<RenameRule>) -> String {
        let name = self
            .ident
            .as_ref()
            .map(|ident| ident.to_string().trim_start_matches("r#").to_string())
            .unwrap_or_default();
        match rename_rule {
            Some(rule) => rule.apply(&name),
            None => name,
        }
    }
}

/// Variant-level attributes for enum variants.
#[derive(Debug, Clone, FromVariant)]
#[darling(attributes(json))]
pub struct VariantAttrs {
    /// Variant identifier
    pub ident: Ident,

    /// Explicit `= N` discriminant
    pub discriminant: Option<Expr>,

    /// Explicit raw value
    #[darling(default)]
    pub value: Option<RawValueAttr>,
}

/// `#[json(default)]` or `#[json(default = "path::to::fn")]`.
#[derive(Debug, Clone)]
pub enum DefaultAttr {
    /// `Default::default()`
    Trait,
    /// A function returning the field type
    Path(syn::Path),
}

impl FromMeta for DefaultAttr {
    fn from_word() -> darling::Result<Self> {
        Ok(Self::Trait)
    }

    fn from_string(value: &str) -> darling::Result<Self> {
        syn::parse_str(value)
            .map(Self::Path)
            .map_err(|_| darling::Error::unknown_value(value))
    }
}

/// A literal default value: `default_value = 10`, `= -1`, `= "text"`.
#[derive(Debug, Clone)]
pub struct LiteralDefault(pub Expr);

impl LiteralDefault {
    /// Returns true for string literals, which need a conversion.
    pub fn is_str(&self) -> bool {
        matches!(
            &self.0,
            Expr::Lit(syn::ExprLit {
                lit: syn::Lit::Str(_),
                ..
            })
        )
    }
}

impl FromMeta for LiteralDefault {
    fn from_expr(expr: &Expr) -> darling::Result<Self> {
        match expr {
            Expr::Lit(_) => Ok(Self(expr.clone())),
            Expr::Unary(ExprUnary {
                op: UnOp::Neg(_),
                expr: inner,
                ..
            }) if matches!(**inner, Expr::Lit(_)) => Ok(Self(expr.clone())),
            Expr::Group(group) => Self::from_expr(&group.expr),
            _ => Err(darling::Error::custom("default_value must be a literal").with_span(expr)),
        }
    }
}

/// Raw value of an enum variant: `value = "text"` or `value = 3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValueAttr {
    Str(String),
    Int(i64),
}

impl FromMeta for RawValueAttr {
    fn from_value(value: &syn::Lit) -> darling::Result<Self> {
        match value {
            syn::Lit::Str(s) => Ok(Self::Str(s.value())),
            syn::Lit::Int(i) => i
                .base10_parse::<i64>()
                .map(Self::Int)
                .map_err(|err| darling::Error::custom(err.to_string()).with_span(i)),
            other => Err(darling::Error::unexpected_lit_type(other)),
        }
    }

    fn from_expr(expr: &Expr) -> darling::Result<Self> {
        match expr {
            Expr::Lit(lit) => Self::from_value(&lit.lit),
            Expr::Unary(ExprUnary {
                op: UnOp::Neg(_),
                expr: inner,
                ..
            }) => match Self::from_expr(inner)? {
                Self::Int(n) => Ok(Self::Int(-n)),
                Self::Str(_) => Err(darling::Error::custom("cannot negate a string").with_span(expr)),
            },
            Expr::Group(group) => Self::from_expr(&group.expr),
            _ => Err(darling::Error::unexpected_expr_type(expr)),
        }
    }
}

/// Rename rule for field/variant name transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromMeta)]
pub enum RenameRule {
    /// camelCase
    #[darling(rename = "camelCase")]
    CamelCase,

    /// snake_case
    #[darling(rename = "snake_case")]
    SnakeCase,

    /// PascalCase
    #[darling(rename = "PascalCase")]
    PascalCase,

    /// SCREAMING_SNAKE_CASE
    #[darling(rename = "SCREAMING_SNAKE_CASE")]
    ScreamingSnakeCase,

    /// kebab-case
    #[darling(rename = "kebab-case")]
    KebabCase,
}

impl RenameRule {
    /// Apply the rename rule to a string.
    pub fn apply(&self, name: &str) -> String {
        use convert_case::{Case, Casing};

        match self {
            RenameRule::CamelCase => name.to_case(Case::Camel),
            RenameRule::SnakeCase => name.to_case(Case::Snake),
            RenameRule::PascalCase => name.to_case(Case::Pascal),
            RenameRule::ScreamingSnakeCase => name.to_case(Case::UpperSnake),
            RenameRule::KebabCase => name.to_case(Case::Kebab),
        }
    }
}
