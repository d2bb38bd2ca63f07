//! Enum parsing logic.
//!
//! This module turns a unit-only `#[derive(JsonEnum)]` enum into an
//! [`EnumIR`]. A variant's raw value is, in order of precedence:
//!
//! - `#[json(value = ...)]`
//! - its renamed name, when the container has `rename_all` or the variant
//!   has `#[serde(rename)]`
//! - its integer discriminant, counting up from the previous variant as
//!   the compiler does

use darling::{FromDeriveInput, FromVariant};
use syn::{Data, DeriveInput, Expr, ExprUnary, Lit, UnOp};

use crate::error::{DeriveError, ParseError};
use crate::ir::validation::validate_enum;
use crate::ir::{EnumIR, RawValue, VariantIR};
use crate::parser::attributes::{EnumAttrs, RenameRule, VariantAttrs};

#[cfg(feature = "serde-compat")]
use crate::parser::serde_compat::{SerdeContainerAttrs, SerdeVariantAttrs};

/// Parses Rust enum definitions into EnumIR.
pub struct EnumParser;

impl EnumParser {
    /// Parse and validate a DeriveInput.
    pub fn parse(input: &DeriveInput) -> Result<EnumIR, DeriveError> {
        let container_attrs = EnumAttrs::from_derive_input(input)?;

        if !container_attrs.generics.params.is_empty() {
            return Err(ParseError::new("JsonEnum cannot be derived for generic types")
                .with_span(input.ident.span())
                .into());
        }

        let Data::Enum(data_enum) = &input.data else {
            return Err(ParseError::new("JsonEnum can only be derived for enums")
                .with_span(input.ident.span())
                .into());
        };

        #[cfg(feature = "serde-compat")]
        let serde_attrs = SerdeContainerAttrs::from_attrs(&input.attrs);

        // Merge rename_all: json takes precedence over serde
        #[cfg(feature = "serde-compat")]
        let rename_all = container_attrs.rename_all.or(serde_attrs.rename_all);

        #[cfg(not(feature = "serde-compat"))]
        let rename_all = container_attrs.rename_all;

        let mut variants = Vec::with_capacity(data_enum.variants.len());
        let mut next_discriminant = 0i64;

        for variant in &data_enum.variants {
            let variant_attrs = VariantAttrs::from_variant(variant)?;

            let discriminant = match &variant_attrs.discriminant {
                Some(expr) => parse_discriminant(expr)?,
                None => next_discriminant,
            };
            next_discriminant = discriminant.wrapping_add(1);

            let value = Self::raw_value(variant, variant_attrs, rename_all, discriminant);
            variants.push(VariantIR {
                ident: variant.ident.clone(),
                value,
            });
        }

        let ir = EnumIR {
            rust_name: container_attrs.ident.clone(),
            schema_name: container_attrs.schema_name(),
            variants,
        };

        validate_enum(&ir)?;
        Ok(ir)
    }

    fn raw_value(
        variant: &syn::Variant,
        variant_attrs: VariantAttrs,
        rename_all: Option<RenameRule>,
        discriminant: i64,
    ) -> RawValue {
        if let Some(value) = variant_attrs.value {
            return value.into();
        }

        #[cfg(feature = "serde-compat")]
        let serde_rename = SerdeVariantAttrs::from_attrs(&variant.attrs).rename;

        #[cfg(not(feature = "serde-compat"))]
        let serde_rename: Option<String> = {
            let _ = variant;
            None
        };

        if let Some(name) = serde_rename {
            return RawValue::Str(name);
        }
        match rename_all {
            Some(rule) => RawValue::Str(rule.apply(&variant_attrs.ident.to_string())),
            None => RawValue::Int(discriminant),
        }
    }
}

/// Evaluate an integer literal discriminant, optionally negated.
fn parse_discriminant(expr: &Expr) -> Result<i64, ParseError> {
    let unsupported = || {
        ParseError::new("JsonEnum discriminants must be integer literals")
            .with_suggestion("use `#[json(value = ...)]` for computed raw values")
    };

    match expr {
        Expr::Lit(lit) => match &lit.lit {
            Lit::Int(int) => int
                .base10_parse::<i64>()
                .map_err(|err| ParseError::new(err.to_string()).with_span(int.span())),
            _ => Err(unsupported()),
        },
        Expr::Unary(ExprUnary {
            op: UnOp::Neg(_),
            expr: inner,
            ..
        }) => parse_discriminant(inner).map(|n| -n),
        Expr::Group(group) => parse_discriminant(&group.expr),
        Expr::Paren(paren) => parse_discriminant(&paren.expr),
        _ => Err(unsupported()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn values(input: DeriveInput) -> Vec<RawValue> {
        EnumParser::parse(&input)
            .unwrap()
            .variants
            .into_iter()
            .map(|variant| variant.value)
            .collect()
    }

    #[test]
    fn test_index_raw_values() {
        let values = values(parse_quote! {
            enum Level { Low, Mid, High }
        });
        assert_eq!(values, [RawValue::Int(0), RawValue::Int(1), RawValue::Int(2)]);
    }

    #[test]
    fn test_discriminants_count_up() {
        let values = values(parse_quote! {
            enum Code { A = 10, B, C = -3, D }
        });
        assert_eq!(
            values,
            [
                RawValue::Int(10),
                RawValue::Int(11),
                RawValue::Int(-3),
                RawValue::Int(-2)
            ]
        );
    }

    #[test]
    fn test_explicit_values() {
        let values = values(parse_quote! {
            enum Switch {
                #[json(value = "on")]
                On,
                #[json(value = "off")]
                Off,
            }
        });
        assert_eq!(values, [RawValue::Str("on".into()), RawValue::Str("off".into())]);
    }

    #[test]
    fn test_rename_all_uses_names() {
        let values = values(parse_quote! {
            #[json(rename_all = "snake_case")]
            enum Status { InProgress, Done }
        });
        assert_eq!(
            values,
            [RawValue::Str("in_progress".into()), RawValue::Str("done".into())]
        );
    }

    #[test]
    #[cfg(feature = "serde-compat")]
    fn test_serde_rename() {
        let values = values(parse_quote! {
            enum Status {
                #[serde(rename = "open")]
                Open,
                Closed,
            }
        });
        assert_eq!(values, [RawValue::Str("open".into()), RawValue::Int(1)]);
    }

    #[test]
    fn test_duplicate_values_rejected() {
        let input: DeriveInput = parse_quote! {
            enum Code {
                A = 1,
                #[json(value = 1)]
                B,
            }
        };
        assert!(EnumParser::parse(&input).is_err());
    }

    #[test]
    fn test_data_variants_rejected() {
        let input: DeriveInput = parse_quote! {
            enum Shape { Circle(f64) }
        };
        assert!(matches!(
            EnumParser::parse(&input),
            Err(DeriveError::Attributes(_))
        ));
    }
}
