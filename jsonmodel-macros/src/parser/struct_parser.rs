//! Struct parsing logic.
//!
//! This module turns a `#[derive(JsonModel)]` struct into a [`ModelIR`].
//! Only named-field, non-generic structs are supported. Per field, the
//! candidate keys are resolved with this precedence:
//!
//! 1. explicit `#[json(key = "...")]` entries, in order
//! 2. `#[serde(rename = "...")]`
//! 3. the field name, after the container's `rename_all`

use darling::{FromDeriveInput, FromField};
use syn::{Data, DeriveInput, Fields};

use crate::error::{DeriveError, ParseError};
use crate::ir::validation::validate_model;
use crate::ir::{DefaultIR, FieldIR, FieldRole, ModelIR};
use crate::parser::attributes::{ContainerAttrs, DefaultAttr, FieldAttrs, RenameRule};
use crate::parser::type_parser;

#[cfg(feature = "serde-compat")]
use crate::parser::serde_compat::{SerdeContainerAttrs, SerdeFieldAttrs};

/// Parses Rust struct definitions into ModelIR.
pub struct StructParser;

impl StructParser {
    /// Parse and validate a DeriveInput.
    pub fn parse(input: &DeriveInput) -> Result<ModelIR, DeriveError> {
        let container_attrs = ContainerAttrs::from_derive_input(input)?;

        if !container_attrs.generics.params.is_empty() {
            return Err(ParseError::new("JsonModel cannot be derived for generic types")
                .with_span(input.ident.span())
                .into());
        }

        #[cfg(feature = "serde-compat")]
        let serde_container_attrs = SerdeContainerAttrs::from_attrs(&input.attrs);

        // Merge rename_all: json takes precedence over serde
        #[cfg(feature = "serde-compat")]
        let effective_rename_all = container_attrs
            .rename_all
            .or(serde_container_attrs.rename_all);

        #[cfg(not(feature = "serde-compat"))]
        let effective_rename_all = container_attrs.rename_all;

        #[cfg(feature = "serde-compat")]
        let schema_name = container_attrs
            .rename
            .clone()
            .or(serde_container_attrs.rename)
            .unwrap_or_else(|| container_attrs.schema_name());

        #[cfg(not(feature = "serde-compat"))]
        let schema_name = container_attrs.schema_name();

        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(fields) => Self::parse_named_fields(fields, effective_rename_all)?,
                _ => {
                    return Err(ParseError::new("JsonModel requires named fields")
                        .with_span(input.ident.span())
                        .into());
                }
            },
            _ => {
                return Err(ParseError::new("JsonModel can only be derived for structs")
                    .with_span(input.ident.span())
                    .into());
            }
        };

        let model = ModelIR {
            rust_name: container_attrs.ident.clone(),
            schema_name,
            fields,
            strict_inheritance: container_attrs.strict_inheritance,
            serde: container_attrs.serde,
        };

        validate_model(&model)?;
        Ok(model)
    }

    /// Parse named struct fields into FieldIR.
    fn parse_named_fields(
        fields: &syn::FieldsNamed,
        rename_all: Option<RenameRule>,
    ) -> Result<Vec<FieldIR>, DeriveError> {
        let mut field_irs = Vec::with_capacity(fields.named.len());
        let mut errors = darling::Error::accumulator();

        for field in &fields.named {
            let Some(field_attrs) = errors.handle(FieldAttrs::from_field(field)) else {
                continue;
            };
            field_irs.push(Self::parse_field(field, field_attrs, rename_all)?);
        }

        errors.finish()?;
        Ok(field_irs)
    }

    fn parse_field(
        field: &syn::Field,
        field_attrs: FieldAttrs,
        rename_all: Option<RenameRule>,
    ) -> Result<FieldIR, DeriveError> {
        #[cfg(feature = "serde-compat")]
        let serde_field_attrs = SerdeFieldAttrs::from_attrs(&field.attrs);

        let ident = field
            .ident
            .clone()
            .ok_or_else(|| ParseError::new("JsonModel requires named fields"))?;
        let span = ident.span();

        if field_attrs.default.is_some() && field_attrs.default_value.is_some() {
            return Err(ParseError::new(format!(
                "field `{}` declares both `default` and `default_value`",
                ident
            ))
            .with_span(span)
            .into());
        }

        if field_attrs.parent {
            let has_codec_attrs = !field_attrs.keys.is_empty()
                || field_attrs.default.is_some()
                || field_attrs.default_value.is_some()
                || field_attrs.transform.is_some()
                || field_attrs.required
                || field_attrs.skip;
            if has_codec_attrs {
                return Err(ParseError::new(format!(
                    "parent field `{}` takes no other `json` attributes",
                    ident
                ))
                .with_span(span)
                .with_suggestion("declare keys and defaults on the parent model's own fields")
                .into());
            }
            return Ok(FieldIR {
                ident,
                ty: field.ty.clone(),
                role: FieldRole::Parent,
                keys: Vec::new(),
                default: None,
                transform: None,
                required: false,
                nullable: false,
                span,
            });
        }

        // Merge skip: json takes precedence, but serde skip also applies
        #[cfg(feature = "serde-compat")]
        let should_skip = field_attrs.skip || serde_field_attrs.should_skip();

        #[cfg(not(feature = "serde-compat"))]
        let should_skip = field_attrs.skip;

        // Priority: json keys > serde rename > rename_all rule > field name
        let keys = if !field_attrs.keys.is_empty() {
            field_attrs.keys.clone()
        } else {
            #[cfg(feature = "serde-compat")]
            let serde_rename = serde_field_attrs.rename.clone();

            #[cfg(not(feature = "serde-compat"))]
            let serde_rename: Option<String> = None;

            vec![serde_rename.unwrap_or_else(|| field_attrs.implicit_key(rename_all))]
        };

        let default = match (&field_attrs.default, &field_attrs.default_value) {
            (Some(DefaultAttr::Trait), _) => Some(DefaultIR::Trait),
            (Some(DefaultAttr::Path(path)), _) => Some(DefaultIR::Path(path.clone())),
            (None, Some(literal)) => Some(DefaultIR::Literal {
                expr: literal.0.clone(),
                is_str: literal.is_str(),
            }),
            #[cfg(feature = "serde-compat")]
            (None, None) if serde_field_attrs.default => Some(DefaultIR::Trait),
            (None, None) => None,
        };

        Ok(FieldIR {
            nullable: type_parser::is_nullable(&field.ty),
            ident,
            ty: field.ty.clone(),
            role: if should_skip {
                FieldRole::Skipped
            } else {
                FieldRole::Schema
            },
            keys,
            default,
            transform: field_attrs.transform,
            required: field_attrs.required,
            span,
        })
    }
}
