//! Serde attribute compatibility.
//!
//! This module handles parsing serde attributes when the `serde-compat`
//! feature is enabled. It lets existing serde configuration shape the
//! implicit keys, with json attributes taking precedence when both are
//! present.

use syn::Attribute;

use super::attributes::RenameRule;

/// Serde container attributes extracted from `#[serde(...)]`.
#[derive(Debug, Clone, Default)]
pub struct SerdeContainerAttrs {
    /// Rename the type
    pub rename: Option<String>,

    /// Rename all fields using a case convention
    pub rename_all: Option<RenameRule>,
}

impl SerdeContainerAttrs {
    /// Parse serde attributes from a list of attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> Self {
        let mut result = Self::default();

        for attr in serde_attrs(attrs) {
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    result.rename = Some(parse_string_value(&meta)?);
                } else if meta.path.is_ident("rename_all") {
                    result.rename_all = parse_rename_rule(&parse_string_value(&meta)?);
                } else {
                    skip_value(&meta)?;
                }
                Ok(())
            });
        }

        result
    }
}

/// Serde field attributes extracted from `#[serde(...)]`.
#[derive(Debug, Clone, Default)]
pub struct SerdeFieldAttrs {
    /// Rename this field
    pub rename: Option<String>,

    /// Skip this field
    pub skip: bool,

    /// Skip serializing this field
    pub skip_serializing: bool,

    /// Skip deserializing this field
    pub skip_deserializing: bool,

    /// Field falls back to `Default::default()`
    pub default: bool,
}

impl SerdeFieldAttrs {
    /// Parse serde attributes from a list of attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> Self {
        let mut result = Self::default();

        for attr in serde_attrs(attrs) {
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    result.rename = Some(parse_string_value(&meta)?);
                } else if meta.path.is_ident("skip") {
                    result.skip = true;
                } else if meta.path.is_ident("skip_serializing") {
                    result.skip_serializing = true;
                } else if meta.path.is_ident("skip_deserializing") {
                    result.skip_deserializing = true;
                } else if meta.path.is_ident("default") {
                    // `default = "path"` is left to the json attribute
                    if meta.input.peek(syn::Token![=]) {
                        skip_value(&meta)?;
                    } else {
                        result.default = true;
                    }
                } else {
                    skip_value(&meta)?;
                }
                Ok(())
            });
        }

        result
    }

    /// A field skipped in either direction is left out of the schema, since
    /// decode and encode must stay symmetric.
    pub fn should_skip(&self) -> bool {
        self.skip || self.skip_serializing || self.skip_deserializing
    }
}

/// Serde variant attributes extracted from `#[serde(...)]`.
#[derive(Debug, Clone, Default)]
pub struct SerdeVariantAttrs {
    /// Rename this variant
    pub rename: Option<String>,
}

impl SerdeVariantAttrs {
    pub fn from_attrs(attrs: &[Attribute]) -> Self {
        let mut result = Self::default();

        for attr in serde_attrs(attrs) {
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename") {
                    result.rename = Some(parse_string_value(&meta)?);
                } else {
                    skip_value(&meta)?;
                }
                Ok(())
            });
        }

        result
    }
}

fn serde_attrs(attrs: &[Attribute]) -> impl Iterator<Item = &Attribute> {
    attrs.iter().filter(|attr| attr.path().is_ident("serde"))
}

/// Parse a string value from a meta item like `rename = "value"`.
fn parse_string_value(meta: &syn::meta::ParseNestedMeta) -> syn::Result<String> {
    let value: syn::LitStr = meta.value()?.parse()?;
    Ok(value.value())
}

/// Consume the value of a meta item this module does not interpret.
fn skip_value(meta: &syn::meta::ParseNestedMeta) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        let _: syn::Expr = meta.value()?.parse()?;
    } else if meta.input.peek(syn::token::Paren) {
        meta.parse_nested_meta(|nested| skip_value(&nested))?;
    }
    Ok(())
}

/// Parse a serde rename rule string into our RenameRule enum.
fn parse_rename_rule(s: &str) -> Option<RenameRule> {
    match s {
        "camelCase" => Some(RenameRule::CamelCase),
        "snake_case" => Some(RenameRule::SnakeCase),
        "PascalCase" => Some(RenameRule::PascalCase),
        "SCREAMING_SNAKE_CASE" => Some(RenameRule::ScreamingSnakeCase),
        "kebab-case" => Some(RenameRule::KebabCase),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_rename_rule() {
        assert_eq!(parse_rename_rule("camelCase"), Some(RenameRule::CamelCase));
        assert_eq!(parse_rename_rule("kebab-case"), Some(RenameRule::KebabCase));
        assert_eq!(parse_rename_rule("unknown"), None);
    }

    #[test]
    fn test_container_attrs() {
        let attrs: Vec<Attribute> = vec![
            parse_quote!(#[serde(deny_unknown_fields, rename_all = "camelCase")]),
            parse_quote!(#[serde(rename = "Person")]),
        ];
        let serde = SerdeContainerAttrs::from_attrs(&attrs);
        assert_eq!(serde.rename_all, Some(RenameRule::CamelCase));
        assert_eq!(serde.rename.as_deref(), Some("Person"));
    }

    #[test]
    fn test_field_attrs() {
        let attrs: Vec<Attribute> = vec![parse_quote!(
            #[serde(rename = "id", default, skip_serializing_if = "Option::is_none")]
        )];
        let serde = SerdeFieldAttrs::from_attrs(&attrs);
        assert_eq!(serde.rename.as_deref(), Some("id"));
        assert!(serde.default);
        assert!(!serde.should_skip());
    }

    #[test]
    fn test_serde_field_attrs_should_skip() {
        let mut attrs = SerdeFieldAttrs::default();
        assert!(!attrs.should_skip());

        attrs.skip_serializing = true;
        assert!(attrs.should_skip());

        attrs.skip_serializing = false;
        attrs.skip_deserializing = true;
        assert!(attrs.should_skip());
    }

    #[test]
    fn test_default_path_not_treated_as_trait_default() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(default = "make")])];
        assert!(!SerdeFieldAttrs::from_attrs(&attrs).default);
    }

    #[test]
    fn test_variant_attrs() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[serde(rename = "on")])];
        assert_eq!(SerdeVariantAttrs::from_attrs(&attrs).rename.as_deref(), Some("on"));
    }
}
