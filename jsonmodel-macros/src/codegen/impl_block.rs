//! Impl block generation for derived models and enums.
//!
//! A model gets `JsonModel` plus `FromJson`, `ToJson` and `JsonType`, so it
//! can itself be the type of another model's field. An enum gets the three
//! conversion traits over its raw values.

use proc_macro2::TokenStream;
use quote::quote;

use crate::ir::{DefaultIR, EnumIR, FieldIR, FieldRole, ModelIR, RawValue};
use crate::parser::type_parser;

/// Generates the impl blocks for a parsed model or enum.
#[derive(Debug, Default)]
pub struct ImplBlockGenerator;

impl ImplBlockGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Generate the impl blocks for a model struct.
    pub fn generate_model(&self, model: &ModelIR) -> TokenStream {
        let name = &model.rust_name;
        let schema_name = &model.schema_name;

        let descriptors = model.schema_fields().map(|field| self.field_descriptor(field));

        let extends = model.parent_field().map(|field| {
            let ty = &field.ty;
            quote! { .extends(<#ty as ::jsonmodel::JsonModel>::schema()) }
        });

        let config = model.strict_inheritance.then(|| {
            quote! {
                .with_config(
                    ::jsonmodel::SchemaConfig::new()
                        .with_collision_policy(::jsonmodel::CollisionPolicy::Reject),
                )
            }
        });

        let inits = model.fields.iter().map(|field| self.field_init(field));

        let inserts = model.schema_fields().map(|field| {
            let ident = &field.ident;
            let record_name = field.record_name();
            quote! {
                record.insert(#record_name, ::jsonmodel::ToJson::to_json(&self.#ident));
            }
        });

        let parent_insert = model.parent_field().map(|field| {
            let ident = &field.ident;
            quote! {
                record.set_parent(::jsonmodel::JsonModel::to_record(&self.#ident));
            }
        });

        let conversions = self.generate_model_conversions(model);
        let serde_impls = model.serde.then(|| self.generate_serde(model));

        quote! {
            impl ::jsonmodel::JsonModel for #name {
                fn schema() -> &'static ::jsonmodel::SchemaDescriptor {
                    static SCHEMA: ::jsonmodel::__private::OnceLock<::jsonmodel::SchemaDescriptor> =
                        ::jsonmodel::__private::OnceLock::new();
                    SCHEMA.get_or_init(|| {
                        ::jsonmodel::SchemaDescriptor::builder(#schema_name)
                            #(.field(#descriptors))*
                            #extends
                            #config
                            .build()
                            .unwrap_or_else(|err| panic!("invalid schema `{}`: {}", #schema_name, err))
                    })
                }

                #[allow(unused_mut)]
                fn from_record(mut record: ::jsonmodel::Record) -> ::jsonmodel::Result<Self> {
                    ::core::result::Result::Ok(Self {
                        #(#inits,)*
                    })
                }

                fn to_record(&self) -> ::jsonmodel::Record {
                    #[allow(unused_mut)]
                    let mut record = ::jsonmodel::Record::new();
                    #(#inserts)*
                    #parent_insert
                    record
                }
            }

            #conversions
            #serde_impls
        }
    }

    /// `FieldDescriptor` builder expression for one field.
    fn field_descriptor(&self, field: &FieldIR) -> TokenStream {
        let ty = &field.ty;
        let record_name = field.record_name();
        let keys = &field.keys;

        let default = field.default.as_ref().map(|default| {
            let value = default_expr(ty, Some(default));
            quote! {
                .default_with(|| {
                    let value: #ty = #value;
                    ::jsonmodel::ToJson::to_json(&value)
                })
            }
        });

        let transform = field
            .transform
            .as_ref()
            .map(|path| quote! { .transform::<#path>() });

        let required = field.required.then(|| quote! { .required() });

        quote! {
            ::jsonmodel::FieldDescriptor::of::<#ty>(#record_name)
                .keys([#(#keys),*])
                #default
                #transform
                #required
        }
    }

    /// Struct field initializer used by `from_record`.
    fn field_init(&self, field: &FieldIR) -> TokenStream {
        let ident = &field.ident;
        let ty = &field.ty;
        match field.role {
            FieldRole::Schema => {
                let record_name = field.record_name();
                quote! { #ident: record.take::<#ty>(#record_name)? }
            }
            FieldRole::Skipped => {
                let value = default_expr(ty, field.default.as_ref());
                quote! { #ident: #value }
            }
            FieldRole::Parent => quote! { #ident: record.take_parent_as::<#ty>()? },
        }
    }

    fn generate_model_conversions(&self, model: &ModelIR) -> TokenStream {
        let name = &model.rust_name;
        let schema_name = &model.schema_name;

        quote! {
            impl ::jsonmodel::FromJson for #name {
                fn from_json(value: &::jsonmodel::__private::Value) -> ::jsonmodel::Result<Self> {
                    <Self as ::jsonmodel::JsonModel>::decode(value)
                }
            }

            impl ::jsonmodel::ToJson for #name {
                fn to_json(&self) -> ::jsonmodel::__private::Value {
                    ::jsonmodel::JsonModel::encode_value(self)
                }
            }

            impl ::jsonmodel::JsonType for #name {
                fn field_type() -> ::jsonmodel::FieldType {
                    ::jsonmodel::FieldType::Object(::std::string::String::from(#schema_name))
                }

                fn accepts(value: &::jsonmodel::__private::Value) -> bool {
                    <Self as ::jsonmodel::JsonModel>::decode(value).is_ok()
                }
            }
        }
    }

    fn generate_serde(&self, model: &ModelIR) -> TokenStream {
        let name = &model.rust_name;

        quote! {
            impl ::jsonmodel::__private::serde::Serialize for #name {
                fn serialize<__S>(&self, serializer: __S) -> ::core::result::Result<__S::Ok, __S::Error>
                where
                    __S: ::jsonmodel::__private::serde::Serializer,
                {
                    ::jsonmodel::serde_support::serialize(self, serializer)
                }
            }

            impl<'de> ::jsonmodel::__private::serde::Deserialize<'de> for #name {
                fn deserialize<__D>(deserializer: __D) -> ::core::result::Result<Self, __D::Error>
                where
                    __D: ::jsonmodel::__private::serde::Deserializer<'de>,
                {
                    ::jsonmodel::serde_support::deserialize(deserializer)
                }
            }
        }
    }

    /// Generate the conversion impls for a raw-value enum.
    pub fn generate_enum(&self, ir: &EnumIR) -> TokenStream {
        let name = &ir.rust_name;
        let schema_name = &ir.schema_name;

        let int_arms: Vec<_> = ir
            .variants
            .iter()
            .filter_map(|variant| match &variant.value {
                RawValue::Int(n) => {
                    let ident = &variant.ident;
                    Some(quote! {
                        if raw == #n {
                            return ::core::result::Result::Ok(Self::#ident);
                        }
                    })
                }
                RawValue::Str(_) => None,
            })
            .collect();

        let str_arms: Vec<_> = ir
            .variants
            .iter()
            .filter_map(|variant| match &variant.value {
                RawValue::Str(s) => {
                    let ident = &variant.ident;
                    Some(quote! { #s => return ::core::result::Result::Ok(Self::#ident), })
                }
                RawValue::Int(_) => None,
            })
            .collect();

        // Integer raw values also match their decimal string form
        let int_block = (!int_arms.is_empty()).then(|| {
            quote! {
                let raw = match value {
                    ::jsonmodel::__private::Value::Number(number) => number.as_i64(),
                    ::jsonmodel::__private::Value::String(text) => text.trim().parse::<i64>().ok(),
                    _ => ::core::option::Option::None,
                };
                if let ::core::option::Option::Some(raw) = raw {
                    #(#int_arms)*
                }
            }
        });

        let str_block = (!str_arms.is_empty()).then(|| {
            quote! {
                if let ::jsonmodel::__private::Value::String(text) = value {
                    #[allow(clippy::single_match)]
                    match text.as_str() {
                        #(#str_arms)*
                        _ => {}
                    }
                }
            }
        });

        let to_json_arms = ir.variants.iter().map(|variant| {
            let ident = &variant.ident;
            match &variant.value {
                RawValue::Int(n) => quote! { Self::#ident => ::jsonmodel::__private::Value::from(#n), },
                RawValue::Str(s) => quote! { Self::#ident => ::jsonmodel::__private::Value::from(#s), },
            }
        });

        quote! {
            impl ::jsonmodel::FromJson for #name {
                fn from_json(value: &::jsonmodel::__private::Value) -> ::jsonmodel::Result<Self> {
                    #int_block
                    #str_block
                    ::core::result::Result::Err(::jsonmodel::Error::mismatch(
                        #schema_name,
                        ::jsonmodel::types::shape_of(value),
                    ))
                }
            }

            impl ::jsonmodel::ToJson for #name {
                fn to_json(&self) -> ::jsonmodel::__private::Value {
                    match self {
                        #(#to_json_arms)*
                    }
                }
            }

            impl ::jsonmodel::JsonType for #name {
                fn field_type() -> ::jsonmodel::FieldType {
                    ::jsonmodel::FieldType::Object(::std::string::String::from(#schema_name))
                }

                fn accepts(value: &::jsonmodel::__private::Value) -> bool {
                    <Self as ::jsonmodel::FromJson>::from_json(value).is_ok()
                }
            }
        }
    }
}

/// Expression of type `ty` for a field's default.
fn default_expr(ty: &syn::Type, default: Option<&DefaultIR>) -> TokenStream {
    match default {
        None | Some(DefaultIR::Trait) => quote! { <#ty as ::core::default::Default>::default() },
        Some(DefaultIR::Path(path)) => quote! { #path() },
        Some(DefaultIR::Literal { expr, is_str }) => {
            let value = if *is_str {
                quote! { ::core::convert::From::from(#expr) }
            } else {
                quote! { #expr }
            };
            if type_parser::is_option(ty) {
                quote! { ::core::option::Option::Some(#value) }
            } else {
                value
            }
        }
    }
}
