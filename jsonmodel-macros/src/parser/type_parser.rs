//! Syntactic checks on field types.
//!
//! The derive cannot resolve types, so these helpers only look at the
//! written path. They decide which fields may go without a default.

use syn::{GenericArgument, PathArguments, Type};

/// Returns the last path segment of a plain type path.
fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => type_path.path.segments.last(),
        Type::Group(group) => last_segment(&group.elem),
        Type::Paren(paren) => last_segment(&paren.elem),
        _ => None,
    }
}

/// Returns true for `Option<T>` (any path ending in `Option` with one
/// type argument).
pub fn is_option(ty: &Type) -> bool {
    option_inner(ty).is_some()
}

/// The `T` of `Option<T>`.
pub fn option_inner(ty: &Type) -> Option<&Type> {
    let segment = last_segment(ty)?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

/// Returns true if absent values decode to `null` for this type: `Option<T>`
/// and `serde_json::Value`.
pub fn is_nullable(ty: &Type) -> bool {
    is_option(ty)
        || last_segment(ty)
            .is_some_and(|segment| segment.ident == "Value" && segment.arguments.is_none())
}
