//! Classification of field types into `secretconf::FieldKind`.

use proc_macro2::TokenStream;
use quote::{format_ident, quote, ToTokens};
use syn::{GenericArgument, PathArguments, Type};

/// Field type as seen by the loader.
#[derive(Debug, PartialEq, Eq)]
pub enum Kind {
    String,
    SignedInt(String),
    UnsignedInt(String),
    Float(u32),
    Bool,
    StringList,
    Unsupported(String),
}

impl Kind {
    /// Classify by the last path segment of the declared type.
    ///
    /// Only bare paths and paths rooted at `std`, `core` or `alloc` count;
    /// a user type named `String` elsewhere is `Unsupported`.
    pub fn of(ty: &Type) -> Self {
        let Some(ident) = last_segment(ty).map(|seg| seg.ident.to_string()) else {
            return Self::unsupported(ty);
        };

        match ident.as_str() {
            "String" => Self::String,
            "i8" | "i16" | "i32" | "i64" | "isize" => Self::SignedInt(ident),
            "u8" | "u16" | "u32" | "u64" | "usize" => Self::UnsignedInt(ident),
            "f32" => Self::Float(32),
            "f64" => Self::Float(64),
            "bool" => Self::Bool,
            "Vec" if is_vec_of_string(ty) => Self::StringList,
            _ => Self::unsupported(ty),
        }
    }

    /// Whether the loader can assign values of this kind.
    pub fn is_supported(&self) -> bool {
        !matches!(self, Self::Unsupported(_))
    }

    /// `::secretconf::FieldKind` constructor for this kind.
    pub fn to_field_kind(&self) -> TokenStream {
        match self {
            Self::String => quote!(::secretconf::FieldKind::String),
            Self::SignedInt(name) => {
                let ty = format_ident!("{}", name);
                quote!(::secretconf::FieldKind::SignedInt(::core::primitive::#ty::BITS))
            }
            Self::UnsignedInt(name) => {
                let ty = format_ident!("{}", name);
                quote!(::secretconf::FieldKind::UnsignedInt(::core::primitive::#ty::BITS))
            }
            Self::Float(bits) => quote!(::secretconf::FieldKind::Float(#bits)),
            Self::Bool => quote!(::secretconf::FieldKind::Bool),
            Self::StringList => quote!(::secretconf::FieldKind::StringList),
            Self::Unsupported(type_name) => {
                quote!(::secretconf::FieldKind::Unsupported { type_name: #type_name })
            }
        }
    }

    fn unsupported(ty: &Type) -> Self {
        let type_name = ty
            .to_token_stream()
            .to_string()
            .replace(" :: ", "::")
            .replace(":: ", "::")
            .replace(" < ", "<")
            .replace("< ", "<")
            .replace(" >", ">")
            .replace(" ,", ",");
        Self::Unsupported(type_name)
    }
}

fn last_segment(ty: &Type) -> Option<&syn::PathSegment> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() && is_std_path(&type_path.path) => {
            type_path.path.segments.last()
        }
        _ => None,
    }
}

fn is_std_path(path: &syn::Path) -> bool {
    match path.segments.first() {
        Some(_) if path.segments.len() == 1 && path.leading_colon.is_none() => true,
        Some(root) => ["std", "core", "alloc"]
            .iter()
            .any(|name| root.ident == *name),
        None => false,
    }
}

/// Match `Vec<String>` (with any path prefix on either part).
fn is_vec_of_string(ty: &Type) -> bool {
    let Some(seg) = last_segment(ty) else {
        return false;
    };
    let PathArguments::AngleBracketed(args) = &seg.arguments else {
        return false;
    };
    match (args.args.len(), args.args.first()) {
        (1, Some(GenericArgument::Type(inner))) => {
            last_segment(inner).is_some_and(|s| s.ident == "String" && s.arguments.is_empty())
        }
        _ => false,
    }
}
