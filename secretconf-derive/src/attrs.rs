//! Attribute parsing for `#[secret("...")]` annotations.
//!
//! The annotation string is passed through untouched; the runtime parses
//! it on every load so its semantics live in one place.

use syn::{Field, LitStr};

/// Parsed `#[secret(...)]` attribute from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Raw annotation, e.g. `"API_KEY,default=x,required"` or `"-"`.
    ///
    /// `None` when the field carries no `#[secret]` attribute.
    pub annotation: Option<String>,
}

impl FieldAttrs {
    /// Extract the `#[secret("...")]` attribute from a struct field.
    ///
    /// Rejects malformed or repeated attributes so mistakes surface at
    /// compile time instead of silently skipping the field.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("secret") {
                continue;
            }

            if attrs.annotation.is_some() {
                return Err(syn::Error::new_spanned(
                    attr,
                    "duplicate #[secret] attribute; combine options in one string",
                ));
            }

            let lit: LitStr = attr.parse_args().map_err(|e| {
                syn::Error::new(
                    e.span(),
                    "expected a string literal, e.g. #[secret(\"API_KEY,default=value\")]",
                )
            })?;
            attrs.annotation = Some(lit.value());
        }

        Ok(attrs)
    }
}
