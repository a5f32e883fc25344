//! Derive macro implementation for secretconf

use proc_macro::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod attrs;
mod kind;

use attrs::FieldAttrs;
use kind::Kind;

/// `SecretConf` derive macro
///
/// Implements `secretconf::SecretConf` so a `secretconf::Loader` can
/// populate the struct.
///
/// # Supported Attributes
///
/// **Field-level**:
/// - `#[secret("KEY")]`: Resolve from env var / secret `KEY`
/// - `#[secret("KEY,default=VALUE")]`: Fall back to `VALUE`
/// - `#[secret("KEY,required")]`: Abort the load if the field cannot be set
/// - `#[secret("-")]`: Leave the field untouched
///
/// Fields without `#[secret]` are left untouched as well.
///
/// # Example
///
/// See the `secretconf` crate documentation for usage examples.
#[proc_macro_derive(SecretConf, attributes(secret))]
pub fn derive_secretconf(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "SecretConf only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "SecretConf only supports structs",
            ));
        }
    };

    let mut specs = Vec::with_capacity(fields.len());
    let mut assign_arms = Vec::new();

    for field in fields {
        let Some(field_ident) = field.ident.as_ref() else {
            continue;
        };
        let field_name = field_ident.unraw().to_string();
        let attrs = FieldAttrs::from_field(field)?;
        let kind = Kind::of(&field.ty);

        let annotation = match &attrs.annotation {
            Some(a) => quote!(::core::option::Option::Some(#a)),
            None => quote!(::core::option::Option::None),
        };
        let field_kind = kind.to_field_kind();

        specs.push(quote! {
            ::secretconf::FieldSpec {
                name: #field_name,
                annotation: #annotation,
                kind: #field_kind,
            }
        });

        // Unsupported fields are reported by the loader before any assignment
        if kind.is_supported() {
            assign_arms.push(quote! {
                #field_name => ::secretconf::de::assign(&mut self.#field_ident, field, value),
            });
        }
    }

    Ok(quote! {
        impl #impl_generics ::secretconf::SecretConf for #struct_name #ty_generics #where_clause {
            fn fields() -> &'static [::secretconf::FieldSpec] {
                const FIELDS: &[::secretconf::FieldSpec] = &[
                    #(#specs),*
                ];
                FIELDS
            }

            fn assign(
                &mut self,
                field: &str,
                value: ::secretconf::FieldValue,
            ) -> ::secretconf::Result<()> {
                match field {
                    #(#assign_arms)*
                    _ => ::core::result::Result::Err(
                        ::secretconf::Error::invalid_target::<Self>(
                            ::std::format!("no settable field named '{}'", field),
                        ),
                    ),
                }
            }
        }
    })
}
