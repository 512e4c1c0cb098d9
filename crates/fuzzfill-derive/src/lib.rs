extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{
    parse_macro_input, parse_quote, Data, DeriveInput, Field, GenericParam, Index, Member,
    Visibility,
};

/// `#[derive(Fill)]`: populate a struct field by field from a `TypeProvider`
///
/// The generated impl asks the provider for a record filler at the current
/// depth (nothing happens once the depth limit is reached), then visits
/// every field in declaration order:
///
/// - `pub` fields go through `RecordFill::field`
/// - any other visibility goes through `RecordFill::private_field`, which
///   honours the provider's `fill_private_fields` setting
/// - `#[fill(skip)]` fields are never touched and draw no decisions
///
/// Every type parameter gets a `::fuzzfill::Fill` bound.
///
/// Example:
/// ```ignore
/// use fuzzfill::Fill;
///
/// #[derive(Default, Fill)]
/// struct Frame {
///     pub kind: u8,
///     pub body: Vec<u8>,
///     checksum: u32,          // filled only when private fields are enabled
///     #[fill(skip)]
///     handle: Option<std::fs::File>, // no Fill impl, left alone
/// }
/// ```
#[proc_macro_derive(Fill, attributes(fill))]
pub fn derive_fill(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(mut input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Fill can only be derived for structs",
        ));
    };

    let mut steps = Vec::new();
    for (index, field) in data.fields.iter().enumerate() {
        if is_skipped(field)? {
            continue;
        }

        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index::from(index)),
        };
        let call = if matches!(field.vis, Visibility::Public(_)) {
            quote!(field)
        } else {
            quote!(private_field)
        };
        steps.push(quote! {
            record.#call(&mut self.#member)?;
        });
    }

    for param in &mut input.generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::fuzzfill::Fill));
        }
    }

    let body = if steps.is_empty() {
        quote! {
            let _ = (provider, depth);
        }
    } else {
        quote! {
            if let ::core::option::Option::Some(mut record) = provider.record(depth) {
                #(#steps)*
            }
        }
    };

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::fuzzfill::Fill for #name #ty_generics #where_clause {
            fn fill(
                &mut self,
                provider: &mut ::fuzzfill::TypeProvider<'_>,
                depth: usize,
            ) -> ::core::result::Result<(), ::fuzzfill::FillError> {
                #body
                ::core::result::Result::Ok(())
            }
        }
    })
}

/// Whether a field carries `#[fill(skip)]`.
fn is_skipped(field: &Field) -> syn::Result<bool> {
    let mut skip = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("fill") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported fill attribute, expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expand_str(input: DeriveInput) -> String {
        expand(input).unwrap().to_string()
    }

    #[test]
    fn public_and_private_fields_use_different_calls() {
        let out = expand_str(parse_quote! {
            struct Frame {
                pub kind: u8,
                checksum: u32,
            }
        });

        assert!(out.contains("record . field (& mut self . kind)"));
        assert!(out.contains("record . private_field (& mut self . checksum)"));
    }

    #[test]
    fn crate_visibility_counts_as_private() {
        let out = expand_str(parse_quote! {
            struct Frame {
                pub(crate) kind: u8,
            }
        });
        assert!(out.contains("private_field (& mut self . kind)"));
    }

    #[test]
    fn tuple_struct_uses_indices() {
        let out = expand_str(parse_quote! {
            struct Pair(pub u8, u16);
        });
        assert!(out.contains("record . field (& mut self . 0)"));
        assert!(out.contains("record . private_field (& mut self . 1)"));
    }

    #[test]
    fn skipped_fields_are_absent() {
        let out = expand_str(parse_quote! {
            struct Frame {
                pub kind: u8,
                #[fill(skip)]
                pub handle: Handle,
            }
        });
        assert!(!out.contains("handle"));
    }

    #[test]
    fn unit_struct_touches_nothing() {
        let out = expand_str(parse_quote! {
            struct Marker;
        });
        assert!(!out.contains("record"));
    }

    #[test]
    fn type_parameters_get_fill_bound() {
        let out = expand_str(parse_quote! {
            struct Wrapper<T> {
                pub inner: T,
            }
        });
        assert!(out.contains("impl < T : :: fuzzfill :: Fill >"));
    }

    #[test]
    fn enums_are_rejected() {
        let err = expand(parse_quote! {
            enum Kind { A, B }
        })
        .unwrap_err();
        assert!(err.to_string().contains("only be derived for structs"));
    }

    #[test]
    fn unknown_attribute_is_an_error() {
        let result = expand(parse_quote! {
            struct Frame {
                #[fill(rename = "x")]
                pub kind: u8,
            }
        });
        assert!(result.is_err());
    }
}
