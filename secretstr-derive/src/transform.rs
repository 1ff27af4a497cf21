//! Shared field transformation logic for struct and enum derivation.

use proc_macro2::{Ident, Span, TokenStream};
use quote::{quote, quote_spanned};
use syn::Result;

use crate::{generics::collect_generics_from_type, strategy::Strategy, types::is_scalar_type};

/// Accumulated state during field processing.
pub(crate) struct DeriveContext<'a> {
    pub(crate) generics: &'a syn::Generics,
    pub(crate) disclose_path: &'a TokenStream,
    pub(crate) used_generics: &'a mut Vec<Ident>,
}

/// The statements rebinding one field in `disclose()` and in `conceal()`.
pub(crate) struct FieldTransform {
    pub(crate) disclose: TokenStream,
    pub(crate) conceal: TokenStream,
}

/// Generates both transforms for a single field.
///
/// | Annotation | `disclose()` | `conceal()` |
/// |------------|--------------|-------------|
/// | None | identity | identity |
/// | `#[secret]` | `Disclose::disclose` | `Disclose::conceal` |
/// | `#[secret(redact)]` | `Disclose::conceal` | `Disclose::conceal` |
pub(crate) fn generate_field_transform(
    ctx: &mut DeriveContext<'_>,
    ty: &syn::Type,
    binding: &Ident,
    span: Span,
    strategy: Strategy,
) -> Result<FieldTransform> {
    let disclose_path = ctx.disclose_path;

    if strategy == Strategy::PassThrough {
        return Ok(FieldTransform {
            disclose: quote! {},
            conceal: quote! {},
        });
    }

    if is_scalar_type(ty) {
        return Err(syn::Error::new(
            span,
            "scalar fields cannot hold secrets: remove #[secret] or use SecretString",
        ));
    }

    collect_generics_from_type(ty, ctx.generics, ctx.used_generics);

    let conceal = quote_spanned! { span =>
        let #binding = #disclose_path::conceal(#binding);
    };
    let disclose = match strategy {
        Strategy::Disclose => quote_spanned! { span =>
            let #binding = #disclose_path::disclose(#binding);
        },
        _ => conceal.clone(),
    };

    Ok(FieldTransform { disclose, conceal })
}
