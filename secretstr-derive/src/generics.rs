//! Generic type parameter handling and trait bound management.
//!
//! Bounds are added only for generics used by `#[secret]` fields.
//!
//! ## PhantomData Handling
//!
//! `PhantomData<T>` is skipped when collecting generics, so a marker field
//! never forces `T: Disclose`:
//!
//! ```ignore
//! struct Tagged<T> {
//!     #[secret]
//!     value: SecretString,
//!     _marker: PhantomData<T>,
//! }
//! ```

use syn::{parse_quote, Ident};

use crate::crate_path;

pub(crate) fn collect_generics_from_type(
    ty: &syn::Type,
    generics: &syn::Generics,
    result: &mut Vec<Ident>,
) {
    let syn::Type::Path(path) = ty else {
        return;
    };
    let Some(segment) = path.path.segments.last() else {
        return;
    };
    if segment.ident == "PhantomData" {
        return;
    }

    if let syn::PathArguments::AngleBracketed(args) = &segment.arguments {
        for arg in &args.args {
            if let syn::GenericArgument::Type(inner_ty) = arg {
                collect_generics_from_type(inner_ty, generics, result);
            }
        }
    }

    for param in generics.type_params() {
        if segment.ident == param.ident && !result.iter().any(|g| g == &param.ident) {
            result.push(param.ident.clone());
        }
    }
}

/// Adds `Disclose` bounds to generic parameters used in `#[secret]` fields.
pub(crate) fn add_disclose_bounds(
    mut generics: syn::Generics,
    used_generics: &[Ident],
) -> syn::Generics {
    for param in generics.type_params_mut() {
        if used_generics.iter().any(|g| g == &param.ident) {
            let disclose_path = crate_path("Disclose");
            param.bounds.push(parse_quote!(#disclose_path));
        }
    }
    generics
}
