//! Derive macro for `secretstr`.
//!
//! This crate generates the traversal code behind `#[derive(Disclose)]`. It:
//! - reads `#[secret]` / `#[secret(redact)]` field attributes
//! - emits a `Disclose` implementation that rebinds each annotated field
//!
//! It does **not** decide how secrets render. That lives in the main
//! `secretstr` crate and is applied at format/serialize time.

// <https://doc.rust-lang.org/rustc/lints/listing/allowed-by-default.html>
#![warn(
    anonymous_parameters,
    bare_trait_objects,
    elided_lifetimes_in_paths,
    missing_copy_implementations,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unused_extern_crates,
    unused_import_braces
)]
// <https://rust-lang.github.io/rust-clippy/stable>
#![warn(
    clippy::all,
    clippy::cargo,
    clippy::dbg_macro,
    clippy::float_cmp_const,
    clippy::get_unwrap,
    clippy::mem_forget,
    clippy::nursery,
    clippy::pedantic,
    clippy::todo,
    clippy::unwrap_used,
    clippy::uninlined_format_args
)]
// Allow some clippy lints
#![allow(
    clippy::doc_markdown,
    clippy::module_name_repetitions,
    clippy::multiple_crate_versions,
    clippy::must_use_candidate,
    clippy::needless_pass_by_value,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

#[allow(unused_extern_crates)]
extern crate proc_macro;

use proc_macro2::{Ident, TokenStream};
use proc_macro_crate::{crate_name, FoundCrate};
use quote::{format_ident, quote};
use syn::{parse_macro_input, spanned::Spanned, Data, DeriveInput, Result};

mod derive_enum;
mod derive_struct;
mod generics;
mod strategy;
mod transform;
mod types;
use derive_enum::derive_enum;
use derive_struct::derive_struct;
use generics::add_disclose_bounds;

/// Derives `secretstr::Disclose` for structs and enums.
///
/// # Field Attributes
///
/// - **No annotation**: the field passes through unchanged in both
///   directions. Secrets in it keep the marshal flag they were built with.
///
/// - `#[secret]`: `disclose()` makes the field serialize its raw value;
///   `conceal()` makes it serialize redacted. For nested types that derive
///   `Disclose`, this walks into them and their own annotations apply. Works
///   through `Option`, `Vec`, `Box`, `Result`, `HashMap`, and `BTreeMap`.
///
/// - `#[secret(redact)]`: the field is concealed by both `disclose()` and
///   `conceal()`, so it stays redacted while its siblings are revealed.
///
/// Annotating a primitive scalar (i32, bool, ...) is a compile error, as are
/// unknown options, duplicate attributes, and unions.
#[proc_macro_derive(Disclose, attributes(secret))]
pub fn derive_disclose(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match expand(input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}

/// Returns the token stream to reference the secretstr crate root.
///
/// Handles crate renaming (e.g., `secrets = { package = "secretstr", ... }`).
/// Inside `secretstr` itself, `::secretstr` resolves through its
/// `extern crate self as secretstr`, which also keeps doctests working.
fn crate_root() -> TokenStream {
    match crate_name("secretstr") {
        Ok(FoundCrate::Name(name)) => {
            let ident = format_ident!("{}", name);
            quote! { ::#ident }
        }
        Ok(FoundCrate::Itself) | Err(_) => quote! { ::secretstr },
    }
}

fn crate_path(item: &str) -> TokenStream {
    let root = crate_root();
    let item_ident = format_ident!("{}", item);
    quote! { #root::#item_ident }
}

/// Bodies of the generated `disclose` and `conceal` methods.
pub(crate) struct DeriveOutput {
    pub(crate) disclose_body: TokenStream,
    pub(crate) conceal_body: TokenStream,
    pub(crate) used_generics: Vec<Ident>,
}

fn expand(input: DeriveInput) -> Result<TokenStream> {
    let DeriveInput {
        ident,
        generics,
        data,
        ..
    } = input;

    let disclose_path = crate_path("Disclose");

    let output = match data {
        Data::Struct(data) => derive_struct(data, &generics, &disclose_path)?,
        Data::Enum(data) => derive_enum(&ident, data, &generics, &disclose_path)?,
        Data::Union(u) => {
            return Err(syn::Error::new(
                u.union_token.span(),
                "`Disclose` cannot be derived for unions",
            ));
        }
    };

    let bounded = add_disclose_bounds(generics, &output.used_generics);
    let (impl_generics, ty_generics, where_clause) = bounded.split_for_impl();
    let DeriveOutput {
        disclose_body,
        conceal_body,
        ..
    } = output;

    Ok(quote! {
        impl #impl_generics #disclose_path for #ident #ty_generics #where_clause {
            fn disclose(self) -> Self {
                #disclose_body
            }

            fn conceal(self) -> Self {
                #conceal_body
            }
        }
    })
}
