//! Struct-specific `Disclose` derivation.
//!
//! This module generates the field rebinding for struct fields and collects
//! generic parameters that require trait bounds.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{spanned::Spanned, DataStruct, Fields, Result};

use crate::{
    strategy::parse_field_strategy,
    transform::{generate_field_transform, DeriveContext},
    DeriveOutput,
};

pub(crate) fn derive_struct(
    data: DataStruct,
    generics: &syn::Generics,
    disclose_path: &TokenStream,
) -> Result<DeriveOutput> {
    let mut used_generics = Vec::new();
    let mut ctx = DeriveContext {
        generics,
        disclose_path,
        used_generics: &mut used_generics,
    };

    let (disclose_body, conceal_body) = match data.fields {
        Fields::Named(fields) => {
            let mut bindings: Vec<Ident> = Vec::new();
            let mut disclose = Vec::new();
            let mut conceal = Vec::new();
            for field in fields.named {
                let span = field.span();
                let strategy = parse_field_strategy(&field.attrs)?;
                let ident = field.ident.expect("named field should have an identifier");
                let transform = generate_field_transform(&mut ctx, &field.ty, &ident, span, strategy)?;
                disclose.push(transform.disclose);
                conceal.push(transform.conceal);
                bindings.push(ident);
            }
            (
                quote! {
                    let Self { #(#bindings),* } = self;
                    #(#disclose)*
                    Self { #(#bindings),* }
                },
                quote! {
                    let Self { #(#bindings),* } = self;
                    #(#conceal)*
                    Self { #(#bindings),* }
                },
            )
        }
        Fields::Unnamed(fields) => {
            let mut bindings: Vec<Ident> = Vec::new();
            let mut disclose = Vec::new();
            let mut conceal = Vec::new();
            for (index, field) in fields.unnamed.into_iter().enumerate() {
                let span = field.span();
                let strategy = parse_field_strategy(&field.attrs)?;
                let ident = format_ident!("field_{index}");
                let transform = generate_field_transform(&mut ctx, &field.ty, &ident, span, strategy)?;
                disclose.push(transform.disclose);
                conceal.push(transform.conceal);
                bindings.push(ident);
            }
            (
                quote! {
                    let Self ( #(#bindings),* ) = self;
                    #(#disclose)*
                    Self ( #(#bindings),* )
                },
                quote! {
                    let Self ( #(#bindings),* ) = self;
                    #(#conceal)*
                    Self ( #(#bindings),* )
                },
            )
        }
        Fields::Unit => (quote! { self }, quote! { self }),
    };

    Ok(DeriveOutput {
        disclose_body,
        conceal_body,
        used_generics,
    })
}
