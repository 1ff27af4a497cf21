//! Enum-specific `Disclose` derivation.
//!
//! This module generates match arms for each variant and collects generic
//! parameters that require trait bounds.

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};
use syn::{spanned::Spanned, DataEnum, Fields, Result};

use crate::{
    strategy::parse_field_strategy,
    transform::{generate_field_transform, DeriveContext},
    DeriveOutput,
};

pub(crate) fn derive_enum(
    name: &Ident,
    data: DataEnum,
    generics: &syn::Generics,
    disclose_path: &TokenStream,
) -> Result<DeriveOutput> {
    let mut used_generics = Vec::new();
    let mut disclose_arms = Vec::new();
    let mut conceal_arms = Vec::new();

    for variant in data.variants {
        let variant_ident = &variant.ident;
        let mut ctx = DeriveContext {
            generics,
            disclose_path,
            used_generics: &mut used_generics,
        };

        match variant.fields {
            Fields::Unit => {
                disclose_arms.push(quote! { #name::#variant_ident => #name::#variant_ident });
                conceal_arms.push(quote! { #name::#variant_ident => #name::#variant_ident });
            }
            Fields::Named(fields) => {
                let mut bindings: Vec<Ident> = Vec::new();
                let mut disclose = Vec::new();
                let mut conceal = Vec::new();
                for field in fields.named {
                    let span = field.span();
                    let strategy = parse_field_strategy(&field.attrs)?;
                    let ident = field.ident.expect("named field should have an identifier");
                    let transform =
                        generate_field_transform(&mut ctx, &field.ty, &ident, span, strategy)?;
                    disclose.push(transform.disclose);
                    conceal.push(transform.conceal);
                    bindings.push(ident);
                }
                disclose_arms.push(quote! {
                    #name::#variant_ident { #(#bindings),* } => {
                        #(#disclose)*
                        #name::#variant_ident { #(#bindings),* }
                    }
                });
                conceal_arms.push(quote! {
                    #name::#variant_ident { #(#bindings),* } => {
                        #(#conceal)*
                        #name::#variant_ident { #(#bindings),* }
                    }
                });
            }
            Fields::Unnamed(fields) => {
                let mut bindings: Vec<Ident> = Vec::new();
                let mut disclose = Vec::new();
                let mut conceal = Vec::new();
                for (index, field) in fields.unnamed.into_iter().enumerate() {
                    let span = field.span();
                    let strategy = parse_field_strategy(&field.attrs)?;
                    let ident = format_ident!("field_{index}");
                    let transform =
                        generate_field_transform(&mut ctx, &field.ty, &ident, span, strategy)?;
                    disclose.push(transform.disclose);
                    conceal.push(transform.conceal);
                    bindings.push(ident);
                }
                disclose_arms.push(quote! {
                    #name::#variant_ident ( #(#bindings),* ) => {
                        #(#disclose)*
                        #name::#variant_ident ( #(#bindings),* )
                    }
                });
                conceal_arms.push(quote! {
                    #name::#variant_ident ( #(#bindings),* ) => {
                        #(#conceal)*
                        #name::#variant_ident ( #(#bindings),* )
                    }
                });
            }
        }
    }

    Ok(DeriveOutput {
        disclose_body: quote! {
            match self {
                #(#disclose_arms),*
            }
        },
        conceal_body: quote! {
            match self {
                #(#conceal_arms),*
            }
        },
        used_generics,
    })
}
