//! Parsing of `#[secret(...)]` field attributes.
//!
//! This module maps attribute syntax to disclosure decisions and produces
//! structured errors for invalid forms.

use proc_macro2::Span;
use syn::{spanned::Spanned, Attribute, Meta, Result};

/// Field disclosure strategy based on `#[secret(...)]` attributes.
///
/// ## Strategy Mapping
///
/// | Attribute | Strategy | `disclose()` | `conceal()` |
/// |-----------|----------|--------------|-------------|
/// | None | `PassThrough` | unchanged | unchanged |
/// | `#[secret]` | `Disclose` | disclose | conceal |
/// | `#[secret(redact)]` | `Redact` | conceal | conceal |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Strategy {
    /// No annotation: the field is never touched.
    ///
    /// Secrets in such fields keep whatever marshal flag they were built with.
    PassThrough,
    /// Bare `#[secret]`: revealed when the parent is disclosed.
    ///
    /// For nested types this walks into them, so their own annotations apply.
    Disclose,
    /// `#[secret(redact)]`: concealed by both directions.
    Redact,
}

fn set_strategy(target: &mut Option<Strategy>, next: Strategy, span: Span) -> Result<()> {
    if target.is_some() {
        return Err(syn::Error::new(
            span,
            "multiple #[secret] attributes specified on the same field",
        ));
    }
    *target = Some(next);
    Ok(())
}

pub(crate) fn parse_field_strategy(attrs: &[Attribute]) -> Result<Strategy> {
    let mut strategy: Option<Strategy> = None;
    for attr in attrs {
        if !attr.path().is_ident("secret") {
            continue;
        }

        match &attr.meta {
            Meta::Path(_) => {
                set_strategy(&mut strategy, Strategy::Disclose, attr.span())?;
            }
            Meta::List(list) => {
                let mut parsed = None;
                list.parse_nested_meta(|meta| {
                    if parsed.is_some() {
                        return Err(meta.error("expected a single option in #[secret(...)]"));
                    }
                    if meta.path.is_ident("redact") {
                        parsed = Some(Strategy::Redact);
                        Ok(())
                    } else {
                        Err(meta.error(format!(
                            "unknown secret option `{}`; expected `redact`",
                            meta.path
                                .get_ident()
                                .map_or_else(|| "?".to_string(), ToString::to_string)
                        )))
                    }
                })?;
                let next = parsed.ok_or_else(|| {
                    syn::Error::new(attr.span(), "empty #[secret()]; use bare #[secret]")
                })?;
                set_strategy(&mut strategy, next, attr.span())?;
            }
            Meta::NameValue(_) => {
                return Err(syn::Error::new(
                    attr.span(),
                    "name-value syntax is not supported for #[secret]",
                ));
            }
        }
    }

    Ok(strategy.unwrap_or(Strategy::PassThrough))
}
