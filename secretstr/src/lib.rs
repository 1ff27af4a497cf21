//! A string wrapper that keeps secrets out of logs, formatting, and
//! serialized output.
//!
//! [`SecretString`] holds an optional payload (passwords, tokens, PII). Every
//! path that turns it into text consults a [`RedactionConfig`]:
//!
//! - `Display` and `Debug` emit a placeholder (`"[FILTERED]"`), a same-length
//!   mask, or, in [`RedactionMode::Disabled`], the raw value.
//! - Serde serialization emits the raw value only when the instance (or the
//!   configuration) is marshallable; otherwise it emits the display text.
//!   Absent payloads serialize to `null`, empty payloads to `""`.
//! - [`SecretString::raw_value`] is the only way to the payload.
//!
//! Configuration is a process-wide immutable snapshot
//! ([`RedactionConfig::install`]) that can be overridden per thread with
//! [`with_config`]. [`Disclose`] (and `#[derive(Disclose)]`) switch selected
//! fields of a structure to raw serialization while siblings stay redacted.
//!
//! What this crate does not do:
//! - encrypt, zero, or securely erase memory
//! - perform I/O or configure a logger
//!
//! Feature flags:
//! - `serde` (default): `Serialize`/`Deserialize` and [`masked_serialize`]
//! - `slog`: `slog::Value` for `SecretString` and [`slog::IntoRedactedJson`]

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
    clippy::use_self,
    clippy::cargo_common_metadata,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::redundant_pub_crate,
    clippy::option_if_let_else
)]
// Allow some lints while testing
#![cfg_attr(test, allow(clippy::non_ascii_literal, clippy::unwrap_used))]

pub use secretstr_derive::Disclose;

#[allow(unused_extern_crates)]
extern crate self as secretstr;

// Module declarations
mod config;
mod error;
mod redaction;
#[cfg(feature = "serde")]
mod serde;
#[cfg(feature = "slog")]
pub mod slog;

// Re-exports
pub use config::{
    redacted, with_config, RedactionConfig, MARSHALLABLE_ENV, MASK_CHAR_ENV, MODE_ENV,
    PLACEHOLDER_ENV,
};
pub use error::Error;
pub use redaction::{
    Disclose, RedactingFormatter, RedactionMode, SecretString, DEFAULT_MASK_CHAR,
    FILTERED_PLACEHOLDER,
};
#[cfg(feature = "serde")]
pub use crate::serde::masked_serialize;
