//! The secret type, its rendering modes, and per-field disclosure.
//!
//! - **`policy`**: how a secret is rendered (`RedactionMode`)
//! - **`secret`**: the wrapper itself (`SecretString`, `RedactingFormatter`)
//! - **`disclose`**: per-field marshal policy (`Disclose`)
//!
//! Configuration lives in `crate::config`.

mod disclose;
mod policy;
mod secret;

pub use disclose::Disclose;
pub use policy::{RedactionMode, DEFAULT_MASK_CHAR, FILTERED_PLACEHOLDER};
pub use secret::{RedactingFormatter, SecretString};
