//! Configuration errors.
//!
//! Decode failures are not represented here: they surface as the error type of
//! the serde format in use (`serde_json::Error`, `quick_xml::DeError`, ...).

/// Errors raised while turning external input into a [`crate::RedactionConfig`].
///
/// None of these carry secret data. The offending values are configuration
/// strings supplied by the embedding application.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A redaction mode name that is not one of the known modes.
    #[error("unknown redaction mode `{0}`; expected `fixed_placeholder`, `masked`, or `disabled`")]
    UnknownMode(String),
    /// A numeric redaction mode outside the known range.
    #[error("unknown redaction mode code {0}; expected 0, 1, or 2")]
    UnknownModeCode(u8),
    /// An environment variable holding a value that cannot be parsed.
    #[error("invalid value for `{key}`: `{value}`")]
    InvalidEnv {
        /// The variable name.
        key: &'static str,
        /// The raw value that was rejected.
        value: String,
    },
}
