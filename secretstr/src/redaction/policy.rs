//! Redaction modes for secret strings.
//!
//! Modes are pure string transformations. They do not know about marshalling,
//! serializers, or where the active configuration came from.

use std::{borrow::Cow, fmt, str::FromStr};

use crate::Error;

/// Default placeholder used by [`RedactionMode::FixedPlaceholder`].
pub const FILTERED_PLACEHOLDER: &str = "[FILTERED]";

/// Default filler used by [`RedactionMode::Masked`].
pub const DEFAULT_MASK_CHAR: char = '*';

/// How a secret is rendered by generic display and debug formatting.
///
/// The set of modes is closed: an unknown mode can only appear while parsing
/// external input (see [`FromStr`] and [`TryFrom<u8>`]), where it is rejected
/// with an [`Error`] instead of falling back to some other mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum RedactionMode {
    /// Replace the value with the configured placeholder.
    ///
    /// `"foobar"` -> `"[FILTERED]"`
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "fixed"))]
    FixedPlaceholder,
    /// Replace every character with the mask filler.
    ///
    /// `"foobar"` -> `"******"`
    #[cfg_attr(feature = "serde", serde(alias = "hide"))]
    Masked,
    /// Emit the raw value. Not meant for production builds.
    ///
    /// `"foobar"` -> `"foobar"`
    #[cfg_attr(feature = "serde", serde(alias = "disable"))]
    Disabled,
}

impl RedactionMode {
    /// Numeric code of the mode, as accepted by [`TryFrom<u8>`].
    #[must_use]
    pub fn code(self) -> u8 {
        match self {
            RedactionMode::FixedPlaceholder => 0,
            RedactionMode::Masked => 1,
            RedactionMode::Disabled => 2,
        }
    }

    /// Canonical snake_case name of the mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RedactionMode::FixedPlaceholder => "fixed_placeholder",
            RedactionMode::Masked => "masked",
            RedactionMode::Disabled => "disabled",
        }
    }

    /// Renders `value` under this mode.
    ///
    /// An absent value masks to the empty string and is emitted as the empty
    /// string when the mode is [`RedactionMode::Disabled`]. Mask length counts
    /// Unicode scalar values, not UTF-8 bytes: `"こんにちは"` (15 bytes) masks
    /// to five filler characters.
    #[must_use]
    pub fn apply_to<'a>(
        self,
        value: Option<&'a str>,
        placeholder: &'a str,
        mask_char: char,
    ) -> Cow<'a, str> {
        match self {
            RedactionMode::FixedPlaceholder => Cow::Borrowed(placeholder),
            RedactionMode::Masked => {
                let len = value.map_or(0, |value| value.chars().count());
                Cow::Owned(std::iter::repeat_n(mask_char, len).collect())
            }
            RedactionMode::Disabled => Cow::Borrowed(value.unwrap_or_default()),
        }
    }
}

impl fmt::Display for RedactionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RedactionMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed_placeholder" | "fixed" => Ok(RedactionMode::FixedPlaceholder),
            "masked" | "hide" => Ok(RedactionMode::Masked),
            "disabled" | "disable" => Ok(RedactionMode::Disabled),
            _ => Err(Error::UnknownMode(s.to_string())),
        }
    }
}

impl TryFrom<u8> for RedactionMode {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(RedactionMode::FixedPlaceholder),
            1 => Ok(RedactionMode::Masked),
            2 => Ok(RedactionMode::Disabled),
            other => Err(Error::UnknownModeCode(other)),
        }
    }
}
