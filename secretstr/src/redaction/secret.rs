//! The secret string wrapper.
//!
//! Every textual path out of a [`SecretString`] (display, debug, serde) goes
//! through the active [`RedactionConfig`]. The only way to the raw payload is
//! [`SecretString::raw_value`] or [`SecretString::into_raw`].

use std::{borrow::Cow, convert::Infallible, fmt, hash, str::FromStr};

use crate::RedactionConfig;

/// A "redacting formatter": renders a value for humans without exposing it.
///
/// Implementors produce the same text for display and debug output unless
/// they have a reason to differ, so that logging a containing structure through
/// either path yields the same redacted text.
pub trait RedactingFormatter {
    /// Text emitted by generic display under `config`.
    fn redacted_display<'a>(&'a self, config: &'a RedactionConfig) -> Cow<'a, str>;

    /// Text emitted by debug formatting under `config`.
    fn redacted_debug<'a>(&'a self, config: &'a RedactionConfig) -> Cow<'a, str> {
        self.redacted_display(config)
    }
}

/// An optional string that refuses to show itself.
///
/// - `Display` and `Debug` render the placeholder, a mask, or (only in
///   [`crate::RedactionMode::Disabled`]) the raw value.
/// - With the `serde` feature, serialization emits the raw value only when
///   the instance or the active configuration is marshallable.
///
/// An absent payload is distinct from an empty one: absent serializes to
/// `null`, empty serializes to `""`.
///
/// ```rust
/// use secretstr::SecretString;
///
/// let password = SecretString::from("hunter2");
/// assert_eq!(format!("{password}"), "[FILTERED]");
/// assert_eq!(format!("{password:?}"), "[FILTERED]");
/// assert_eq!(password.raw_value(), Some("hunter2"));
/// ```
#[derive(Clone, Default)]
pub struct SecretString {
    raw: Option<String>,
    marshallable: bool,
}

impl SecretString {
    /// Wraps `raw`. No validation is performed.
    #[must_use]
    pub fn new(raw: Option<String>, marshallable: bool) -> Self {
        Self { raw, marshallable }
    }

    /// A secret with no payload.
    #[must_use]
    pub fn absent() -> Self {
        Self::default()
    }

    /// A secret whose raw value is emitted by serialization.
    #[must_use]
    pub fn marshallable<S>(raw: S) -> Self
    where
        S: Into<String>,
    {
        Self::new(Some(raw.into()), true)
    }

    /// The unredacted payload.
    ///
    /// Do not route the result into logging or generic formatting.
    #[must_use]
    pub fn raw_value(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// Consumes the wrapper and returns the unredacted payload.
    #[must_use]
    pub fn into_raw(self) -> Option<String> {
        self.raw
    }

    /// True when the payload is absent or has zero length.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.as_deref().is_none_or(str::is_empty)
    }

    /// True when there is no payload at all.
    #[must_use]
    pub fn is_absent(&self) -> bool {
        self.raw.is_none()
    }

    /// Whether serialization of this instance emits the raw value.
    #[must_use]
    pub fn is_marshallable(&self) -> bool {
        self.marshallable
    }

    /// Returns the same payload under a different marshal policy.
    #[must_use]
    pub fn with_marshallable(mut self, marshallable: bool) -> Self {
        self.marshallable = marshallable;
        self
    }

    /// Redacted text under the configuration in effect on this thread.
    #[must_use]
    pub fn display(&self) -> String {
        self.display_with(&RedactionConfig::current())
    }

    /// Redacted text under an explicit configuration.
    #[must_use]
    pub fn display_with(&self, config: &RedactionConfig) -> String {
        self.redacted_display(config).into_owned()
    }

    /// Debug text under the configuration in effect on this thread.
    ///
    /// Identical to [`SecretString::display`]; the struct's fields are never
    /// printed.
    #[must_use]
    pub fn debug_display(&self) -> String {
        let config = RedactionConfig::current();
        self.redacted_debug(&config).into_owned()
    }

    /// Text written by serialization, following these rules in order:
    ///
    /// 1. absent payload: `None`
    /// 2. empty payload: `""`
    /// 3. marshallable (instance or config) and not suppressed: the raw value
    /// 4. otherwise: the redacted display text
    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    pub(crate) fn marshal_text<'a>(
        &'a self,
        config: &'a RedactionConfig,
        suppressed: bool,
    ) -> Option<Cow<'a, str>> {
        let raw = self.raw.as_deref()?;
        if raw.is_empty() {
            return Some(Cow::Borrowed(""));
        }
        if !suppressed && (self.marshallable || config.marshallable) {
            return Some(Cow::Borrowed(raw));
        }
        Some(self.redacted_display(config))
    }
}

impl RedactingFormatter for SecretString {
    fn redacted_display<'a>(&'a self, config: &'a RedactionConfig) -> Cow<'a, str> {
        config.render(self.raw.as_deref())
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = RedactionConfig::current();
        f.pad(&self.redacted_display(&config))
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = RedactionConfig::current();
        f.pad(&self.redacted_debug(&config))
    }
}

// Equality and hashing look at the payload only; the marshal flag is policy.
impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for SecretString {}

impl hash::Hash for SecretString {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl From<String> for SecretString {
    fn from(raw: String) -> Self {
        Self::new(Some(raw), false)
    }
}

impl From<&str> for SecretString {
    fn from(raw: &str) -> Self {
        Self::new(Some(raw.to_string()), false)
    }
}

impl From<Option<String>> for SecretString {
    fn from(raw: Option<String>) -> Self {
        Self::new(raw, false)
    }
}

impl FromStr for SecretString {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

#[cfg(test)]
mod tests {
    use super::{RedactingFormatter, SecretString};
    use crate::{with_config, RedactionConfig, RedactionMode};

    fn mode(mode: RedactionMode) -> RedactionConfig {
        RedactionConfig::new().with_mode(mode)
    }

    #[test]
    fn display_follows_each_mode() {
        let secret = SecretString::from("raw_string");

        assert_eq!(
            secret.display_with(&mode(RedactionMode::FixedPlaceholder)),
            "[FILTERED]"
        );
        assert_eq!(
            secret.display_with(&mode(RedactionMode::Masked)),
            "**********"
        );
        assert_eq!(
            secret.display_with(&mode(RedactionMode::Disabled)),
            "raw_string"
        );
    }

    #[test]
    fn format_specifiers_never_reveal() {
        let secret = SecretString::from("raw_string");
        for rendered in [
            format!("{secret}"),
            format!("{secret:?}"),
            format!("{secret:#?}"),
            secret.display(),
            secret.debug_display(),
        ] {
            assert_eq!(rendered, "[FILTERED]");
        }
    }

    #[test]
    fn format_uses_scoped_config() {
        let secret = SecretString::from("raw_string");
        with_config(mode(RedactionMode::Masked), || {
            assert_eq!(format!("{secret}"), "**********");
            assert_eq!(format!("{secret:?}"), "**********");
        });
    }

    #[test]
    fn format_respects_padding() {
        let secret = SecretString::from("abc");
        with_config(mode(RedactionMode::Masked), || {
            assert_eq!(format!("[{secret:>5}]"), "[  ***]");
        });
    }

    #[test]
    fn debug_of_containing_struct_is_redacted() {
        #[derive(Debug)]
        #[allow(dead_code)]
        struct LoginForm {
            id: SecretString,
            password: SecretString,
        }

        let form = LoginForm {
            id: "raw_id".into(),
            password: "raw_password".into(),
        };
        let rendered = format!("{form:?}");
        assert_eq!(
            rendered,
            "LoginForm { id: [FILTERED], password: [FILTERED] }"
        );
        assert!(!rendered.contains("raw_"));
    }

    #[test]
    fn absent_payload_renders_per_mode() {
        let secret = SecretString::absent();
        assert_eq!(
            secret.display_with(&mode(RedactionMode::FixedPlaceholder)),
            "[FILTERED]"
        );
        assert_eq!(secret.display_with(&mode(RedactionMode::Masked)), "");
        assert_eq!(secret.display_with(&mode(RedactionMode::Disabled)), "");
        assert_eq!(secret.raw_value(), None);
    }

    #[test]
    fn custom_placeholder_and_mask_char() {
        let secret = SecretString::from("token");
        let config = RedactionConfig::new().with_placeholder("<secret>");
        assert_eq!(secret.display_with(&config), "<secret>");

        let config = mode(RedactionMode::Masked).with_mask_char('x');
        assert_eq!(secret.display_with(&config), "xxxxx");
    }

    #[test]
    fn emptiness() {
        assert!(SecretString::absent().is_empty());
        assert!(SecretString::from("").is_empty());
        assert!(!SecretString::from(" ").is_empty());
        assert!(SecretString::absent().is_absent());
        assert!(!SecretString::from("").is_absent());
    }

    #[test]
    fn marshal_text_precedence() {
        let config = RedactionConfig::default();

        assert_eq!(SecretString::absent().marshal_text(&config, false), None);
        assert_eq!(
            SecretString::marshallable("").marshal_text(&config, false).as_deref(),
            Some("")
        );
        assert_eq!(
            SecretString::from("").marshal_text(&config, false).as_deref(),
            Some("")
        );
        assert_eq!(
            SecretString::marshallable("secret123")
                .marshal_text(&config, false)
                .as_deref(),
            Some("secret123")
        );
        assert_eq!(
            SecretString::from("secret123")
                .marshal_text(&config, false)
                .as_deref(),
            Some("[FILTERED]")
        );
        assert_eq!(
            SecretString::from("secret123")
                .marshal_text(&config.clone().with_marshallable(true), false)
                .as_deref(),
            Some("secret123")
        );
        assert_eq!(
            SecretString::marshallable("secret123")
                .marshal_text(&config, true)
                .as_deref(),
            Some("[FILTERED]")
        );
    }

    #[test]
    fn equality_ignores_marshal_flag() {
        assert_eq!(
            SecretString::from("a"),
            SecretString::from("a").with_marshallable(true)
        );
        assert_ne!(SecretString::from(""), SecretString::absent());
    }

    #[test]
    fn redacted_debug_defaults_to_display() {
        let config = mode(RedactionMode::Masked);
        let secret = SecretString::from("four");
        assert_eq!(
            secret.redacted_debug(&config),
            secret.redacted_display(&config)
        );
    }
}
