//! Process-wide and scoped redaction configuration.
//!
//! The process-wide configuration is an immutable snapshot behind a read-mostly
//! lock. Readers take an `Arc` to the current snapshot; writers replace the
//! whole snapshot, so a reader never observes a half-updated configuration.
//!
//! [`with_config`] pushes a thread-local override that takes precedence over
//! the process-wide snapshot for the duration of a closure. [`redacted`]
//! suppresses marshalling on the current thread, regardless of per-instance
//! or configured marshallable flags.

use std::{
    borrow::Cow,
    cell::{Cell, RefCell},
    sync::{Arc, PoisonError, RwLock},
};

use once_cell::sync::Lazy;

use crate::{
    redaction::{RedactionMode, DEFAULT_MASK_CHAR, FILTERED_PLACEHOLDER},
    Error,
};

/// Environment variable read by [`RedactionConfig::from_env`] for the mode.
pub const MODE_ENV: &str = "SECRETSTR_MODE";
/// Environment variable read by [`RedactionConfig::from_env`] for the placeholder.
pub const PLACEHOLDER_ENV: &str = "SECRETSTR_PLACEHOLDER";
/// Environment variable read by [`RedactionConfig::from_env`] for the mask filler.
pub const MASK_CHAR_ENV: &str = "SECRETSTR_MASK_CHAR";
/// Environment variable read by [`RedactionConfig::from_env`] for the marshallable default.
pub const MARSHALLABLE_ENV: &str = "SECRETSTR_MARSHALLABLE";

static GLOBAL: Lazy<RwLock<Arc<RedactionConfig>>> =
    Lazy::new(|| RwLock::new(Arc::new(RedactionConfig::default())));

thread_local! {
    static SCOPED: RefCell<Vec<Arc<RedactionConfig>>> = const { RefCell::new(Vec::new()) };
    static SUPPRESSED: Cell<usize> = const { Cell::new(0) };
}

/// Settings that decide how every [`crate::SecretString`] is rendered.
///
/// `marshallable` is a fallback for single-policy deployments: prefer the
/// per-instance flag captured at construction, which composes when several
/// policies coexist in one process.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct RedactionConfig {
    /// If true, serialization of any secret emits the raw value.
    pub marshallable: bool,
    /// Rendering used by display and debug formatting.
    pub mode: RedactionMode,
    /// Text used when `mode` is [`RedactionMode::FixedPlaceholder`].
    pub placeholder: Cow<'static, str>,
    /// Filler used when `mode` is [`RedactionMode::Masked`].
    pub mask_char: char,
}

impl Default for RedactionConfig {
    fn default() -> Self {
        Self {
            marshallable: false,
            mode: RedactionMode::FixedPlaceholder,
            placeholder: Cow::Borrowed(FILTERED_PLACEHOLDER),
            mask_char: DEFAULT_MASK_CHAR,
        }
    }
}

impl RedactionConfig {
    /// Constructs the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a specific mode.
    #[must_use]
    pub fn with_mode(mut self, mode: RedactionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Uses a specific placeholder.
    #[must_use]
    pub fn with_placeholder<P>(mut self, placeholder: P) -> Self
    where
        P: Into<Cow<'static, str>>,
    {
        self.placeholder = placeholder.into();
        self
    }

    /// Uses a specific mask filler.
    #[must_use]
    pub fn with_mask_char(mut self, mask_char: char) -> Self {
        self.mask_char = mask_char;
        self
    }

    /// Sets the configuration-level marshallable flag.
    #[must_use]
    pub fn with_marshallable(mut self, marshallable: bool) -> Self {
        self.marshallable = marshallable;
        self
    }

    /// Renders `value` under this configuration's mode.
    #[must_use]
    pub fn render<'a>(&'a self, value: Option<&'a str>) -> Cow<'a, str> {
        self.mode.apply_to(value, &self.placeholder, self.mask_char)
    }

    /// Returns the configuration in effect on the current thread.
    ///
    /// The innermost [`with_config`] scope wins; outside any scope this is the
    /// process-wide snapshot.
    #[must_use]
    pub fn current() -> Arc<RedactionConfig> {
        SCOPED
            .with(|scoped| scoped.borrow().last().cloned())
            .unwrap_or_else(Self::global)
    }

    /// Returns the process-wide snapshot, ignoring thread-local scopes.
    #[must_use]
    pub fn global() -> Arc<RedactionConfig> {
        GLOBAL
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the process-wide snapshot and returns the previous one.
    ///
    /// Affects every subsequent formatting and serialization call on every
    /// thread not inside a [`with_config`] scope.
    pub fn install(config: RedactionConfig) -> Arc<RedactionConfig> {
        let mut global = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *global, Arc::new(config))
    }

    /// Edits a copy of the process-wide snapshot and installs it.
    pub fn update<F>(edit: F)
    where
        F: FnOnce(&mut RedactionConfig),
    {
        let mut global = GLOBAL.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = RedactionConfig::clone(&global);
        edit(&mut next);
        *global = Arc::new(next);
    }

    /// Restores the process-wide defaults.
    pub fn reset() {
        Self::install(Self::default());
    }

    /// Builds a configuration from `SECRETSTR_*` environment variables.
    ///
    /// Unset variables keep their defaults. Malformed values are errors; an
    /// unknown mode is never replaced by a default mode.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from an arbitrary key lookup using the
    /// `SECRETSTR_*` keys.
    pub fn from_lookup<F>(mut lookup: F) -> Result<Self, Error>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(mode) = lookup(MODE_ENV) {
            config.mode = mode.parse()?;
        }
        if let Some(placeholder) = lookup(PLACEHOLDER_ENV) {
            config.placeholder = Cow::Owned(placeholder);
        }
        if let Some(value) = lookup(MASK_CHAR_ENV) {
            let mut chars = value.chars();
            config.mask_char = match (chars.next(), chars.next()) {
                (Some(mask_char), None) => mask_char,
                _ => {
                    return Err(Error::InvalidEnv {
                        key: MASK_CHAR_ENV,
                        value,
                    })
                }
            };
        }
        if let Some(value) = lookup(MARSHALLABLE_ENV) {
            config.marshallable = parse_flag(&value).ok_or(Error::InvalidEnv {
                key: MARSHALLABLE_ENV,
                value,
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Runs `f` with `config` in effect on the current thread.
///
/// Scopes nest; the innermost one wins. The override is removed when `f`
/// returns or unwinds.
pub fn with_config<R, F>(config: RedactionConfig, f: F) -> R
where
    F: FnOnce() -> R,
{
    struct PopScope;

    impl Drop for PopScope {
        fn drop(&mut self) {
            SCOPED.with(|scoped| {
                scoped.borrow_mut().pop();
            });
        }
    }

    SCOPED.with(|scoped| scoped.borrow_mut().push(Arc::new(config)));
    let _scope = PopScope;
    f()
}

/// Runs `f` with marshalling suppressed on the current thread.
///
/// Inside `f`, serializing a secret emits the same text its display would,
/// even when the secret or the configuration is marshallable.
pub fn redacted<R, F>(f: F) -> R
where
    F: FnOnce() -> R,
{
    struct Unsuppress;

    impl Drop for Unsuppress {
        fn drop(&mut self) {
            SUPPRESSED.with(|depth| depth.set(depth.get().saturating_sub(1)));
        }
    }

    SUPPRESSED.with(|depth| depth.set(depth.get() + 1));
    let _guard = Unsuppress;
    f()
}

/// Whether the current thread is inside [`redacted`].
pub(crate) fn marshalling_suppressed() -> bool {
    SUPPRESSED.with(|depth| depth.get() > 0)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl FnMut(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_documented_values() {
        let config = RedactionConfig::default();
        assert!(!config.marshallable);
        assert_eq!(config.mode, RedactionMode::FixedPlaceholder);
        assert_eq!(config.placeholder, "[FILTERED]");
        assert_eq!(config.mask_char, '*');
    }

    #[test]
    fn scoped_config_wins_and_unwinds() {
        let masked = RedactionConfig::new().with_mode(RedactionMode::Masked);
        let disabled = RedactionConfig::new().with_mode(RedactionMode::Disabled);

        with_config(masked, || {
            assert_eq!(RedactionConfig::current().mode, RedactionMode::Masked);
            with_config(disabled, || {
                assert_eq!(RedactionConfig::current().mode, RedactionMode::Disabled);
            });
            assert_eq!(RedactionConfig::current().mode, RedactionMode::Masked);
        });
    }

    #[test]
    fn scope_is_removed_after_panic() {
        let result = std::panic::catch_unwind(|| {
            with_config(RedactionConfig::new().with_placeholder("<inner>"), || {
                panic!("boom");
            });
        });
        assert!(result.is_err());
        SCOPED.with(|scoped| assert!(scoped.borrow().is_empty()));
    }

    #[test]
    fn redacted_nests() {
        assert!(!marshalling_suppressed());
        redacted(|| {
            redacted(|| assert!(marshalling_suppressed()));
            assert!(marshalling_suppressed());
        });
        assert!(!marshalling_suppressed());
    }

    #[test]
    fn lookup_reads_every_key() {
        let config = RedactionConfig::from_lookup(lookup(&[
            (MODE_ENV, "masked"),
            (PLACEHOLDER_ENV, "<hidden>"),
            (MASK_CHAR_ENV, "#"),
            (MARSHALLABLE_ENV, "yes"),
        ]))
        .unwrap();

        assert_eq!(config.mode, RedactionMode::Masked);
        assert_eq!(config.placeholder, "<hidden>");
        assert_eq!(config.mask_char, '#');
        assert!(config.marshallable);
    }

    #[test]
    fn lookup_keeps_defaults_for_missing_keys() {
        let config = RedactionConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, RedactionConfig::default());
    }

    #[test]
    fn lookup_rejects_unknown_mode() {
        let err = RedactionConfig::from_lookup(lookup(&[(MODE_ENV, "10")])).unwrap_err();
        assert_eq!(err, Error::UnknownMode("10".to_string()));
    }

    #[test]
    fn lookup_rejects_bad_mask_char_and_flag() {
        let err = RedactionConfig::from_lookup(lookup(&[(MASK_CHAR_ENV, "**")])).unwrap_err();
        assert!(matches!(err, Error::InvalidEnv { key, .. } if key == MASK_CHAR_ENV));

        let err =
            RedactionConfig::from_lookup(lookup(&[(MARSHALLABLE_ENV, "maybe")])).unwrap_err();
        assert!(matches!(err, Error::InvalidEnv { key, .. } if key == MARSHALLABLE_ENV));
    }
}
