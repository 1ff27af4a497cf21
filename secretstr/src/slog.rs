//! Adapters for emitting secrets through `slog`.
//!
//! - `SecretString` implements `slog::Value` and logs its redacted display
//!   text, never the raw payload.
//! - [`IntoRedactedJson`] turns any serializable value into a `slog::Value`
//!   that logs structured JSON with every secret redacted, including secrets
//!   that would otherwise marshal their raw value.
//!
//! Logging stays infallible: serialization failures become a placeholder
//! string rather than an error.

use serde::Serialize;
use serde_json::Value as JsonValue;
use slog::{Key, Record, Result as SlogResult, Serializer, Value as SlogValue};

use crate::{masked_serialize, SecretString};

impl SlogValue for SecretString {
    fn serialize(
        &self,
        _record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        serializer.emit_str(key, &self.display())
    }
}

/// A `slog::Value` that emits an owned, redacted payload as structured JSON.
pub struct RedactedJson {
    value: JsonValue,
}

impl RedactedJson {
    fn new(value: JsonValue) -> Self {
        Self { value }
    }

    /// The redacted JSON that will be logged.
    #[must_use]
    pub fn as_json(&self) -> &JsonValue {
        &self.value
    }
}

impl SlogValue for RedactedJson {
    fn serialize(
        &self,
        record: &Record<'_>,
        key: Key,
        serializer: &mut dyn Serializer,
    ) -> SlogResult {
        let nested = slog::Serde(self.value.clone());
        SlogValue::serialize(&nested, record, key, serializer)
    }
}

/// Converts values into a `slog::Value` that logs their redacted form as JSON.
///
/// ## Example
/// ```ignore
/// use secretstr::slog::IntoRedactedJson;
///
/// info!(logger, "login"; "form" => form.to_redacted_json());
/// ```
pub trait IntoRedactedJson: Serialize {
    /// Serializes `self` with every secret redacted.
    ///
    /// If serialization fails, the returned value holds the JSON string
    /// `"Failed to serialize redacted value"`.
    fn to_redacted_json(&self) -> RedactedJson {
        let json_value = masked_serialize(self).unwrap_or_else(|_| {
            JsonValue::String("Failed to serialize redacted value".to_string())
        });
        RedactedJson::new(json_value)
    }
}

impl<T> IntoRedactedJson for T where T: ?Sized + Serialize {}
