//! Serde support.
//!
//! `SecretString` is a transparent string-or-null leaf: no wrapper object is
//! introduced, so any serde format sees a plain optional string.
//!
//! Encoding rules, in order:
//! 1. absent payload: `null` (or an omitted/empty node, per the format)
//! 2. empty payload: `""`, whatever the mode or marshal flag
//! 3. marshallable instance or configuration: the raw value
//! 4. otherwise: the text `Display` would produce
//!
//! Decoding accepts `null` (absent payload) or any string, including `""`.
//! Other input types are rejected by the format's deserializer.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::{
    config::{marshalling_suppressed, redacted},
    RedactionConfig, SecretString,
};

impl Serialize for SecretString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let config = RedactionConfig::current();
        match self.marshal_text(&config, marshalling_suppressed()) {
            Some(text) => serializer.serialize_str(&text),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<String>::deserialize(deserializer).map(|raw| Self::new(raw, false))
    }
}

/// Serializes `value` to JSON with every secret redacted.
///
/// Marshallable secrets and a marshallable configuration are both ignored;
/// the active mode still decides between placeholder and mask. Use this for
/// logs and other insecure sinks.
pub fn masked_serialize<T>(value: &T) -> Result<Value, serde_json::Error>
where
    T: ?Sized + Serialize,
{
    redacted(|| serde_json::to_value(value))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::masked_serialize;
    use crate::{with_config, RedactionConfig, RedactionMode, SecretString};

    #[test]
    fn encodes_placeholder_by_default() {
        let json = serde_json::to_string(&SecretString::from("secret123")).unwrap();
        assert_eq!(json, r#""[FILTERED]""#);
    }

    #[test]
    fn encodes_null_and_empty_regardless_of_flags() {
        for config in [
            RedactionConfig::new(),
            RedactionConfig::new().with_mode(RedactionMode::Masked),
            RedactionConfig::new().with_marshallable(true),
        ] {
            with_config(config, || {
                for marshallable in [false, true] {
                    let absent = SecretString::new(None, marshallable);
                    let empty = SecretString::new(Some(String::new()), marshallable);
                    assert_eq!(serde_json::to_string(&absent).unwrap(), "null");
                    assert_eq!(serde_json::to_string(&empty).unwrap(), r#""""#);
                }
            });
        }
    }

    #[test]
    fn decodes_null_string_and_empty() {
        let secret: SecretString = serde_json::from_str("null").unwrap();
        assert!(secret.is_absent());

        let secret: SecretString = serde_json::from_str(r#""""#).unwrap();
        assert_eq!(secret.raw_value(), Some(""));

        let secret: SecretString = serde_json::from_str(r#""raw""#).unwrap();
        assert_eq!(secret.raw_value(), Some("raw"));
        assert!(!secret.is_marshallable());
    }

    #[test]
    fn rejects_non_string_input() {
        assert!(serde_json::from_str::<SecretString>("42").is_err());
        assert!(serde_json::from_str::<SecretString>("true").is_err());
        assert!(serde_json::from_str::<SecretString>(r#"{"raw":"x"}"#).is_err());
    }

    #[test]
    fn masked_serialize_ignores_marshallable() {
        let value = vec![
            SecretString::marshallable("raw_one"),
            SecretString::from("raw_two"),
        ];
        with_config(RedactionConfig::new().with_marshallable(true), || {
            assert_eq!(
                masked_serialize(&value).unwrap(),
                json!(["[FILTERED]", "[FILTERED]"])
            );
            assert_eq!(
                serde_json::to_value(&value).unwrap(),
                json!(["raw_one", "raw_two"])
            );
        });
    }
}
