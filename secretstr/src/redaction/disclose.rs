//! Per-field disclosure: choosing which secrets serialize their raw value.
//!
//! Decoded secrets start non-marshallable, so re-encoding a decoded structure
//! redacts everything. [`Disclose`] flips the marshal policy of selected
//! secrets in one pass, leaving sibling secrets redacted.
//!
//! ## Field Handling
//!
//! `#[derive(Disclose)]` generates code based on field annotations:
//!
//! | Annotation | `disclose()` | `conceal()` |
//! |------------|--------------|-------------|
//! | None | unchanged | unchanged |
//! | `#[secret]` | `Disclose::disclose` | `Disclose::conceal` |
//! | `#[secret(redact)]` | `Disclose::conceal` | `Disclose::conceal` |
//!
//! Nested types that derive `Disclose` are walked with `#[secret]`; their own
//! annotations decide what they reveal.

use std::{
    collections::{BTreeMap, HashMap},
    hash::{BuildHasher, Hash},
};

use super::SecretString;

/// A value whose secrets can be switched between raw and redacted
/// serialization.
///
/// ```rust
/// use secretstr::{Disclose, SecretString};
///
/// #[derive(Disclose)]
/// struct Credentials {
///     user: String,
///     #[secret]
///     api_key: SecretString,
///     #[secret(redact)]
///     password: SecretString,
/// }
///
/// let creds = Credentials {
///     user: "alice".into(),
///     api_key: "key_123".into(),
///     password: "hunter2".into(),
/// }
/// .disclose();
///
/// assert!(creds.api_key.is_marshallable());
/// assert!(!creds.password.is_marshallable());
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Disclose`",
    label = "this type cannot be walked for secrets",
    note = "use `#[derive(Disclose)]` on the type definition",
    note = "or remove `#[secret]` to leave the field untouched"
)]
pub trait Disclose: Sized {
    /// Applies the type's disclosure annotations.
    #[must_use]
    fn disclose(self) -> Self;

    /// Makes every reachable secret serialize redacted.
    #[must_use]
    fn conceal(self) -> Self;
}

impl Disclose for SecretString {
    fn disclose(self) -> Self {
        self.with_marshallable(true)
    }

    fn conceal(self) -> Self {
        self.with_marshallable(false)
    }
}

impl<T> Disclose for Option<T>
where
    T: Disclose,
{
    fn disclose(self) -> Self {
        self.map(Disclose::disclose)
    }

    fn conceal(self) -> Self {
        self.map(Disclose::conceal)
    }
}

impl<T, E> Disclose for Result<T, E>
where
    T: Disclose,
    E: Disclose,
{
    fn disclose(self) -> Self {
        self.map(Disclose::disclose).map_err(Disclose::disclose)
    }

    fn conceal(self) -> Self {
        self.map(Disclose::conceal).map_err(Disclose::conceal)
    }
}

impl<T> Disclose for Vec<T>
where
    T: Disclose,
{
    fn disclose(self) -> Self {
        self.into_iter().map(Disclose::disclose).collect()
    }

    fn conceal(self) -> Self {
        self.into_iter().map(Disclose::conceal).collect()
    }
}

impl<T> Disclose for Box<T>
where
    T: Disclose,
{
    fn disclose(self) -> Self {
        Box::new((*self).disclose())
    }

    fn conceal(self) -> Self {
        Box::new((*self).conceal())
    }
}

// Keys are never touched; only values are walked.
impl<K, V, S> Disclose for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Disclose,
    S: BuildHasher + Clone,
{
    fn disclose(self) -> Self {
        let mut result = HashMap::with_hasher(self.hasher().clone());
        result.extend(self.into_iter().map(|(k, v)| (k, v.disclose())));
        result
    }

    fn conceal(self) -> Self {
        let mut result = HashMap::with_hasher(self.hasher().clone());
        result.extend(self.into_iter().map(|(k, v)| (k, v.conceal())));
        result
    }
}

impl<K, V> Disclose for BTreeMap<K, V>
where
    K: Ord,
    V: Disclose,
{
    fn disclose(self) -> Self {
        self.into_iter().map(|(k, v)| (k, v.disclose())).collect()
    }

    fn conceal(self) -> Self {
        self.into_iter().map(|(k, v)| (k, v.conceal())).collect()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use crate::{Disclose, SecretString};

    #[test]
    fn secret_toggles_flag_and_keeps_payload() {
        let secret = SecretString::from("value").disclose();
        assert!(secret.is_marshallable());
        assert_eq!(secret.raw_value(), Some("value"));

        let secret = secret.conceal();
        assert!(!secret.is_marshallable());
        assert_eq!(secret.raw_value(), Some("value"));
    }

    #[test]
    fn option_and_vec_walk_inner_secrets() {
        let values = vec![Some(SecretString::from("a")), None].disclose();
        assert!(values[0].as_ref().unwrap().is_marshallable());
        assert!(values[1].is_none());
    }

    #[test]
    fn result_walks_both_sides() {
        let ok: Result<SecretString, SecretString> = Ok("ok".into());
        assert!(ok.disclose().unwrap().is_marshallable());

        let err: Result<SecretString, SecretString> = Err(SecretString::marshallable("err"));
        assert!(!err.conceal().unwrap_err().is_marshallable());
    }

    #[test]
    fn maps_walk_values() {
        let mut map: HashMap<String, SecretString> = HashMap::new();
        map.insert("key".to_string(), "secret".into());
        let map = map.disclose();
        assert!(map["key"].is_marshallable());

        let mut tree: BTreeMap<String, SecretString> = BTreeMap::new();
        tree.insert("key".to_string(), SecretString::marshallable("secret"));
        let tree = tree.conceal();
        assert!(!tree["key"].is_marshallable());
    }

    #[test]
    fn boxed_secret_is_walked() {
        let boxed = Box::new(SecretString::from("boxed")).disclose();
        assert!(boxed.is_marshallable());
    }

    #[derive(Disclose)]
    struct Inner {
        #[secret]
        token: SecretString,
        #[secret(redact)]
        pin: SecretString,
    }

    #[derive(Disclose)]
    struct Outer {
        label: String,
        untouched: SecretString,
        #[secret]
        inner: Inner,
        #[secret]
        extra: Option<Vec<SecretString>>,
    }

    #[test]
    fn derived_disclose_is_selective() {
        let outer = Outer {
            label: "public".into(),
            untouched: "left_alone".into(),
            inner: Inner {
                token: "tok".into(),
                pin: SecretString::marshallable("1234"),
            },
            extra: Some(vec!["x".into()]),
        }
        .disclose();

        assert_eq!(outer.label, "public");
        assert!(!outer.untouched.is_marshallable());
        assert!(outer.inner.token.is_marshallable());
        assert!(!outer.inner.pin.is_marshallable());
        assert!(outer.extra.unwrap()[0].is_marshallable());
    }

    #[test]
    fn derived_conceal_hides_annotated_fields() {
        let outer = Outer {
            label: "public".into(),
            untouched: SecretString::marshallable("left_alone"),
            inner: Inner {
                token: SecretString::marshallable("tok"),
                pin: SecretString::marshallable("1234"),
            },
            extra: None,
        }
        .conceal();

        assert!(outer.untouched.is_marshallable());
        assert!(!outer.inner.token.is_marshallable());
        assert!(!outer.inner.pin.is_marshallable());
    }
}
