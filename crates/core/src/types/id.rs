//! Newtype ids for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe id wrappers that prevent
//! accidentally mixing ids from different entity types. Ids are opaque
//! strings in the `<prefix>-<unix-millis>-<random-suffix>` format.

use rand::Rng;

/// Characters allowed in the random id suffix.
const SUFFIX_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Length of the random id suffix.
const SUFFIX_LENGTH: usize = 6;

/// Build a raw id string in the `<prefix>-<unix-millis>-<suffix>` format.
///
/// This is the shared generator behind the typed `generate()` constructors
/// created by [`define_id!`]; prefer those over calling this directly.
#[must_use]
pub fn raw_id(prefix: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let mut rng = rand::rng();
    let suffix: String = (0..SUFFIX_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..SUFFIX_CHARSET.len());
            char::from(*SUFFIX_CHARSET.get(idx).unwrap_or(&b'0'))
        })
        .collect();
    format!("{prefix}-{millis}-{suffix}")
}

/// Macro to define a type-safe id wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - `new()` for wrapping existing values and `generate()` for fresh ids
///   (timestamp plus random suffix, prefixed per type)
/// - `From<String>`, `Into<String>`, and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use planwise_core::define_id;
/// define_id!(UserId, "user");
/// define_id!(MessageId, "msg");
///
/// let user_id = UserId::generate();
/// let message_id = MessageId::new("msg-0-abc123");
///
/// // These are different types, so this won't compile:
/// // let _: UserId = message_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an existing id value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Generate a fresh unique id (timestamp plus random suffix).
            #[must_use]
            pub fn generate() -> Self {
                Self($crate::types::id::raw_id($prefix))
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the id and return its inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::convert::From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl ::core::convert::From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl ::core::convert::AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity ids
define_id!(UserId, "user");
define_id!(MessageId, "msg");

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_generated_id_format() {
        let id = UserId::generate();
        let mut parts = id.as_str().splitn(3, '-');

        assert_eq!(parts.next(), Some("user"));

        let millis = parts.next().unwrap();
        assert!(millis.parse::<i64>().is_ok(), "millis part: {millis}");

        let suffix = parts.next().unwrap();
        assert_eq!(suffix.len(), SUFFIX_LENGTH);
        assert!(suffix.bytes().all(|b| SUFFIX_CHARSET.contains(&b)));
    }

    #[test]
    fn test_message_id_prefix() {
        let id = MessageId::generate();
        assert!(id.as_str().starts_with("msg-"));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: HashSet<String> = (0..100)
            .map(|_| MessageId::generate().into_inner())
            .collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_ids_are_distinct_types() {
        // UserId and MessageId wrap the same representation but never unify
        let user_id = UserId::new("user-0-aaaaaa");
        let message_id = MessageId::new("msg-0-aaaaaa");
        assert_ne!(user_id.as_str(), message_id.as_str());
    }

    #[test]
    fn test_serde_transparent() {
        let id = UserId::new("user-1724198400000-x7q9kz");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"user-1724198400000-x7q9kz\"");

        let parsed: UserId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_display_and_conversions() {
        let id = UserId::new("user-0-abcdef");
        assert_eq!(format!("{id}"), "user-0-abcdef");

        let s: String = id.clone().into();
        assert_eq!(s, "user-0-abcdef");
        assert_eq!(UserId::from(s), id);
    }
}
