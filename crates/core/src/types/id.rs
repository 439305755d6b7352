//! Newtype identifiers for type-safe references.
//!
//! Use the `define_id!` macro to create string-backed identifier wrappers
//! that prevent accidentally mixing identities from different entity types.
//!
//! The catalog backend is loose about identifier types (some records carry
//! numeric ids, some strings), so [`lenient_id`] accepts either and
//! normalizes to a string.

use serde::{Deserialize, Deserializer};

/// Macro to define a type-safe identifier wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `Display`, `From<String>`, `From<&str>` and `Into<String>` implementations
///
/// # Example
///
/// ```rust
/// # use freshbite_core::define_id;
/// define_id!(SkuId);
/// define_id!(BatchId);
///
/// let sku = SkuId::new("a-1");
/// let batch = BatchId::new("a-1");
///
/// // These are different types, so this won't compile:
/// // let _: SkuId = batch;
/// # let _ = (sku, batch);
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
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
            /// Create a new identifier from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the identifier and return the inner string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Resolved identity of a product (`id`, then `_id`, then `title`).
define_id!(ProductKey);
// Confirmation number returned by a successful checkout.
define_id!(OrderId);

/// Deserialize an optional identifier that may be a JSON string or number.
///
/// `null` and a missing field both yield `None`. Any other JSON type is
/// rejected.
///
/// # Errors
///
/// Returns a deserialization error for booleans, arrays, and objects.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number identifier, got {other}"
        ))),
    }
}
