//! Catalog product as returned by the backend.

use serde::{Deserialize, Deserializer, Serialize};

use super::id::{ProductKey, lenient_id};
use super::price::Price;

/// A product in the catalog.
///
/// Products are immutable once fetched. Their identity is [`Product::key`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    #[serde(
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    /// Document-store style identifier, used when `id` is absent.
    #[serde(
        rename = "_id",
        default,
        deserialize_with = "lenient_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub legacy_id: Option<String>,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub price: Price,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "null_as_false")]
    pub featured: bool,
}

impl Product {
    /// Resolve this product's identity: `id`, then `_id`, then `title`.
    ///
    /// Empty strings are skipped, so a blank `id` falls through to the next
    /// candidate.
    #[must_use]
    pub fn key(&self) -> ProductKey {
        let resolved = [self.id.as_deref(), self.legacy_id.as_deref()]
            .into_iter()
            .flatten()
            .find(|candidate| !candidate.is_empty())
            .unwrap_or(self.title.as_str());
        ProductKey::new(resolved)
    }

    /// Whether the lower-cased title or category contains `needle`.
    ///
    /// `needle` must already be lower-cased.
    #[must_use]
    pub fn matches(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self
                .category
                .as_deref()
                .unwrap_or_default()
                .to_lowercase()
                .contains(needle)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or_default())
}
