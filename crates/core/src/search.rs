//! Client-side catalog filter.

use crate::types::Product;

/// Products whose title or category contains `query`, ignoring case.
///
/// The result is a subsequence of `catalog` in its original order. An empty
/// query returns the whole catalog. The query is matched as typed, without
/// trimming.
#[must_use]
pub fn filter_products(catalog: &[Product], query: &str) -> Vec<Product> {
    if query.is_empty() {
        return catalog.to_vec();
    }
    let needle = query.to_lowercase();
    catalog
        .iter()
        .filter(|product| product.matches(&needle))
        .cloned()
        .collect()
}
