//! Catalog loading with a single seed-and-retry fallback.
//!
//! ```text
//! fetch ──ok──────────────────────────────▶ Loaded
//!   │ ──non-success status────────────────▶ Rejected
//!   └─transport/decode failure
//!        │
//!        seed (outcome ignored)
//!        │
//!        fetch ──ok───────────────────────▶ RecoveredAfterSeed
//!          └─any failure──────────────────▶ Unavailable
//! ```
//!
//! There is no backoff and no further retry.

use freshbite_core::{Notice, PagePhase, Product};
use reqwest::StatusCode;
use tracing::{info, instrument, warn};

use crate::backend::BackendClient;

/// Result of a catalog load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The first fetch succeeded.
    Loaded(Vec<Product>),
    /// The first fetch failed, the backend was seeded, and the retry succeeded.
    RecoveredAfterSeed(Vec<Product>),
    /// The backend answered the first fetch with a non-success status.
    Rejected { status: StatusCode },
    /// The retry after seeding failed too.
    Unavailable { reason: String },
}

impl LoadOutcome {
    /// The fetched products, if the load produced any.
    #[must_use]
    pub fn products(&self) -> Option<&[Product]> {
        match self {
            Self::Loaded(products) | Self::RecoveredAfterSeed(products) => Some(products),
            Self::Rejected { .. } | Self::Unavailable { .. } => None,
        }
    }

    /// Page phase after this outcome.
    ///
    /// A rejected load still leaves the page ready, with an empty catalog.
    #[must_use]
    pub const fn phase(&self) -> PagePhase {
        match self {
            Self::Unavailable { .. } => PagePhase::Unavailable,
            Self::Loaded(_) | Self::RecoveredAfterSeed(_) | Self::Rejected { .. } => {
                PagePhase::Ready
            }
        }
    }

    /// Notice to surface, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<Notice> {
        match self {
            Self::Loaded(_) | Self::RecoveredAfterSeed(_) => None,
            Self::Rejected { .. } => Some(Notice::LoadFailed),
            Self::Unavailable { .. } => Some(Notice::BackendUnavailable),
        }
    }
}

/// Load up to `limit` products from the backend.
#[instrument(skip(client), fields(base_url = %client.base_url()))]
pub async fn load_catalog(client: &BackendClient, limit: u32) -> LoadOutcome {
    let first_error = match client.get_products(limit).await {
        Ok(products) => {
            info!(count = products.len(), "Catalog loaded");
            return LoadOutcome::Loaded(products);
        }
        Err(e) => e,
    };

    if let Some(status) = first_error.status() {
        warn!(status = %status, "Catalog load rejected");
        return LoadOutcome::Rejected { status };
    }

    warn!(error = %first_error, "Catalog fetch failed, seeding backend and retrying once");

    // A failed seed does not stop the retry.
    if let Err(e) = client.seed().await {
        warn!(error = %e, "Seed request failed");
    }

    match client.get_products(limit).await {
        Ok(products) => {
            info!(count = products.len(), "Catalog loaded after seeding");
            LoadOutcome::RecoveredAfterSeed(products)
        }
        Err(e) => {
            tracing::error!(error = %e, "Catalog unavailable after seeding");
            LoadOutcome::Unavailable {
                reason: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_phases_and_notices() {
        let loaded = LoadOutcome::Loaded(Vec::new());
        assert_eq!(loaded.phase(), PagePhase::Ready);
        assert_eq!(loaded.notice(), None);

        let rejected = LoadOutcome::Rejected {
            status: StatusCode::INTERNAL_SERVER_ERROR,
        };
        assert_eq!(rejected.phase(), PagePhase::Ready);
        assert_eq!(rejected.notice(), Some(Notice::LoadFailed));
        assert!(rejected.products().is_none());

        let unavailable = LoadOutcome::Unavailable {
            reason: "connection refused".to_string(),
        };
        assert_eq!(unavailable.phase(), PagePhase::Unavailable);
        assert_eq!(unavailable.notice(), Some(Notice::BackendUnavailable));
        assert!(unavailable.products().is_none());
    }
}
