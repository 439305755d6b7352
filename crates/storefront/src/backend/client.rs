//! Backend HTTP client implementation.

use std::sync::Arc;

use freshbite_core::Product;
use reqwest::StatusCode;
use tracing::{debug, instrument};

use super::types::{CheckoutReply, CheckoutRequest, CheckoutResponse};
use super::{BackendError, excerpt};
use crate::config::BackendConfig;

// =============================================================================
// BackendClient
// =============================================================================

/// Client for the catalog/checkout REST backend.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct BackendClient {
    inner: Arc<BackendClientInner>,
}

struct BackendClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Create a new backend client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(BackendClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.trim_end_matches('/').to_string(),
            }),
        }
    }

    /// Base URL all endpoints are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Read a response to completion, returning its status and body text.
    async fn read(response: reqwest::Response) -> Result<(StatusCode, String), BackendError> {
        let status = response.status();
        let text = response.text().await?;
        Ok((status, text))
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Fetch up to `limit` products.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Status`] for a non-success status,
    /// [`BackendError::Http`] if the request fails in transport, and
    /// [`BackendError::Parse`] if the body is not a product array.
    #[instrument(skip(self), fields(base_url = %self.inner.base_url))]
    pub async fn get_products(&self, limit: u32) -> Result<Vec<Product>, BackendError> {
        let url = self.endpoint(&format!("/api/products?limit={limit}"));
        let response = self.inner.client.get(&url).send().await?;
        let (status, text) = Self::read(response).await?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                body = %excerpt(&text),
                "Catalog endpoint returned non-success status"
            );
            return Err(BackendError::Status {
                status,
                body: excerpt(&text),
            });
        }

        let products: Vec<Product> = serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(
                error = %e,
                body = %excerpt(&text),
                "Failed to parse catalog response"
            );
            e
        })?;

        debug!(count = products.len(), "Fetched catalog");
        Ok(products)
    }

    /// Ask the backend to populate its catalog.
    ///
    /// The response body is not inspected.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the status is not a success.
    #[instrument(skip(self), fields(base_url = %self.inner.base_url))]
    pub async fn seed(&self) -> Result<(), BackendError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("/api/seed"))
            .send()
            .await?;
        let (status, text) = Self::read(response).await?;

        if !status.is_success() {
            return Err(BackendError::Status {
                status,
                body: excerpt(&text),
            });
        }

        debug!(status = %status, "Seed request accepted");
        Ok(())
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Submit an order.
    ///
    /// The body is decoded whatever the status, since the backend explains
    /// refusals in `detail`. Interpreting the reply is up to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::Http`] if the request fails in transport and
    /// [`BackendError::Parse`] if the body is not a checkout response.
    #[instrument(skip(self, request), fields(items = request.items.len()))]
    pub async fn checkout(&self, request: &CheckoutRequest) -> Result<CheckoutReply, BackendError> {
        let response = self
            .inner
            .client
            .post(self.endpoint("/api/checkout"))
            .json(request)
            .send()
            .await?;
        let (status, text) = Self::read(response).await?;

        let body: CheckoutResponse = serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                status = %status,
                error = %e,
                body = %excerpt(&text),
                "Failed to parse checkout response"
            );
            e
        })?;

        debug!(status = %status, success = ?body.success, "Checkout response received");
        Ok(CheckoutReply { status, body })
    }
}
