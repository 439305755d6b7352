//! Page controller: the single owner of storefront state.
//!
//! All state lives in one [`PageState`] that changes only through four
//! operations:
//!
//! - [`StorefrontController::load`] - fetch the catalog (seed-and-retry once)
//! - [`StorefrontController::search`] - recompute the filtered view
//! - [`StorefrontController::add_to_cart`] - add one unit of a product
//! - [`StorefrontController::checkout`] - submit the cart
//!
//! Every change publishes a fresh [`Snapshot`] on a `watch` channel, which is
//! what the rendering layer reads. The state lock is never held across a
//! network call. Loads are serialized with other loads and checkouts with
//! other checkouts, so two calls of the same kind are never in flight at once.

use std::sync::{Arc, Mutex, PoisonError};

use freshbite_core::{
    Cart, CartError, CartLine, Customer, Notice, PagePhase, Price, Product, ProductKey,
    filter_products,
};
use serde::Serialize;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::backend::{BackendClient, CheckoutRequest};
use crate::catalog::{LoadOutcome, load_catalog};
use crate::checkout::{self, CheckoutOutcome};
use crate::config::BackendConfig;

/// Errors from controller operations.
///
/// Backend failures are not errors here; they become the page [`Notice`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    /// The product key does not name a product in the loaded catalog.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductKey),

    /// The cart refused the unit.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Read-only view of the page state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub phase: PagePhase,
    /// Current search query.
    pub query: String,
    /// Number of products in the full catalog.
    pub catalog_size: usize,
    /// Catalog filtered by `query`, in catalog order.
    pub products: Vec<Product>,
    pub cart: Vec<CartLine>,
    pub cart_total: Price,
    /// Number of distinct cart lines.
    pub cart_count: usize,
    pub notice: Option<Notice>,
    /// `notice` rendered as text.
    pub message: Option<String>,
}

#[derive(Debug, Default)]
struct PageState {
    phase: PagePhase,
    catalog: Vec<Product>,
    filtered: Vec<Product>,
    query: String,
    cart: Cart,
    notice: Option<Notice>,
}

impl PageState {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            query: self.query.clone(),
            catalog_size: self.catalog.len(),
            products: self.filtered.clone(),
            cart: self.cart.lines().to_vec(),
            cart_total: self.cart.total(),
            cart_count: self.cart.line_count(),
            notice: self.notice.clone(),
            message: self.notice.as_ref().map(ToString::to_string),
        }
    }
}

/// Owner of the page state.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct StorefrontController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    client: BackendClient,
    catalog_limit: u32,
    state: Mutex<PageState>,
    updates: watch::Sender<Snapshot>,
    load_gate: tokio::sync::Mutex<()>,
    checkout_gate: tokio::sync::Mutex<()>,
}

impl StorefrontController {
    /// Create a controller for the backend in `config`, in the `Loading`
    /// phase with an empty cart.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        let state = PageState::default();
        let (updates, _) = watch::channel(state.snapshot());

        Self {
            inner: Arc::new(ControllerInner {
                client: BackendClient::new(config),
                catalog_limit: config.catalog_limit,
                state: Mutex::new(state),
                updates,
                load_gate: tokio::sync::Mutex::new(()),
                checkout_gate: tokio::sync::Mutex::new(()),
            }),
        }
    }

    /// The latest snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.inner.updates.borrow().clone()
    }

    /// Subscribe to snapshots published after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.inner.updates.subscribe()
    }

    /// Apply `change` to the state and publish the resulting snapshot.
    fn update<R>(&self, change: impl FnOnce(&mut PageState) -> R) -> R {
        let mut state = self
            .inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let result = change(&mut state);
        self.inner.updates.send_replace(state.snapshot());
        result
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Load the catalog.
    ///
    /// A successful load replaces the catalog and recomputes the filtered
    /// view for the current query. A failed load keeps whatever catalog the
    /// page already had and sets the matching notice.
    #[instrument(skip(self))]
    pub async fn load(&self) -> LoadOutcome {
        let _gate = self.inner.load_gate.lock().await;
        self.update(|state| state.phase = PagePhase::Loading);

        let outcome = load_catalog(&self.inner.client, self.inner.catalog_limit).await;

        self.update(|state| {
            state.phase = outcome.phase();
            if let Some(products) = outcome.products() {
                state.catalog = products.to_vec();
                state.filtered = filter_products(&state.catalog, &state.query);
            }
            if let Some(notice) = outcome.notice() {
                state.notice = Some(notice);
            }
        });

        outcome
    }

    /// Filter the catalog by `query`, returning the number of matches.
    #[instrument(skip(self))]
    pub fn search(&self, query: &str) -> usize {
        self.update(|state| {
            state.query = query.to_string();
            state.filtered = filter_products(&state.catalog, query);
            debug!(matches = state.filtered.len(), "Catalog filtered");
            state.filtered.len()
        })
    }

    /// Add one unit of the catalog product identified by `key`.
    ///
    /// Returns the line's resulting quantity.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::UnknownProduct`] if no catalog product has
    /// that key, and [`ControllerError::Cart`] if the cart total would
    /// overflow. The cart is unchanged on error.
    #[instrument(skip(self, key), fields(key = %key))]
    pub fn add_to_cart(&self, key: &ProductKey) -> Result<u32, ControllerError> {
        self.update(|state| {
            let product = state
                .catalog
                .iter()
                .find(|product| &product.key() == key)
                .ok_or_else(|| ControllerError::UnknownProduct(key.clone()))?;
            let quantity = state.cart.add(product)?;
            debug!(quantity, lines = state.cart.line_count(), "Added to cart");
            Ok(quantity)
        })
    }

    /// Submit the cart as the guest customer.
    ///
    /// Returns `None` without any network call when the cart is empty. On a
    /// placed order the whole cart is emptied, including lines added while
    /// the request was in flight, which were not part of the submitted
    /// order. Any other outcome leaves the cart as is.
    #[instrument(skip(self))]
    pub async fn checkout(&self) -> Option<CheckoutOutcome> {
        let _gate = self.inner.checkout_gate.lock().await;

        let request = self.update(|state| {
            if state.cart.is_empty() {
                state.notice = Some(Notice::EmptyCart);
                return None;
            }
            state.notice = Some(Notice::Processing);
            Some(CheckoutRequest::new(Customer::guest(), state.cart.lines()))
        });
        let Some(request) = request else {
            info!("Checkout skipped, cart is empty");
            return None;
        };

        let outcome = checkout::submit(&self.inner.client, &request).await;

        self.update(|state| {
            if outcome.is_placed() {
                let cleared = state.cart.take();
                debug!(lines = cleared.len(), "Cart cleared");
            }
            state.notice = Some(outcome.notice());
        });

        Some(outcome)
    }
}
