//! HTTP route handlers for the storefront page.
//!
//! # Route Structure
//!
//! ```text
//! GET  /               - Page (catalog, cart, status message)
//! GET  /health         - Health check
//!
//! # Search (HTMX fragment)
//! GET  /search?q=      - Filter the catalog, returns the product grid
//!
//! # Cart (HTMX fragments)
//! POST /cart/add       - Add one unit (returns cart fragment, triggers cart-updated)
//! GET  /cart/count     - Cart count badge (fragment)
//! POST /cart/remove    - 501: the cart has no remove operation
//!
//! # Checkout
//! POST /checkout       - Submit the cart, redirect to /
//!
//! # API
//! GET  /api/state      - Current page snapshot as JSON
//! ```

pub mod api;
pub mod cart;
pub mod checkout;
pub mod home;
pub mod search;

use axum::{
    Router,
    http::{HeaderMap, HeaderValue, header},
    routing::{get, post},
};
use tower_http::{set_header::SetResponseHeaderLayer, trace::TraceLayer};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(cart::add))
        .route("/count", get(cart::count))
        .route("/remove", post(cart::remove))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Page
        .route("/", get(home::home))
        .route("/health", get(health))
        // Search fragment
        .route("/search", get(search::search))
        // Cart routes
        .nest("/cart", cart_routes())
        // Checkout
        .route("/checkout", post(checkout::checkout))
        // Snapshot API
        .route("/api/state", get(api::state))
}

/// Build the complete application router with tracing.
///
/// Every response reflects live page state, so none may be cached.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Whether the request was issued by HTMX.
fn is_htmx(headers: &HeaderMap) -> bool {
    headers.contains_key("HX-Request")
}
