//! Cart route handlers.
//!
//! Cart operations return HTMX fragments. The cart only grows one unit at a
//! time; there is deliberately no update or remove operation.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::HeaderMap,
    response::{AppendHeaders, IntoResponse, Redirect, Response},
};
use freshbite_core::{CartLine, ProductKey};
use serde::Deserialize;
use tracing::instrument;

use super::is_htmx;
use crate::controller::Snapshot;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub title: String,
    pub quantity: u32,
    pub line_price: String,
    pub image: String,
}

impl From<&CartLine> for CartItemView {
    fn from(line: &CartLine) -> Self {
        Self {
            title: line.title.clone(),
            quantity: line.quantity,
            line_price: line.line_total().display(),
            image: line.image.clone(),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub count: usize,
}

impl From<&Snapshot> for CartView {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            items: snapshot.cart.iter().map(CartItemView::from).collect(),
            total: snapshot.cart_total.display(),
            count: snapshot.cart_count,
        }
    }
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub product_id: String,
}

/// Cart fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart.html")]
pub struct CartTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: usize,
}

/// Add one unit of a product to the cart.
///
/// Returns the cart fragment with an HTMX trigger so the badge refreshes.
#[instrument(skip(state, headers))]
pub async fn add(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    if form.product_id.is_empty() {
        return Err(AppError::BadRequest("product_id is required".to_string()));
    }

    state
        .controller()
        .add_to_cart(&ProductKey::new(form.product_id))?;

    if !is_htmx(&headers) {
        return Ok(Redirect::to("/").into_response());
    }

    let cart = CartView::from(&state.controller().snapshot());
    Ok((
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartTemplate { cart },
    )
        .into_response())
}

/// Get cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    CartCountTemplate {
        count: state.controller().snapshot().cart_count,
    }
}

/// Removing lines is not part of the cart's contract.
#[instrument]
pub async fn remove() -> Result<Response> {
    Err(AppError::Unsupported(
        "removing or decrementing cart items is not supported".to_string(),
    ))
}
