//! Search route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;

use super::home::ProductView;
use super::is_htmx;
use crate::state::AppState;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// Product grid fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/product_grid.html")]
pub struct ProductGridTemplate {
    pub query: String,
    pub products: Vec<ProductView>,
}

/// Filter the catalog.
///
/// HTMX requests get the product grid fragment; plain form submissions are
/// redirected back to the page.
#[instrument(skip(state, headers))]
pub async fn search(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SearchQuery>,
) -> Response {
    state.controller().search(&params.q);

    if !is_htmx(&headers) {
        return Redirect::to("/").into_response();
    }

    let snapshot = state.controller().snapshot();
    ProductGridTemplate {
        query: snapshot.query,
        products: snapshot.products.iter().map(ProductView::from).collect(),
    }
    .into_response()
}
