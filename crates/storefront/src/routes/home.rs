//! Page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use freshbite_core::{PagePhase, Product};
use tracing::instrument;

use super::cart::CartView;
use crate::controller::Snapshot;
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub featured: bool,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.key().into_inner(),
            title: product.title.clone(),
            description: product.description.clone(),
            price: product.price.display(),
            image: product.image.clone(),
            featured: product.featured,
        }
    }
}

/// Full page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub loading: bool,
    pub unavailable: bool,
    pub query: String,
    pub message: Option<String>,
    pub message_is_error: bool,
    pub products: Vec<ProductView>,
    pub cart: CartView,
}

impl From<&Snapshot> for HomeTemplate {
    fn from(snapshot: &Snapshot) -> Self {
        Self {
            loading: snapshot.phase == PagePhase::Loading,
            unavailable: snapshot.phase == PagePhase::Unavailable,
            query: snapshot.query.clone(),
            message: snapshot.message.clone(),
            message_is_error: snapshot.notice.as_ref().is_some_and(|n| n.is_error()),
            products: snapshot.products.iter().map(ProductView::from).collect(),
            cart: CartView::from(snapshot),
        }
    }
}

/// Display the storefront page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    HomeTemplate::from(&state.controller().snapshot())
}
