//! Checkout route handler.

use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};
use tracing::instrument;

use crate::state::AppState;

/// Submit the cart and return to the page, where the outcome is shown.
#[instrument(skip(state))]
pub async fn checkout(State(state): State<AppState>) -> impl IntoResponse {
    state.controller().checkout().await;
    Redirect::to("/")
}
