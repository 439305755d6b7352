//! JSON snapshot endpoint.

use axum::{Json, extract::State};

use crate::controller::Snapshot;
use crate::state::AppState;

/// Current page snapshot.
pub async fn state(State(state): State<AppState>) -> Json<Snapshot> {
    Json(state.controller().snapshot())
}
