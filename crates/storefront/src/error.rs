//! Unified error handling for route handlers.
//!
//! Route handlers return `Result<T, AppError>`. Failures of the page
//! operations themselves (catalog load, checkout) never reach this type;
//! they are reported to the shopper through the status notice.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::controller::ControllerError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Controller operation failed.
    #[error("Controller error: {0}")]
    Controller(#[from] ControllerError),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The operation exists on the surface but the cart does not support it.
    #[error("Unsupported: {0}")]
    Unsupported(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self, "Request rejected");

        let status = match &self {
            Self::Controller(ControllerError::UnknownProduct(_)) => StatusCode::NOT_FOUND,
            Self::Controller(ControllerError::Cart(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unsupported(_) => StatusCode::NOT_IMPLEMENTED,
        };

        let message = match &self {
            Self::Controller(err) => err.to_string(),
            Self::BadRequest(_) | Self::Unsupported(_) => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
