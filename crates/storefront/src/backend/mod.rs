//! Client for the FreshBite catalog/checkout REST backend.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP via `reqwest`; the backend is an opaque collaborator
//! - Response bodies are read as text first and decoded with `serde_json` so
//!   failures can be logged with a body excerpt
//! - No caching, no retries and no timeouts here; the catalog loader owns the
//!   single seed-and-retry fallback
//!
//! # Endpoints
//!
//! ```text
//! GET  {base}/api/products?limit=N  - catalog (array of products)
//! POST {base}/api/seed              - populate the catalog (body ignored)
//! POST {base}/api/checkout          - place an order
//! ```

mod client;
pub mod types;

pub use client::BackendClient;
pub use types::*;

use reqwest::StatusCode;
use thiserror::Error;

/// Maximum number of body characters kept in errors and logs.
const BODY_EXCERPT_CHARS: usize = 200;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The request could not be sent or the response body could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        status: StatusCode,
        /// Leading excerpt of the response body.
        body: String,
    },

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl BackendError {
    /// The HTTP status, when the backend answered with one.
    #[must_use]
    pub const fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Http(_) | Self::Parse(_) => None,
        }
    }
}

/// Truncate a response body for error messages and logs.
fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = BackendError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            body: "down for maintenance".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 503 Service Unavailable: down for maintenance"
        );
        assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
    }

    #[test]
    fn test_parse_error_has_no_status() {
        let err = BackendError::from(serde_json::from_str::<u8>("nope").unwrap_err());
        assert!(err.to_string().starts_with("JSON parse error:"));
        assert_eq!(err.status(), None);
    }

    #[test]
    fn test_excerpt_truncates_on_char_boundary() {
        let body = "é".repeat(500);
        assert_eq!(excerpt(&body).chars().count(), BODY_EXCERPT_CHARS);
        assert_eq!(excerpt("short"), "short");
    }
}
