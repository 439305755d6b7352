//! Checkout submission.
//!
//! One POST per call and no automatic retry. A failed checkout leaves the
//! cart untouched so the shopper can try again.

use freshbite_core::{Notice, OrderId};
use tracing::{info, instrument, warn};

use crate::backend::BackendClient;

pub use crate::backend::CheckoutRequest;

/// Result of submitting a checkout request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// 2xx with `success: true`.
    Placed { order_id: Option<OrderId> },
    /// The server answered but did not accept the order.
    Declined { detail: Option<String> },
    /// Transport or decoding failure.
    Failed { reason: String },
}

impl CheckoutOutcome {
    #[must_use]
    pub const fn is_placed(&self) -> bool {
        matches!(self, Self::Placed { .. })
    }

    /// Notice describing this outcome.
    #[must_use]
    pub fn notice(&self) -> Notice {
        match self {
            Self::Placed { order_id } => Notice::OrderPlaced {
                order_id: order_id.clone(),
            },
            Self::Declined { detail } => Notice::CheckoutDeclined {
                detail: detail.clone(),
            },
            Self::Failed { reason } => Notice::CheckoutError {
                reason: reason.clone(),
            },
        }
    }
}

/// Post `request` to the checkout endpoint and interpret the reply.
#[instrument(skip(client, request), fields(items = request.items.len()))]
pub async fn submit(client: &BackendClient, request: &CheckoutRequest) -> CheckoutOutcome {
    match client.checkout(request).await {
        Ok(reply) if reply.status.is_success() && reply.body.succeeded() => {
            let order_id = reply.body.order_id();
            info!(order_id = ?order_id, "Order placed");
            CheckoutOutcome::Placed { order_id }
        }
        Ok(reply) => {
            warn!(status = %reply.status, detail = ?reply.body.detail, "Checkout declined");
            CheckoutOutcome::Declined {
                detail: reply.body.detail,
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Checkout request failed");
            CheckoutOutcome::Failed {
                reason: e.to_string(),
            }
        }
    }
}
