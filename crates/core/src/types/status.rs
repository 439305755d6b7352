//! Page phase and the single user-facing status notice.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::id::OrderId;

/// Lifecycle of the storefront page.
///
/// `Loading` moves to `Ready` or `Unavailable` once the catalog load
/// settles. There is no terminal phase; the page stays interactive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PagePhase {
    #[default]
    Loading,
    Ready,
    Unavailable,
}

/// The transient status message shown to the shopper.
///
/// There is exactly one slot: each new notice replaces the previous one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notice {
    /// The catalog endpoint answered with a non-success status.
    LoadFailed,
    /// The catalog could not be fetched even after seeding.
    BackendUnavailable,
    /// Checkout was attempted with nothing in the cart.
    EmptyCart,
    /// A checkout request is in flight.
    Processing,
    /// The order was accepted.
    OrderPlaced { order_id: Option<OrderId> },
    /// The server refused the order.
    CheckoutDeclined { detail: Option<String> },
    /// The checkout request failed in transport or decoding.
    CheckoutError { reason: String },
}

impl Notice {
    /// Whether this notice reports a failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(
            self,
            Self::LoadFailed
                | Self::BackendUnavailable
                | Self::CheckoutDeclined { .. }
                | Self::CheckoutError { .. }
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LoadFailed => f.write_str("Failed to load products."),
            Self::BackendUnavailable => f.write_str("Backend unavailable."),
            Self::EmptyCart => f.write_str("Your cart is empty."),
            Self::Processing => f.write_str("Processing order..."),
            Self::OrderPlaced {
                order_id: Some(order_id),
            } => write!(f, "Order placed! Confirmation #{order_id}"),
            Self::OrderPlaced { order_id: None } => f.write_str("Order placed!"),
            Self::CheckoutDeclined {
                detail: Some(detail),
            } if !detail.is_empty() => f.write_str(detail),
            Self::CheckoutDeclined { .. } => f.write_str("Checkout failed"),
            Self::CheckoutError { reason } => write!(f, "Checkout error: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_text() {
        assert_eq!(Notice::EmptyCart.to_string(), "Your cart is empty.");
        assert_eq!(Notice::BackendUnavailable.to_string(), "Backend unavailable.");
        assert_eq!(
            Notice::OrderPlaced {
                order_id: Some(OrderId::new("A1"))
            }
            .to_string(),
            "Order placed! Confirmation #A1"
        );
        assert_eq!(
            Notice::CheckoutDeclined {
                detail: Some("Card declined".to_string())
            }
            .to_string(),
            "Card declined"
        );
        assert_eq!(
            Notice::CheckoutDeclined { detail: None }.to_string(),
            "Checkout failed"
        );
        assert_eq!(
            Notice::CheckoutError {
                reason: "connection refused".to_string()
            }
            .to_string(),
            "Checkout error: connection refused"
        );
    }

    #[test]
    fn test_is_error() {
        assert!(Notice::LoadFailed.is_error());
        assert!(!Notice::Processing.is_error());
        assert!(!Notice::OrderPlaced { order_id: None }.is_error());
    }

    #[test]
    fn test_phase_default_is_loading() {
        assert_eq!(PagePhase::default(), PagePhase::Loading);
    }
}
