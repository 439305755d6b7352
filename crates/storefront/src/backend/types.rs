//! Wire types for the checkout endpoint.
//!
//! Products are decoded directly into [`freshbite_core::Product`].

use freshbite_core::{CartLine, Customer, OrderId, lenient_id};
use reqwest::StatusCode;
use serde::{Deserialize, Deserializer, Serialize};

/// Body of `POST /api/checkout`.
///
/// Serializes as `{customer_name, email, address, city, country, items}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutRequest {
    #[serde(flatten)]
    pub customer: Customer,
    pub items: Vec<CartLine>,
}

impl CheckoutRequest {
    /// Snapshot `items` for submission on behalf of `customer`.
    #[must_use]
    pub fn new(customer: Customer, items: &[CartLine]) -> Self {
        Self {
            customer,
            items: items.to_vec(),
        }
    }
}

/// Decoded body of a checkout response.
///
/// Every field is optional on the wire; a missing `success` counts as
/// failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CheckoutResponse {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub order_id: Option<String>,
    /// Server-provided explanation. Non-string values are kept as JSON text.
    #[serde(default, deserialize_with = "detail_text")]
    pub detail: Option<String>,
}

impl CheckoutResponse {
    /// Whether the body carries `success: true`.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.success.unwrap_or(false)
    }

    /// The returned order identifier, if any.
    #[must_use]
    pub fn order_id(&self) -> Option<OrderId> {
        self.order_id.as_deref().map(OrderId::new)
    }
}

/// A checkout response with its HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutReply {
    pub status: StatusCode,
    pub body: CheckoutResponse,
}

fn detail_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        match Option::<serde_json::Value>::deserialize(deserializer)? {
            None | Some(serde_json::Value::Null) => None,
            Some(serde_json::Value::String(s)) => Some(s),
            Some(other) => Some(other.to_string()),
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use freshbite_core::{Cart, Product};

    use super::*;

    #[test]
    fn test_request_body_shape() {
        let product: Product = serde_json::from_value(serde_json::json!({
            "id": "jam", "title": "Jam", "price": 2.5, "image": "jam.jpg"
        }))
        .unwrap();
        let mut cart = Cart::new();
        cart.add(&product).unwrap();
        cart.add(&product).unwrap();

        let request = CheckoutRequest::new(Customer::guest(), cart.lines());
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "customer_name": "Guest",
                "email": "guest@example.com",
                "address": "123 Market St",
                "city": "San Francisco",
                "country": "USA",
                "items": [{
                    "product_id": "jam",
                    "title": "Jam",
                    "price": 2.5,
                    "quantity": 2,
                    "image": "jam.jpg"
                }]
            })
        );
    }

    #[test]
    fn test_response_success() {
        let body: CheckoutResponse =
            serde_json::from_str(r#"{"success": true, "order_id": "A1"}"#).unwrap();
        assert!(body.succeeded());
        assert_eq!(body.order_id(), Some(OrderId::new("A1")));
    }

    #[test]
    fn test_response_numeric_order_id() {
        let body: CheckoutResponse =
            serde_json::from_str(r#"{"success": true, "order_id": 1042}"#).unwrap();
        assert_eq!(body.order_id.as_deref(), Some("1042"));
    }

    #[test]
    fn test_response_missing_success_is_failure() {
        let body: CheckoutResponse = serde_json::from_str(r#"{"order_id": "A1"}"#).unwrap();
        assert!(!body.succeeded());
    }

    #[test]
    fn test_response_structured_detail() {
        let body: CheckoutResponse =
            serde_json::from_str(r#"{"detail": [{"msg": "field required"}]}"#).unwrap();
        assert_eq!(body.detail.as_deref(), Some(r#"[{"msg":"field required"}]"#));
    }
}
