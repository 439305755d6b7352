//! Customer details sent with a checkout request.

use serde::{Deserialize, Serialize};

use super::email::Email;

/// Shipping and contact details attached to an order.
///
/// The storefront does not collect these from the shopper; every checkout
/// uses [`Customer::guest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub customer_name: String,
    pub email: Email,
    pub address: String,
    pub city: String,
    pub country: String,
}

impl Customer {
    /// The fixed guest customer used for every order.
    #[must_use]
    pub fn guest() -> Self {
        Self {
            customer_name: "Guest".to_string(),
            email: Email::guest(),
            address: "123 Market St".to_string(),
            city: "San Francisco".to_string(),
            country: "USA".to_string(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_guest_serializes_flat() {
        let value = serde_json::to_value(Customer::guest()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "customer_name": "Guest",
                "email": "guest@example.com",
                "address": "123 Market St",
                "city": "San Francisco",
                "country": "USA",
            })
        );
    }
}
