//! In-memory shopping cart.
//!
//! The cart is an ordered list of line items, one per product identity, in
//! the order products were first added. It only ever grows one unit at a
//! time: there is no remove or decrement operation. The whole cart is
//! emptied by a successful checkout via [`Cart::take`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, Product, ProductKey};

/// Errors from cart operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CartError {
    /// Adding the unit would push the cart total past [`Price::MAX`].
    #[error("cart total would overflow adding {title}")]
    TotalOverflow { title: String },
}

/// One product identity in the cart with its aggregated quantity.
///
/// Title, price and image are captured when the product is first added and
/// are not refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductKey,
    pub title: String,
    pub price: Price,
    /// Always at least 1.
    pub quantity: u32,
    pub image: String,
}

impl CartLine {
    fn first_unit(product_id: ProductKey, product: &Product) -> Self {
        Self {
            product_id,
            title: product.title.clone(),
            price: product.price,
            quantity: 1,
            image: product.image.clone(),
        }
    }

    /// Price multiplied by quantity.
    ///
    /// [`Cart::add`] keeps every line total representable, so this only
    /// saturates for lines built outside a cart.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.saturating_mul(self.quantity)
    }
}

/// The shopper's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Add one unit of `product`.
    ///
    /// If a line with the same [`Product::key`] exists its quantity grows by
    /// one and it keeps its position; otherwise a new line is appended.
    /// Returns the line's resulting quantity.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::TotalOverflow`] and leaves the cart unchanged if
    /// the new total would not be representable.
    pub fn add(&mut self, product: &Product) -> Result<u32, CartError> {
        if self
            .checked_total()
            .and_then(|total| total.checked_add(product.price))
            .is_none()
        {
            return Err(CartError::TotalOverflow {
                title: product.title.clone(),
            });
        }

        let key = product.key();
        if let Some(line) = self.lines.iter_mut().find(|line| line.product_id == key) {
            line.quantity = line.quantity.saturating_add(1);
            return Ok(line.quantity);
        }
        self.lines.push(CartLine::first_unit(key, product));
        Ok(1)
    }

    /// Sum of price × quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.checked_total().unwrap_or(Price::MAX)
    }

    fn checked_total(&self) -> Option<Price> {
        self.lines.iter().try_fold(Price::ZERO, |total, line| {
            total.checked_add(line.price.checked_mul(line.quantity)?)
        })
    }

    /// Line items in first-added order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines (the navbar badge count).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Empty the cart, returning the lines it held.
    ///
    /// Only a successful checkout empties the cart.
    pub fn take(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }
}
