//! Non-negative price representation using decimal arithmetic.
//!
//! Prices arrive from the catalog backend as JSON numbers and are posted back
//! to the checkout endpoint the same way. Internally they are held as
//! [`Decimal`] so that cart totals never accumulate binary floating point
//! error (`2.50 * 2 + 1.00 * 3` is exactly `8.00`).
//!
//! Arithmetic is checked or saturating; no price operation panics on
//! overflow.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is below zero.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),
}

/// A price in the store currency (US dollars).
///
/// ## Constraints
///
/// - Amount is never negative
///
/// ## Examples
///
/// ```
/// use freshbite_core::Price;
/// use rust_decimal::Decimal;
///
/// let price = Price::new(Decimal::new(250, 2)).unwrap();
/// assert_eq!(price.display(), "$2.50");
/// assert_eq!(price.checked_mul(2).unwrap().display(), "$5.00");
///
/// assert!(Price::new(Decimal::new(-1, 0)).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(Decimal);

impl Price {
    /// A price of zero.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// The largest representable price.
    pub const MAX: Self = Self(Decimal::MAX);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Get the decimal amount.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    /// Add two prices, or `None` on overflow.
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    /// Multiply by a quantity, or `None` on overflow.
    #[must_use]
    pub fn checked_mul(self, quantity: u32) -> Option<Self> {
        self.0.checked_mul(Decimal::from(quantity)).map(Self)
    }

    /// Add two prices, capping at [`Price::MAX`].
    #[must_use]
    pub fn saturating_add(self, rhs: Self) -> Self {
        self.checked_add(rhs).unwrap_or(Self::MAX)
    }

    /// Multiply by a quantity, capping at [`Price::MAX`].
    #[must_use]
    pub fn saturating_mul(self, quantity: u32) -> Self {
        self.checked_mul(quantity).unwrap_or(Self::MAX)
    }

    /// Format for display with two decimals (e.g., "$19.99").
    #[must_use]
    pub fn display(self) -> String {
        let mut amount = self.0.round_dp(2);
        amount.rescale(2);
        format!("${amount}")
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}


impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = rust_decimal::serde::float::deserialize(deserializer)?;
        Self::new(amount).map_err(serde::de::Error::custom)
    }
}
