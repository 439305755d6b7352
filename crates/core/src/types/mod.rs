//! Core types for FreshBite.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod customer;
pub mod email;
pub mod id;
pub mod price;
pub mod product;
pub mod status;

pub use customer::Customer;
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{Price, PriceError};
pub use product::Product;
pub use status::*;
