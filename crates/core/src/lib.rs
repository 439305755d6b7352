//! FreshBite Core - Shared domain library.
//!
//! This crate provides the domain model used by the storefront:
//! - products as returned by the catalog backend
//! - the in-memory cart and its line items
//! - the single status notice and the page phase
//! - the client-side search filter
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no async runtime. Network access lives in `freshbite-storefront`.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for identities, prices, emails, and statuses
//! - [`cart`] - Cart store (add-one-unit, totals)
//! - [`search`] - Case-insensitive catalog filter

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod search;
pub mod types;

pub use cart::{Cart, CartError, CartLine};
pub use search::filter_products;
pub use types::*;
