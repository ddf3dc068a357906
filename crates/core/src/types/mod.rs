//! Core types for Go Marketplace.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod id;
pub mod line_item;
pub mod price;
pub mod quantity;

pub use id::*;
pub use line_item::{CartSummary, CatalogProduct, LineItem};
pub use price::Price;
pub use quantity::{Quantity, QuantityError};
