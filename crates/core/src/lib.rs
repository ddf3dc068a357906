//! Go Marketplace Core - Shared cart types library.
//!
//! This crate provides the types shared by all Go Marketplace components:
//! - `cart` - Cart state store, persistence, and access point
//! - `cli` - Command-line front end for a file-backed cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no async
//! runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, prices, quantities, and cart lines

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
