//! Go Marketplace cart library.
//!
//! A shopping-cart state container for the storefront client. It keeps an
//! ordered list of line items, persists a JSON snapshot to a key-value store
//! after every mutation, and restores it on startup.
//!
//! # Architecture
//!
//! - [`storage`] - `KeyValueStore` trait with in-memory and file backends
//! - [`snapshot`] - Encoding and validation of the persisted cart format
//! - [`store`] - `CartStore`, the single owner of cart state
//! - [`provider`] - `CartProvider` / `CartHandle`, the access point for consumers
//! - [`config`] - Environment-driven configuration
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use go_marketplace_cart::storage::MemoryStore;
//! use go_marketplace_cart::{CartProvider, CartStore, DEFAULT_STORAGE_KEY};
//! use go_marketplace_core::{CatalogProduct, ProductId};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = CartStore::open(Arc::new(MemoryStore::new()), DEFAULT_STORAGE_KEY).await;
//! let provider = CartProvider::new(store);
//! let cart = provider.handle();
//!
//! let product_id = ProductId::new("p1");
//! let product = CatalogProduct {
//!     id: product_id.clone(),
//!     title: "Shirt".to_string(),
//!     image_url: "https://cdn.example.com/p1.png".to_string(),
//!     price: "19.99".parse()?,
//! };
//!
//! cart.add_to_cart(product).await?;
//! cart.increment(&product_id).await?;
//! assert_eq!(cart.summary()?.item_count, 2);
//!
//! provider.shutdown().await;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod provider;
pub mod snapshot;
pub mod storage;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use error::{CartError, Result};
pub use provider::{CartAction, CartHandle, CartProvider};
pub use storage::{KeyValueStore, StorageError};
pub use store::{CartStore, LoadOutcome};

/// Storage key under which the cart snapshot is persisted.
pub const DEFAULT_STORAGE_KEY: &str = "@GoMarketplace";
