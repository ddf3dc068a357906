//! Integration tests for Go Marketplace.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p go-marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_persistence` - Restart round trips over the file-backed store
//! - `cart_access` - Provider and handle behavior against real storage
//!
//! Every test gets its own temporary data directory via [`TestCart`].

use std::path::Path;
use std::sync::Arc;

use go_marketplace_cart::storage::FileStore;
use go_marketplace_cart::{CartStore, DEFAULT_STORAGE_KEY, KeyValueStore, StorageError};
use go_marketplace_core::{CatalogProduct, Price, ProductId};
use rust_decimal::Decimal;
use tempfile::TempDir;

/// A file-backed cart location that lives as long as the test.
pub struct TestCart {
    dir: TempDir,
}

impl TestCart {
    /// Create a fresh, empty data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary directory cannot be created.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: tempfile::tempdir()?,
        })
    }

    /// Data directory backing the store.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// A new store instance over the test directory.
    #[must_use]
    pub fn storage(&self) -> Arc<FileStore> {
        Arc::new(FileStore::new(self.dir.path()))
    }

    /// Open the cart as a freshly started process would.
    pub async fn open(&self) -> CartStore {
        CartStore::open(self.storage(), DEFAULT_STORAGE_KEY).await
    }

    /// Raw snapshot currently on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot file cannot be read.
    pub async fn raw_snapshot(&self) -> Result<Option<String>, StorageError> {
        self.storage().get(DEFAULT_STORAGE_KEY).await
    }

    /// Write a raw snapshot, bypassing the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot file cannot be written.
    pub async fn write_raw_snapshot(&self, raw: &str) -> Result<(), StorageError> {
        self.storage().set(DEFAULT_STORAGE_KEY, raw.to_string()).await
    }
}

/// A catalog product with predictable fields.
#[must_use]
pub fn product(id: &str, price: Decimal) -> CatalogProduct {
    CatalogProduct {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        image_url: format!("https://cdn.example.com/{id}.png"),
        price: Price::new(price),
    }
}
