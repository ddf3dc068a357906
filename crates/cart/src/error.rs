//! Unified error handling for cart operations.
//!
//! Every fallible cart operation returns [`Result<T>`]. Storage failures leave
//! the in-memory cart untouched, so callers can log the error and carry on.

use go_marketplace_core::ProductId;
use thiserror::Error;

use crate::storage::StorageError;

/// Errors returned by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// Reading or writing the persisted snapshot failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The cart could not be serialized for storage.
    #[error("Snapshot encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// No line in the cart has this product ID.
    #[error("Product not in cart: {0}")]
    ItemNotFound(ProductId),

    /// Incrementing would exceed the largest representable quantity.
    #[error("Quantity overflow for product {0}")]
    QuantityOverflow(ProductId),

    /// A handle was used after its provider was dropped.
    #[error("cart handle used outside provider")]
    OutsideProvider,
}

impl CartError {
    /// Whether this error came from the storage backend.
    #[must_use]
    pub const fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }
}

/// Result type alias for `CartError`.
pub type Result<T> = std::result::Result<T, CartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        let err = CartError::ItemNotFound(ProductId::new("p-404"));
        assert_eq!(err.to_string(), "Product not in cart: p-404");

        let err = CartError::OutsideProvider;
        assert_eq!(err.to_string(), "cart handle used outside provider");
    }

    #[test]
    fn test_storage_error_converts() {
        let err: CartError = StorageError::Unavailable("quota exceeded".to_string()).into();
        assert!(err.is_storage());
        assert_eq!(err.to_string(), "Storage error: storage unavailable: quota exceeded");
    }
}
