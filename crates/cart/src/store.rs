//! Cart state store.
//!
//! [`CartStore`] is the single owner of cart state. Every mutation goes
//! through one `commit` routine that:
//!
//! 1. Takes the write lock, so mutations apply one at a time in FIFO order
//! 2. Derives the next line list from the latest committed list
//! 3. Writes the encoded snapshot to storage
//! 4. Publishes the new list only if the write succeeded
//!
//! A failed write leaves the in-memory cart at its last known-good state.

use std::sync::Arc;

use go_marketplace_core::{CartSummary, CatalogProduct, LineItem, ProductId};
use tokio::sync::{Mutex, watch};
use tracing::{debug, error, info, instrument, warn};

use crate::error::{CartError, Result};
use crate::snapshot;
use crate::storage::KeyValueStore;

/// Result of loading the persisted snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A valid snapshot with this many lines replaced the cart.
    Restored(usize),
    /// Nothing was stored under the cart key.
    Empty,
    /// The stored snapshot could not be decoded and was ignored.
    Discarded,
}

/// In-memory cart backed by a snapshot in a [`KeyValueStore`].
pub struct CartStore {
    storage: Arc<dyn KeyValueStore>,
    key: String,
    write_lock: Mutex<()>,
    lines: watch::Sender<Vec<LineItem>>,
}

impl CartStore {
    /// Create an empty cart over `storage` without reading it.
    #[must_use]
    pub fn new(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let (lines, _) = watch::channel(Vec::new());
        Self {
            storage,
            key: key.into(),
            write_lock: Mutex::new(()),
            lines,
        }
    }

    /// Create a cart and restore it from the snapshot stored under `key`.
    ///
    /// Never fails: an unreadable snapshot or an unavailable store is logged
    /// and the cart starts empty.
    pub async fn open(storage: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let store = Self::new(storage, key);
        if let Err(e) = store.load().await {
            error!(error = %e, key = %store.key, "Failed to load cart, starting empty");
        }
        store
    }

    /// Replace the cart with the snapshot currently in storage.
    ///
    /// A missing or undecodable snapshot yields an empty cart. The loaded
    /// state is not written back.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the read fails. The cart is left unchanged.
    #[instrument(skip(self), fields(key = %self.key))]
    pub async fn load(&self) -> Result<LoadOutcome> {
        let _guard = self.write_lock.lock().await;

        let Some(raw) = self.storage.get(&self.key).await? else {
            debug!("No stored cart snapshot");
            self.publish(Vec::new());
            return Ok(LoadOutcome::Empty);
        };

        match snapshot::decode(&raw) {
            Ok(lines) => {
                let count = lines.len();
                self.publish(lines);
                info!(lines = count, "Restored cart from storage");
                Ok(LoadOutcome::Restored(count))
            }
            Err(e) => {
                warn!(error = %e, "Discarding unreadable cart snapshot");
                self.publish(Vec::new());
                Ok(LoadOutcome::Discarded)
            }
        }
    }

    /// Storage key the snapshot is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Current cart lines, in insertion order.
    #[must_use]
    pub fn products(&self) -> Vec<LineItem> {
        self.lines.borrow().clone()
    }

    /// Totals for the current cart lines.
    #[must_use]
    pub fn summary(&self) -> CartSummary {
        CartSummary::from_lines(&self.lines.borrow())
    }

    /// Receive the full line list after every committed change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<LineItem>> {
        self.lines.subscribe()
    }

    /// Add one unit of `product`.
    ///
    /// Appends a new line with quantity 1, or increments the existing line
    /// with the same ID.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the snapshot cannot be written, or
    /// `CartError::QuantityOverflow` if the existing line is already at the maximum.
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    pub async fn add_to_cart(&self, product: CatalogProduct) -> Result<()> {
        self.commit("add_to_cart", |lines| with_added(lines, product))
            .await
    }

    /// Add one unit to the line for `id`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if no line has this ID, or
    /// `CartError::Storage` if the snapshot cannot be written.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn increment(&self, id: &ProductId) -> Result<()> {
        self.commit("increment", |lines| with_incremented(lines, id))
            .await
    }

    /// Remove one unit from the line for `id`, dropping the line at zero.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if no line has this ID, or
    /// `CartError::Storage` if the snapshot cannot be written.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn decrement(&self, id: &ProductId) -> Result<()> {
        self.commit("decrement", |lines| with_decremented(lines, id))
            .await
    }

    /// Drop the line for `id` regardless of its quantity.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ItemNotFound` if no line has this ID, or
    /// `CartError::Storage` if the snapshot cannot be written.
    #[instrument(skip(self, id), fields(product_id = %id))]
    pub async fn remove(&self, id: &ProductId) -> Result<()> {
        self.commit("remove", |lines| with_removed(lines, id)).await
    }

    /// Drop every line.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Storage` if the snapshot cannot be written.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<()> {
        self.commit("clear", |_| Ok(Vec::new())).await
    }

    /// Apply `update` to the latest committed lines, persist, then publish.
    async fn commit<F>(&self, operation: &'static str, update: F) -> Result<()>
    where
        F: FnOnce(&[LineItem]) -> Result<Vec<LineItem>>,
    {
        let _guard = self.write_lock.lock().await;

        let next = {
            let current = self.lines.borrow();
            update(&current)
        };
        let next = match next {
            Ok(next) => next,
            Err(e) => {
                warn!(operation, error = %e, "Cart update rejected");
                return Err(e);
            }
        };

        let encoded = match snapshot::encode(&next) {
            Ok(encoded) => encoded,
            Err(e) => {
                error!(operation, error = %e, "Failed to encode cart, keeping previous state");
                return Err(CartError::Encode(e));
            }
        };
        if let Err(e) = self.storage.set(&self.key, encoded).await {
            error!(operation, error = %e, "Failed to persist cart, keeping previous state");
            return Err(e.into());
        }

        debug!(operation, lines = next.len(), "Committed cart");
        self.publish(next);
        Ok(())
    }

    /// Replace the published lines, notifying subscribers only on change.
    fn publish(&self, next: Vec<LineItem>) {
        self.lines.send_if_modified(|lines| {
            if *lines == next {
                false
            } else {
                *lines = next;
                true
            }
        });
    }
}

// =============================================================================
// Pure Updates
// =============================================================================

fn ensure_present(lines: &[LineItem], id: &ProductId) -> Result<()> {
    if lines.iter().any(|line| &line.id == id) {
        Ok(())
    } else {
        Err(CartError::ItemNotFound(id.clone()))
    }
}

fn with_added(lines: &[LineItem], product: CatalogProduct) -> Result<Vec<LineItem>> {
    if lines.iter().any(|line| line.id == product.id) {
        return with_incremented(lines, &product.id);
    }

    Ok(lines
        .iter()
        .cloned()
        .chain(std::iter::once(LineItem::from_product(product)))
        .collect())
}

fn with_incremented(lines: &[LineItem], id: &ProductId) -> Result<Vec<LineItem>> {
    ensure_present(lines, id)?;

    lines
        .iter()
        .map(|line| {
            if &line.id == id {
                line.quantity
                    .increment()
                    .map(|quantity| line.with_quantity(quantity))
                    .ok_or_else(|| CartError::QuantityOverflow(id.clone()))
            } else {
                Ok(line.clone())
            }
        })
        .collect()
}

fn with_decremented(lines: &[LineItem], id: &ProductId) -> Result<Vec<LineItem>> {
    ensure_present(lines, id)?;

    Ok(lines
        .iter()
        .filter_map(|line| {
            if &line.id == id {
                line.quantity
                    .decrement()
                    .map(|quantity| line.with_quantity(quantity))
            } else {
                Some(line.clone())
            }
        })
        .collect())
}

fn with_removed(lines: &[LineItem], id: &ProductId) -> Result<Vec<LineItem>> {
    ensure_present(lines, id)?;

    Ok(lines.iter().filter(|line| &line.id != id).cloned().collect())
}
