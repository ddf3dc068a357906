//! Cart access point for application consumers.
//!
//! [`CartProvider`] is the root composition unit: it owns the [`CartStore`]
//! and a single queue worker that applies fire-and-forget actions in the
//! order they were dispatched. Consumers never touch the store directly.
//! They receive a [`CartHandle`] from the provider.
//!
//! A handle only holds a weak reference. Once the provider is gone, every
//! call through the handle fails with [`CartError::OutsideProvider`].

use std::fmt;
use std::sync::{Arc, Weak};

use go_marketplace_core::{CartSummary, CatalogProduct, LineItem, ProductId};
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use crate::error::{CartError, Result};
use crate::store::CartStore;

/// A cart mutation that can be dispatched without awaiting its result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// Add one unit of a catalog product.
    AddToCart(CatalogProduct),
    /// Add one unit to an existing line.
    Increment(ProductId),
    /// Remove one unit from an existing line.
    Decrement(ProductId),
    /// Drop a line entirely.
    Remove(ProductId),
    /// Drop every line.
    Clear,
}

impl CartAction {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::AddToCart(_) => "add_to_cart",
            Self::Increment(_) => "increment",
            Self::Decrement(_) => "decrement",
            Self::Remove(_) => "remove",
            Self::Clear => "clear",
        }
    }

    async fn apply(self, store: &CartStore) -> Result<()> {
        match self {
            Self::AddToCart(product) => store.add_to_cart(product).await,
            Self::Increment(id) => store.increment(&id).await,
            Self::Decrement(id) => store.decrement(&id).await,
            Self::Remove(id) => store.remove(&id).await,
            Self::Clear => store.clear().await,
        }
    }
}

enum QueueMessage {
    Apply(CartAction),
    Barrier(oneshot::Sender<()>),
}

struct ProviderInner {
    store: Arc<CartStore>,
    queue: mpsc::UnboundedSender<QueueMessage>,
}

/// Owner of the cart store and its action queue.
pub struct CartProvider {
    inner: Arc<ProviderInner>,
    worker: JoinHandle<()>,
}

impl CartProvider {
    /// Take ownership of `store` and start the action queue worker.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    #[must_use]
    pub fn new(store: CartStore) -> Self {
        let store = Arc::new(store);
        let (queue, receiver) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_queue(Arc::clone(&store), receiver));

        Self {
            inner: Arc::new(ProviderInner { store, queue }),
            worker,
        }
    }

    /// Create a handle for a consumer.
    #[must_use]
    pub fn handle(&self) -> CartHandle {
        CartHandle {
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// The owned cart store.
    #[must_use]
    pub fn store(&self) -> &CartStore {
        &self.inner.store
    }

    /// Close the provider and wait for queued actions to finish.
    ///
    /// Handles created from this provider stop working immediately, even
    /// while the queue is still draining.
    pub async fn shutdown(self) {
        drop(self.inner);
        if let Err(e) = self.worker.await {
            error!(error = %e, "Cart queue worker failed");
        }
    }
}

/// Applies dispatched actions one at a time until every sender is gone.
async fn run_queue(store: Arc<CartStore>, mut receiver: mpsc::UnboundedReceiver<QueueMessage>) {
    while let Some(message) = receiver.recv().await {
        match message {
            QueueMessage::Apply(action) => {
                let name = action.name();
                if let Err(e) = action.apply(&store).await {
                    warn!(action = name, error = %e, "Dispatched cart action failed");
                }
            }
            QueueMessage::Barrier(done) => {
                let _ = done.send(());
            }
        }
    }
    debug!("Cart queue closed");
}

/// Consumer access to the cart owned by a [`CartProvider`].
///
/// Cheap to clone. All calls fail with [`CartError::OutsideProvider`] once
/// the provider has been dropped.
#[derive(Clone)]
pub struct CartHandle {
    inner: Weak<ProviderInner>,
}

impl CartHandle {
    fn provider(&self) -> Result<Arc<ProviderInner>> {
        self.inner.upgrade().ok_or_else(|| {
            error!("Cart handle used outside provider");
            CartError::OutsideProvider
        })
    }

    /// Whether the owning provider is still alive.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.inner.strong_count() > 0
    }

    /// Current cart lines, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `CartError::OutsideProvider` if the provider is gone.
    pub fn products(&self) -> Result<Vec<LineItem>> {
        Ok(self.provider()?.store.products())
    }

    /// Totals for the current cart lines.
    ///
    /// # Errors
    ///
    /// Returns `CartError::OutsideProvider` if the provider is gone.
    pub fn summary(&self) -> Result<CartSummary> {
        Ok(self.provider()?.store.summary())
    }

    /// Receive the full line list after every committed change.
    ///
    /// # Errors
    ///
    /// Returns `CartError::OutsideProvider` if the provider is gone.
    pub fn subscribe(&self) -> Result<watch::Receiver<Vec<LineItem>>> {
        Ok(self.provider()?.store.subscribe())
    }

    /// Add one unit of `product` and wait for it to be persisted.
    ///
    /// # Errors
    ///
    /// See [`CartStore::add_to_cart`]; also `CartError::OutsideProvider`.
    pub async fn add_to_cart(&self, product: CatalogProduct) -> Result<()> {
        self.provider()?.store.add_to_cart(product).await
    }

    /// Add one unit to the line for `id`.
    ///
    /// # Errors
    ///
    /// See [`CartStore::increment`]; also `CartError::OutsideProvider`.
    pub async fn increment(&self, id: &ProductId) -> Result<()> {
        self.provider()?.store.increment(id).await
    }

    /// Remove one unit from the line for `id`.
    ///
    /// # Errors
    ///
    /// See [`CartStore::decrement`]; also `CartError::OutsideProvider`.
    pub async fn decrement(&self, id: &ProductId) -> Result<()> {
        self.provider()?.store.decrement(id).await
    }

    /// Drop the line for `id`.
    ///
    /// # Errors
    ///
    /// See [`CartStore::remove`]; also `CartError::OutsideProvider`.
    pub async fn remove(&self, id: &ProductId) -> Result<()> {
        self.provider()?.store.remove(id).await
    }

    /// Drop every line.
    ///
    /// # Errors
    ///
    /// See [`CartStore::clear`]; also `CartError::OutsideProvider`.
    pub async fn clear(&self) -> Result<()> {
        self.provider()?.store.clear().await
    }

    /// Queue `action` without waiting for it.
    ///
    /// Queued actions run in dispatch order. Failures are logged by the
    /// queue worker.
    ///
    /// # Errors
    ///
    /// Returns `CartError::OutsideProvider` if the provider is gone.
    pub fn dispatch(&self, action: CartAction) -> Result<()> {
        self.provider()?
            .queue
            .send(QueueMessage::Apply(action))
            .map_err(|_| CartError::OutsideProvider)
    }

    /// Wait until every action dispatched before this call has been applied.
    ///
    /// # Errors
    ///
    /// Returns `CartError::OutsideProvider` if the provider is gone.
    pub async fn settled(&self) -> Result<()> {
        let (done, wait) = oneshot::channel();
        self.provider()?
            .queue
            .send(QueueMessage::Barrier(done))
            .map_err(|_| CartError::OutsideProvider)?;
        wait.await.map_err(|_| CartError::OutsideProvider)
    }
}

impl fmt::Debug for CartHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartHandle")
            .field("active", &self.is_active())
            .finish()
    }
}
