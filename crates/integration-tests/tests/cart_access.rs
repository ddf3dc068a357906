//! Integration tests for the cart access point.
//!
//! These tests drive the cart through `CartProvider` / `CartHandle` the way
//! application code does, against the file-backed store.

use go_marketplace_cart::{CartAction, CartError, CartProvider};
use go_marketplace_core::ProductId;
use go_marketplace_integration_tests::{TestCart, product};
use rust_decimal_macros::dec;

// =============================================================================
// Lost Update Tests
// =============================================================================

#[tokio::test]
async fn test_back_to_back_increments_are_not_lost() {
    let fixture = TestCart::new().expect("Failed to create temp dir");
    let provider = CartProvider::new(fixture.open().await);
    let cart = provider.handle();
    let id = ProductId::new("p1");

    cart.add_to_cart(product("p1", dec!(10))).await.expect("add p1");

    // Issue both increments before awaiting either
    let first = cart.increment(&id);
    let second = cart.increment(&id);
    let (a, b) = tokio::join!(first, second);
    a.expect("first increment");
    b.expect("second increment");

    let lines = cart.products().expect("provider alive");
    assert_eq!(lines.len(), 1);
    assert_eq!(lines.first().map(|l| l.quantity.get()), Some(3));

    let restarted = fixture.open().await;
    assert_eq!(restarted.products(), lines);
}

#[tokio::test]
async fn test_many_concurrent_handles() {
    let fixture = TestCart::new().expect("Failed to create temp dir");
    let provider = CartProvider::new(fixture.open().await);
    let id = ProductId::new("p1");

    provider
        .handle()
        .add_to_cart(product("p1", dec!(1)))
        .await
        .expect("add p1");

    let tasks: Vec<_> = (0..20)
        .map(|_| {
            let cart = provider.handle();
            let id = id.clone();
            tokio::spawn(async move { cart.increment(&id).await })
        })
        .collect();
    for task in tasks {
        task.await.expect("task panicked").expect("increment");
    }

    let summary = provider.handle().summary().expect("provider alive");
    assert_eq!(summary.item_count, 21);
    assert_eq!(fixture.open().await.summary().item_count, 21);
}

// =============================================================================
// Ordering Tests
// =============================================================================

#[tokio::test]
async fn test_increment_keeps_line_order() {
    let fixture = TestCart::new().expect("Failed to create temp dir");
    let provider = CartProvider::new(fixture.open().await);
    let cart = provider.handle();

    cart.add_to_cart(product("p1", dec!(1))).await.expect("add p1");
    cart.add_to_cart(product("p2", dec!(2))).await.expect("add p2");
    cart.increment(&ProductId::new("p1")).await.expect("increment p1");

    let ids: Vec<String> = cart
        .products()
        .expect("provider alive")
        .into_iter()
        .map(|line| line.id.into_inner())
        .collect();
    assert_eq!(ids, ["p1", "p2"]);
}

#[tokio::test]
async fn test_dispatched_actions_persist_in_order() {
    let fixture = TestCart::new().expect("Failed to create temp dir");
    let provider = CartProvider::new(fixture.open().await);
    let cart = provider.handle();
    let p1 = ProductId::new("p1");

    cart.dispatch(CartAction::AddToCart(product("p1", dec!(2))))
        .expect("dispatch");
    cart.dispatch(CartAction::AddToCart(product("p2", dec!(3))))
        .expect("dispatch");
    cart.dispatch(CartAction::Increment(p1.clone())).expect("dispatch");
    cart.dispatch(CartAction::Remove(ProductId::new("p2")))
        .expect("dispatch");
    cart.dispatch(CartAction::Decrement(p1)).expect("dispatch");
    provider.shutdown().await;

    let restarted = fixture.open().await;
    let lines = restarted.products();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines.first().map(|l| l.id.as_str()), Some("p1"));
    assert_eq!(lines.first().map(|l| l.quantity.get()), Some(1));
}

// =============================================================================
// Error Tests
// =============================================================================

#[tokio::test]
async fn test_unknown_product_is_reported() {
    let fixture = TestCart::new().expect("Failed to create temp dir");
    let provider = CartProvider::new(fixture.open().await);
    let cart = provider.handle();

    let result = cart.decrement(&ProductId::new("missing")).await;

    assert!(matches!(result, Err(CartError::ItemNotFound(ref id)) if id.as_str() == "missing"));
    assert_eq!(
        fixture.raw_snapshot().await.expect("Failed to read snapshot"),
        None
    );
}

#[tokio::test]
async fn test_handle_after_provider_dropped() {
    let fixture = TestCart::new().expect("Failed to create temp dir");
    let provider = CartProvider::new(fixture.open().await);
    let cart = provider.handle();
    cart.add_to_cart(product("p1", dec!(1))).await.expect("add p1");

    drop(provider);

    assert!(matches!(cart.products(), Err(CartError::OutsideProvider)));
    assert!(matches!(
        cart.decrement(&ProductId::new("p1")).await,
        Err(CartError::OutsideProvider)
    ));

    // State written before the provider went away is still on disk
    assert_eq!(fixture.open().await.products().len(), 1);
}

#[tokio::test]
async fn test_unwritable_storage_keeps_memory_state() {
    let fixture = TestCart::new().expect("Failed to create temp dir");
    let provider = CartProvider::new(fixture.open().await);
    let cart = provider.handle();
    cart.add_to_cart(product("p1", dec!(1))).await.expect("add p1");

    // Replace the data directory with a plain file so writes fail
    let dir = fixture.path().to_path_buf();
    std::fs::remove_dir_all(&dir).expect("remove data dir");
    std::fs::write(&dir, b"not a directory").expect("create blocking file");

    let err = cart
        .increment(&ProductId::new("p1"))
        .await
        .expect_err("write should fail");
    assert!(err.is_storage());

    let lines = cart.products().expect("provider alive");
    assert_eq!(lines.first().map(|l| l.quantity.get()), Some(1));

    std::fs::remove_file(&dir).expect("remove blocking file");
}
