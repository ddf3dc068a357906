//! Cart inspection and editing commands.
//!
//! Each command runs against the file-backed cart selected by
//! `CART_STORAGE_DIR` / `CART_STORAGE_KEY` and persists before returning.

use go_marketplace_cart::CartHandle;
use go_marketplace_core::{CatalogProduct, ProductId};
use rust_decimal::Decimal;
use tracing::info;

use super::CommandError;

/// Log every cart line and the totals.
///
/// # Errors
///
/// Returns an error if the cart is no longer available.
pub fn list(cart: &CartHandle) -> Result<(), CommandError> {
    let lines = cart.products()?;
    let summary = cart.summary()?;

    if summary.is_empty() {
        info!("Cart is empty");
        return Ok(());
    }

    info!("Cart contents");
    info!("=============");
    for line in &lines {
        info!(
            "  {} x{} {} @ {} = {}",
            line.id,
            line.quantity,
            line.title,
            line.price,
            format_total(line.line_total())
        );
    }
    info!(
        "Items: {}  Lines: {}  Subtotal: {}",
        summary.item_count,
        summary.line_count,
        format_total(summary.subtotal)
    );

    Ok(())
}

fn format_total(total: Option<Decimal>) -> String {
    total.map_or_else(|| "out of range".to_string(), |total| format!("{total:.2}"))
}

/// Add one unit of `product`.
///
/// # Errors
///
/// Returns an error if the cart cannot be persisted.
pub async fn add(cart: &CartHandle, product: CatalogProduct) -> Result<(), CommandError> {
    let id = product.id.clone();
    cart.add_to_cart(product).await?;
    log_quantity(cart, &id)
}

/// Add one unit to the line for `id`.
///
/// # Errors
///
/// Returns an error if the product is not in the cart or storage fails.
pub async fn increment(cart: &CartHandle, id: &ProductId) -> Result<(), CommandError> {
    cart.increment(id).await?;
    log_quantity(cart, id)
}

/// Remove one unit from the line for `id`.
///
/// # Errors
///
/// Returns an error if the product is not in the cart or storage fails.
pub async fn decrement(cart: &CartHandle, id: &ProductId) -> Result<(), CommandError> {
    cart.decrement(id).await?;
    log_quantity(cart, id)
}

/// Drop the line for `id`.
///
/// # Errors
///
/// Returns an error if the product is not in the cart or storage fails.
pub async fn remove(cart: &CartHandle, id: &ProductId) -> Result<(), CommandError> {
    cart.remove(id).await?;
    info!(product_id = %id, "Removed from cart");
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if storage fails.
pub async fn clear(cart: &CartHandle) -> Result<(), CommandError> {
    cart.clear().await?;
    info!("Cart cleared");
    Ok(())
}

fn log_quantity(cart: &CartHandle, id: &ProductId) -> Result<(), CommandError> {
    let quantity = cart
        .products()?
        .into_iter()
        .find(|line| &line.id == id)
        .map_or(0, |line| line.quantity.get());

    if quantity == 0 {
        info!(product_id = %id, "Removed from cart");
    } else {
        info!(product_id = %id, quantity, "Updated cart");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_format_total() {
        assert_eq!(format_total(Some(dec!(8.5))), "8.50");
        assert_eq!(format_total(None), "out of range");
    }
}
