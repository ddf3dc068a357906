//! Cart line items and derived views.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Price, ProductId, Quantity};

/// A catalog product as handed to `add_to_cart`.
///
/// Carries everything a cart line needs except the quantity. A `quantity`
/// field present in JSON input is ignored, since new lines always start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    /// Stable product identifier supplied by the catalog.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Product image location.
    pub image_url: String,
    /// Unit price.
    pub price: Price,
}

/// One product entry in the cart.
///
/// Field names match the persisted snapshot format exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Stable product identifier, unique within a cart.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Product image location.
    pub image_url: String,
    /// Unit price.
    pub price: Price,
    /// Units in the cart, always at least 1.
    pub quantity: Quantity,
}

impl LineItem {
    /// Create a line with a quantity of 1 from a catalog product.
    #[must_use]
    pub fn from_product(product: CatalogProduct) -> Self {
        Self {
            id: product.id,
            title: product.title,
            image_url: product.image_url,
            price: product.price,
            quantity: Quantity::ONE,
        }
    }

    /// The same line with a different quantity.
    #[must_use]
    pub fn with_quantity(&self, quantity: Quantity) -> Self {
        Self {
            quantity,
            ..self.clone()
        }
    }

    /// Unit price times quantity, or `None` if it exceeds the decimal range.
    #[must_use]
    pub fn line_total(&self) -> Option<Decimal> {
        self.price.line_total(self.quantity)
    }
}

impl From<CatalogProduct> for LineItem {
    fn from(product: CatalogProduct) -> Self {
        Self::from_product(product)
    }
}

/// Totals derived from the current cart contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// Sum of all line quantities.
    pub item_count: u64,
    /// Number of distinct lines.
    pub line_count: usize,
    /// Sum of all line totals, `None` once it exceeds the decimal range.
    pub subtotal: Option<Decimal>,
}

impl Default for CartSummary {
    fn default() -> Self {
        Self::from_lines(&[])
    }
}

impl CartSummary {
    /// Summarize a sequence of cart lines.
    #[must_use]
    pub fn from_lines(lines: &[LineItem]) -> Self {
        lines.iter().fold(
            Self {
                item_count: 0,
                line_count: lines.len(),
                subtotal: Some(Decimal::ZERO),
            },
            |summary, line| Self {
                item_count: summary
                    .item_count
                    .saturating_add(u64::from(line.quantity.get())),
                subtotal: summary
                    .subtotal
                    .zip(line.line_total())
                    .and_then(|(total, line_total)| total.checked_add(line_total)),
                ..summary
            },
        )
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.line_count == 0
    }
}
