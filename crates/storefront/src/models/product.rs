//! Catalog product and cart line types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use tuhogar_core::{Price, ProductId};

/// A catalog product as the storefront sees it.
///
/// Owned by the remote catalog service; read-only to the engine except for
/// the stock write-back issued by checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Stable identifier assigned by the catalog service.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Unit price.
    pub price: Price,
    /// Long-form description.
    pub description: String,
    /// Free-form category label.
    pub category: String,
    /// Units available at the time this value was read.
    pub stock: u32,
    /// Image reference.
    pub image: String,
}

/// One cart entry: a product snapshot plus the chosen quantity.
///
/// The snapshot is taken when the product is added (and refreshed by
/// repeated adds of the same id). Its `stock` value is the quantity ceiling
/// for this line; the live remote stock is only consulted at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Product snapshot at time of add.
    pub product: Product,
    /// Units of this product in the cart. Always at least 1.
    pub quantity: u32,
}

impl CartLine {
    /// Exact subtotal for this line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price.times(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::dec;

    use super::*;

    fn product(id: &str, price: Decimal, stock: u32) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: Price::new(price).unwrap(),
            description: String::new(),
            category: "general".to_string(),
            stock,
            image: String::new(),
        }
    }

    #[test]
    fn test_line_total() {
        let line = CartLine {
            product: product("a", dec!(3.50), 5),
            quantity: 3,
        };
        assert_eq!(line.line_total(), dec!(10.50));
    }

    #[test]
    fn test_cart_line_round_trip() {
        let line = CartLine {
            product: product("a", dec!(12.99), 4),
            quantity: 2,
        };
        let json = serde_json::to_string(&line).unwrap();
        let back: CartLine = serde_json::from_str(&json).unwrap();
        assert_eq!(back, line);
    }
}
