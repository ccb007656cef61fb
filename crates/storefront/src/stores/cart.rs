//! Cart state store.
//!
//! Owns the cart lines, enforces the per-line stock ceiling, and notifies
//! subscribers synchronously after every mutation. Persistence is wired as
//! an on-change listener rather than embedded in the mutators, so the store
//! logic runs against a fake port in tests.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;

use tuhogar_core::ProductId;

use crate::models::{CartLine, Product, keys};
use crate::storage::KeyValueStore;

/// Cart mutation rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CartError {
    /// The line already holds every unit the snapshot says is in stock.
    #[error("only {available} in stock for product {id}")]
    StockExceeded { id: ProductId, available: u32 },
}

/// Callback invoked after every cart mutation with the new line set.
pub type CartListener = Box<dyn Fn(&[CartLine])>;

/// The shopping cart: at most one line per product id.
#[derive(Default)]
pub struct CartStore {
    lines: BTreeMap<ProductId, CartLine>,
    listeners: Vec<CartListener>,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a cart from the persistence port.
    ///
    /// Reads the cart blob once. A malformed blob resets to an empty cart
    /// without surfacing an error; duplicate ids in the blob collapse to
    /// the last line.
    #[must_use]
    pub fn restore(port: &dyn KeyValueStore) -> Self {
        let mut store = Self::new();
        match port.get(keys::CART) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<CartLine>>(&blob) {
                Ok(lines) => {
                    store.lines = lines
                        .into_iter()
                        .map(|line| (line.product.id.clone(), line))
                        .collect();
                }
                Err(err) => {
                    tracing::warn!(%err, "discarding malformed persisted cart");
                }
            },
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(%err, "failed to read persisted cart");
            }
        }
        store
    }

    /// Register a listener called synchronously after each mutation.
    pub fn subscribe(&mut self, listener: CartListener) {
        self.listeners.push(listener);
    }

    /// Wire a listener that writes the cart blob to `port` after every
    /// mutation, before the mutating call returns.
    pub fn persist_to(&mut self, port: Arc<dyn KeyValueStore>) {
        self.subscribe(Box::new(move |lines| match serde_json::to_string(lines) {
            Ok(blob) => {
                if let Err(err) = port.set(keys::CART, &blob) {
                    tracing::warn!(%err, "failed to persist cart");
                }
            }
            Err(err) => {
                tracing::warn!(%err, "failed to serialize cart");
            }
        }));
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of `product`.
    ///
    /// Creates a line with quantity 1, or increments the existing line while
    /// the snapshot stock allows. The stored snapshot is refreshed from the
    /// `product` argument on every successful call.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::StockExceeded`] when the line already holds
    /// every available unit (or the product has no stock at all); the cart
    /// is left unchanged.
    pub fn add(&mut self, product: &Product) -> Result<(), CartError> {
        let current = self.lines.get(&product.id).map_or(0, |line| line.quantity);
        if current >= product.stock {
            return Err(CartError::StockExceeded {
                id: product.id.clone(),
                available: product.stock,
            });
        }

        self.lines.insert(
            product.id.clone(),
            CartLine {
                product: product.clone(),
                quantity: current + 1,
            },
        );
        self.notify();
        Ok(())
    }

    /// Remove the line for `id`. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: &ProductId) {
        if self.lines.remove(id).is_some() {
            self.notify();
        }
    }

    /// Set the quantity for `id`, clamped to `[1, snapshot stock]`.
    ///
    /// An absent id is a no-op; use [`CartStore::remove`] to drop a line.
    pub fn set_quantity(&mut self, id: &ProductId, quantity: u32) {
        let Some(line) = self.lines.get_mut(id) else {
            return;
        };
        line.quantity = quantity.clamp(1, line.product.stock.max(1));
        self.notify();
    }

    /// Empty the cart unconditionally.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.notify();
    }

    // =========================================================================
    // Derived values
    // =========================================================================

    /// Sum of `price x quantity` over all lines, rounded to 2 decimal
    /// places.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines
            .values()
            .map(CartLine::line_total)
            .sum::<Decimal>()
            .round_dp(2)
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines.values().map(|line| line.quantity).sum()
    }

    /// Iterate the lines in product-id order.
    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn notify(&self) {
        let snapshot: Vec<CartLine> = self.lines.values().cloned().collect();
        for listener in &self.listeners {
            listener(&snapshot);
        }
    }
}
