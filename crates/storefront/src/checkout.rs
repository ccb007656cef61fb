//! Checkout orchestration: stock decrement and cart clearing.
//!
//! Checkout is a best-effort client-side sequence, not a transaction. Each
//! line is a read-modify-write against the live catalog: read the product,
//! subtract the line quantity (flooring at zero), write it back. The engine
//! assumes single-actor access to the catalog during the sequence; there is
//! no compare-and-swap, and concurrent shoppers can oversell.

use tracing::instrument;

use tuhogar_core::ProductId;

use crate::catalog::CatalogApi;
use crate::models::CartLine;
use crate::stores::{CartStore, SessionStore};

/// What happened to one cart line during checkout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineOutcome {
    /// Remote stock was decremented; the line left the cart.
    Committed,
    /// The read or write failed; the line stays in the cart for a retry.
    Failed(String),
    /// A previous line failed before this one was attempted; the line stays
    /// in the cart for a retry.
    NotAttempted,
}

/// Per-line checkout status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineStatus {
    /// Product the line refers to.
    pub product_id: ProductId,
    /// Units that were (or would be) deducted.
    pub quantity: u32,
    /// What happened.
    pub outcome: LineOutcome,
}

/// Overall result of a checkout attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutOutcome {
    /// No authenticated session; neither the cart nor the catalog was
    /// touched.
    RequiresLogin,
    /// Every line committed and the cart was cleared.
    Completed { lines: Vec<LineStatus> },
    /// A line failed. Committed lines left the cart; failed and unattempted
    /// lines remain, so a retry only reprocesses them. Nothing is rolled
    /// back.
    PartialFailure { lines: Vec<LineStatus> },
}

/// Decrement remote stock for every cart line, then clear the cart.
///
/// Requires an authenticated session. Lines are processed in product-id
/// order; the sequence stops issuing updates after the first failure.
/// Committed lines are removed from the cart as they land (persisting via
/// the cart's listeners), which is what makes a retry after
/// [`CheckoutOutcome::PartialFailure`] safe.
#[instrument(skip_all, fields(lines = cart.lines().count()))]
pub async fn checkout<C: CatalogApi>(
    cart: &mut CartStore,
    session: &SessionStore,
    catalog: &C,
) -> CheckoutOutcome {
    if !session.is_authenticated() {
        return CheckoutOutcome::RequiresLogin;
    }

    let lines: Vec<CartLine> = cart.lines().cloned().collect();
    let mut statuses = Vec::with_capacity(lines.len());
    let mut failed = false;

    for line in &lines {
        let outcome = if failed {
            LineOutcome::NotAttempted
        } else {
            commit_line(catalog, line).await
        };

        match &outcome {
            LineOutcome::Committed => cart.remove(&line.product.id),
            LineOutcome::Failed(reason) => {
                tracing::warn!(
                    product_id = %line.product.id,
                    reason,
                    "checkout line failed; stopping"
                );
                failed = true;
            }
            LineOutcome::NotAttempted => {}
        }

        statuses.push(LineStatus {
            product_id: line.product.id.clone(),
            quantity: line.quantity,
            outcome,
        });
    }

    if failed {
        CheckoutOutcome::PartialFailure { lines: statuses }
    } else {
        cart.clear();
        CheckoutOutcome::Completed { lines: statuses }
    }
}

/// Read-modify-write one line's stock against the live catalog.
async fn commit_line<C: CatalogApi>(catalog: &C, line: &CartLine) -> LineOutcome {
    let id = &line.product.id;

    let mut live = match catalog.get(id).await {
        Ok(product) => product,
        Err(err) => return LineOutcome::Failed(err.to_string()),
    };

    live.stock = live.stock.saturating_sub(line.quantity);

    match catalog.update(id, &live).await {
        Ok(_) => LineOutcome::Committed,
        Err(err) => LineOutcome::Failed(err.to_string()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Mutex, PoisonError};

    use chrono::Duration;
    use rust_decimal::{Decimal, dec};
    use tuhogar_core::Price;

    use crate::catalog::{CatalogError, NewProduct};
    use crate::models::{CredentialDirectory, Product, keys};
    use crate::storage::{KeyValueStore, MemoryStore};

    use super::*;

    /// In-memory catalog double with per-id failure switches.
    #[derive(Default)]
    struct FakeCatalog {
        products: Mutex<HashMap<ProductId, Product>>,
        fail_updates: HashSet<ProductId>,
        calls: AtomicU32,
    }

    impl FakeCatalog {
        fn with_products(products: Vec<Product>) -> Self {
            Self {
                products: Mutex::new(
                    products.into_iter().map(|p| (p.id.clone(), p)).collect(),
                ),
                ..Self::default()
            }
        }

        fn stock_of(&self, id: &str) -> u32 {
            let products = self
                .products
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            products.get(&ProductId::new(id)).unwrap().stock
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CatalogApi for FakeCatalog {
        async fn list(&self) -> Result<Vec<Product>, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let products = self
                .products
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            Ok(products.values().cloned().collect())
        }

        async fn get(&self, id: &ProductId) -> Result<Product, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let products = self
                .products
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            products
                .get(id)
                .cloned()
                .ok_or_else(|| CatalogError::NotFound(id.clone()))
        }

        async fn create(&self, _draft: NewProduct) -> Result<Product, CatalogError> {
            unreachable!("checkout never creates products")
        }

        async fn update(
            &self,
            id: &ProductId,
            product: &Product,
        ) -> Result<Product, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_updates.contains(id) {
                return Err(CatalogError::Status {
                    status: 500,
                    url: format!("fake://products/{id}"),
                });
            }
            let mut products = self
                .products
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            products.insert(id.clone(), product.clone());
            Ok(product.clone())
        }

        async fn delete(&self, _id: &ProductId) -> Result<(), CatalogError> {
            unreachable!("checkout never deletes products")
        }
    }

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

    fn logged_in_session() -> SessionStore {
        let mut session = SessionStore::new(
            CredentialDirectory::seeded(),
            Duration::minutes(30),
            Arc::new(MemoryStore::new()),
        );
        session.login("user", "user123").unwrap();
        session
    }

    #[tokio::test]
    async fn test_requires_login() {
        let catalog = FakeCatalog::with_products(vec![product("a", dec!(10), 5)]);
        let session = SessionStore::new(
            CredentialDirectory::seeded(),
            Duration::minutes(30),
            Arc::new(MemoryStore::new()),
        );
        let mut cart = CartStore::new();
        cart.add(&product("a", dec!(10), 5)).unwrap();

        let outcome = checkout(&mut cart, &session, &catalog).await;

        assert_eq!(outcome, CheckoutOutcome::RequiresLogin);
        assert_eq!(cart.count(), 1);
        assert_eq!(catalog.calls(), 0);
    }

    #[tokio::test]
    async fn test_completed_decrements_stock_and_clears_cart() {
        let catalog = FakeCatalog::with_products(vec![
            product("a", dec!(10), 5),
            product("b", dec!(3.50), 2),
        ]);
        let session = logged_in_session();

        let port = Arc::new(MemoryStore::new());
        let mut cart = CartStore::new();
        cart.persist_to(port.clone());
        cart.add(&product("a", dec!(10), 5)).unwrap();
        cart.add(&product("a", dec!(10), 5)).unwrap();
        cart.add(&product("b", dec!(3.50), 2)).unwrap();

        let outcome = checkout(&mut cart, &session, &catalog).await;

        let CheckoutOutcome::Completed { lines } = outcome else {
            panic!("expected Completed, got {outcome:?}");
        };
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.outcome == LineOutcome::Committed));

        assert_eq!(catalog.stock_of("a"), 3);
        assert_eq!(catalog.stock_of("b"), 1);
        assert!(cart.is_empty());
        assert_eq!(port.get(keys::CART).unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_unfinished_lines() {
        let mut catalog = FakeCatalog::with_products(vec![
            product("a", dec!(10), 5),
            product("b", dec!(5), 5),
            product("c", dec!(2), 5),
        ]);
        catalog.fail_updates.insert(ProductId::new("b"));
        let session = logged_in_session();

        let mut cart = CartStore::new();
        cart.add(&product("a", dec!(10), 5)).unwrap();
        cart.add(&product("b", dec!(5), 5)).unwrap();
        cart.add(&product("c", dec!(2), 5)).unwrap();

        let outcome = checkout(&mut cart, &session, &catalog).await;

        let CheckoutOutcome::PartialFailure { lines } = outcome else {
            panic!("expected PartialFailure, got {outcome:?}");
        };
        assert_eq!(lines.len(), 3);
        assert_eq!(lines.first().unwrap().outcome, LineOutcome::Committed);
        assert!(matches!(
            lines.get(1).unwrap().outcome,
            LineOutcome::Failed(_)
        ));
        assert_eq!(lines.get(2).unwrap().outcome, LineOutcome::NotAttempted);

        // Committed line left the cart; failed and unattempted remain.
        let remaining: Vec<String> =
            cart.lines().map(|l| l.product.id.to_string()).collect();
        assert_eq!(remaining, vec!["b".to_string(), "c".to_string()]);

        // "a" was decremented and is not rolled back; "c" was never touched.
        assert_eq!(catalog.stock_of("a"), 4);
        assert_eq!(catalog.stock_of("c"), 5);
    }

    #[tokio::test]
    async fn test_oversold_line_floors_remote_stock_at_zero() {
        // Live stock fell below the snapshot between add and checkout.
        let catalog = FakeCatalog::with_products(vec![product("a", dec!(10), 3)]);
        let session = logged_in_session();

        let mut cart = CartStore::new();
        let snapshot = product("a", dec!(10), 5);
        for _ in 0..5 {
            cart.add(&snapshot).unwrap();
        }

        let outcome = checkout(&mut cart, &session, &catalog).await;

        assert!(matches!(outcome, CheckoutOutcome::Completed { .. }));
        assert_eq!(catalog.stock_of("a"), 0);
    }

    #[tokio::test]
    async fn test_empty_cart_completes_with_no_lines() {
        let catalog = FakeCatalog::default();
        let session = logged_in_session();
        let mut cart = CartStore::new();

        let outcome = checkout(&mut cart, &session, &catalog).await;

        assert_eq!(outcome, CheckoutOutcome::Completed { lines: vec![] });
        assert_eq!(catalog.calls(), 0);
    }
}
