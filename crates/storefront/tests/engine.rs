//! End-to-end engine flows: restore, shop, authenticate, check out.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::Duration;
use rust_decimal::dec;

use tuhogar_core::{Price, ProductId};
use tuhogar_storefront::catalog::{CatalogApi, CatalogError, NewProduct};
use tuhogar_storefront::checkout::{CheckoutOutcome, checkout};
use tuhogar_storefront::models::{CredentialDirectory, Product, keys};
use tuhogar_storefront::storage::{FileStore, KeyValueStore};
use tuhogar_storefront::stores::{CartStore, SessionStore};

/// Minimal in-memory catalog for driving checkout.
#[derive(Default)]
struct FakeCatalog {
    products: Mutex<HashMap<ProductId, Product>>,
}

impl FakeCatalog {
    fn with_products(products: Vec<Product>) -> Self {
        Self {
            products: Mutex::new(products.into_iter().map(|p| (p.id.clone(), p)).collect()),
        }
    }

    fn stock_of(&self, id: &str) -> u32 {
        let products = self.products.lock().unwrap_or_else(PoisonError::into_inner);
        products
            .get(&ProductId::new(id))
            .expect("product exists")
            .stock
    }
}

impl CatalogApi for FakeCatalog {
    async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        let products = self.products.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(products.values().cloned().collect())
    }

    async fn get(&self, id: &ProductId) -> Result<Product, CatalogError> {
        let products = self.products.lock().unwrap_or_else(PoisonError::into_inner);
        products
            .get(id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }

    async fn create(&self, draft: NewProduct) -> Result<Product, CatalogError> {
        let mut products = self.products.lock().unwrap_or_else(PoisonError::into_inner);
        let id = ProductId::new((products.len() + 1).to_string());
        let product = Product {
            id: id.clone(),
            title: draft.title,
            price: draft.price,
            description: draft.description,
            category: draft.category,
            stock: draft.stock,
            image: draft.image.unwrap_or_default(),
        };
        products.insert(id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: &ProductId, product: &Product) -> Result<Product, CatalogError> {
        let mut products = self.products.lock().unwrap_or_else(PoisonError::into_inner);
        if !products.contains_key(id) {
            return Err(CatalogError::NotFound(id.clone()));
        }
        products.insert(id.clone(), product.clone());
        Ok(product.clone())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), CatalogError> {
        let mut products = self.products.lock().unwrap_or_else(PoisonError::into_inner);
        products
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| CatalogError::NotFound(id.clone()))
    }
}

fn product(id: &str, price: rust_decimal::Decimal, stock: u32) -> Product {
    Product {
        id: ProductId::new(id),
        title: format!("Product {id}"),
        price: Price::new(price).expect("non-negative"),
        description: String::new(),
        category: "furniture".to_string(),
        stock,
        image: String::new(),
    }
}

/// The cart built in one "process" is visible after a restart, and a
/// completed checkout leaves an empty cart on disk.
#[tokio::test]
async fn cart_survives_restart_and_checkout_clears_it() {
    let state_dir = tempfile::tempdir().expect("tempdir");
    let catalog = FakeCatalog::with_products(vec![
        product("a", dec!(10.00), 5),
        product("b", dec!(3.50), 2),
    ]);

    // First process: shop, then exit.
    {
        let storage = Arc::new(FileStore::open(state_dir.path()).expect("open state dir"));
        let mut cart = CartStore::restore(storage.as_ref());
        cart.persist_to(storage);

        let a = catalog.get(&ProductId::new("a")).await.expect("get a");
        let b = catalog.get(&ProductId::new("b")).await.expect("get b");
        cart.add(&a).expect("add a");
        cart.add(&a).expect("add a again");
        cart.add(&b).expect("add b");
        assert_eq!(cart.total(), dec!(23.50));
    }

    // Second process: restore, log in, check out.
    let storage = Arc::new(FileStore::open(state_dir.path()).expect("reopen state dir"));
    let mut cart = CartStore::restore(storage.as_ref());
    cart.persist_to(storage.clone());
    assert_eq!(cart.count(), 3);
    assert_eq!(cart.total(), dec!(23.50));

    let mut session = SessionStore::new(
        CredentialDirectory::seeded(),
        Duration::minutes(30),
        storage.clone(),
    );
    session.restore_on_start();
    assert!(!session.is_authenticated());
    session.login("user", "user123").expect("login");

    let outcome = checkout(&mut cart, &session, &catalog).await;
    assert!(matches!(outcome, CheckoutOutcome::Completed { .. }));

    assert_eq!(catalog.stock_of("a"), 3);
    assert_eq!(catalog.stock_of("b"), 1);
    assert!(cart.is_empty());
    assert_eq!(storage.get(keys::CART).expect("read cart").as_deref(), Some("[]"));
}

/// A session persisted in one "process" gates checkout in the next, and an
/// expired one does not.
#[tokio::test]
async fn session_survives_restart_until_expiry() {
    let state_dir = tempfile::tempdir().expect("tempdir");
    let storage = Arc::new(FileStore::open(state_dir.path()).expect("open state dir"));

    {
        let mut session = SessionStore::new(
            CredentialDirectory::seeded(),
            Duration::minutes(30),
            storage.clone(),
        );
        session.login("admin", "admin123").expect("login");
    }

    let mut restored = SessionStore::new(
        CredentialDirectory::seeded(),
        Duration::minutes(30),
        storage.clone(),
    );
    restored.restore_on_start();
    assert!(restored.is_admin());

    // Force the persisted expiry into the past and restart again.
    let expired = (chrono::Utc::now() - Duration::seconds(1)).timestamp_millis();
    storage
        .set(keys::SESSION_EXPIRES_AT, &expired.to_string())
        .expect("rewrite expiry");

    let mut expired_store = SessionStore::new(
        CredentialDirectory::seeded(),
        Duration::minutes(30),
        storage.clone(),
    );
    expired_store.restore_on_start();
    assert!(!expired_store.is_authenticated());
    assert_eq!(storage.get(keys::SESSION_TOKEN).expect("read token"), None);
}
