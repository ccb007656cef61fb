//! Shared command context: config, storage, stores, catalog client.

use std::sync::Arc;

use thiserror::Error;

use tuhogar_storefront::catalog::{CatalogClient, CatalogError};
use tuhogar_storefront::config::{ConfigError, StorefrontConfig};
use tuhogar_storefront::models::CredentialDirectory;
use tuhogar_storefront::storage::{FileStore, StorageError};
use tuhogar_storefront::stores::{AuthError, CartStore, SessionStore};

/// Errors surfaced to the top-level command runner.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Bad arguments or a gate the user has not passed.
    #[error("{0}")]
    Usage(String),
}

/// Everything a command needs, wired once per invocation.
///
/// Construction restores both stores from the state directory before the
/// command runs, and subscribes the cart's persistence listener so every
/// mutation lands on disk before the process exits.
pub struct Context {
    pub cart: CartStore,
    pub session: SessionStore,
    pub catalog: CatalogClient,
}

impl Context {
    /// Load config, open the state directory, and restore the stores.
    ///
    /// # Errors
    ///
    /// Returns [`CliError`] if configuration is missing or the state
    /// directory cannot be opened.
    pub fn bootstrap() -> Result<Self, CliError> {
        let config = StorefrontConfig::from_env()?;

        let storage: Arc<FileStore> = Arc::new(FileStore::open(&config.state_dir)?);

        let mut cart = CartStore::restore(storage.as_ref());
        cart.persist_to(storage.clone());

        let mut session = SessionStore::new(
            CredentialDirectory::seeded(),
            config.session_ttl,
            storage,
        );
        session.restore_on_start();

        let catalog = CatalogClient::new(&config.catalog_url);

        Ok(Self {
            cart,
            session,
            catalog,
        })
    }
}
