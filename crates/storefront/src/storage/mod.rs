//! Durable key-value persistence port.
//!
//! The engine persists its state as named string blobs: the cart under one
//! key, the session under three. Stores write synchronously after every
//! mutation and read exactly once at startup, so a backend only needs
//! `get`/`set`/`remove` with read-your-writes visibility.
//!
//! [`FileStore`] is the production backend (one file per key, survives
//! process restarts); [`MemoryStore`] backs tests.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors raised by a persistence backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("storage I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Durable get/set/remove of named string blobs.
///
/// Implementations must make a completed `set` visible to an immediate
/// `get` and to a process restart; the write finishes before the call
/// returns.
pub trait KeyValueStore {
    /// Read the blob stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous blob.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the write does not complete.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove the blob under `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
