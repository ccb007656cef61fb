//! Remote catalog service client and product filtering.
//!
//! # Architecture
//!
//! - The catalog is a plain REST collection (`list`/`get`/`create`/
//!   `update`/`delete`), consumed over `reqwest`
//! - Wire payloads are normalized to the canonical [`Product`] schema at
//!   this boundary - the engine never sees the service's historical field
//!   variants
//! - `list` responses are cached in-memory via `moka` (5 minute TTL);
//!   `get` is always a live read because checkout's stock decrement is a
//!   read-modify-write against it
//!
//! [`Product`]: crate::models::Product

mod client;
mod filter;
mod wire;

pub use client::{CatalogApi, CatalogClient, NewProduct};
pub use filter::{ProductFilter, filter_products};

use thiserror::Error;

use tuhogar_core::ProductId;

/// Errors that can occur when talking to the remote catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status.
    #[error("catalog returned {status} for {url}")]
    Status { status: u16, url: String },

    /// Response body failed to parse or normalize.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// No product with the requested id.
    #[error("product not found: {0}")]
    NotFound(ProductId),
}
