//! REST client for the remote catalog service.
//!
//! The service is a plain resource collection: `GET /products`,
//! `GET /products/{id}`, `POST /products`, `PUT /products/{id}`,
//! `DELETE /products/{id}`.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, instrument};
use url::Url;

use tuhogar_core::{Price, ProductId};

use crate::catalog::CatalogError;
use crate::catalog::wire::ProductPayload;
use crate::models::Product;

/// Cache key for the product list (the only cached read).
const LIST_KEY: &str = "products";

/// A product to be created in the remote catalog.
///
/// The catalog assigns the id. A draft without an image gets a placeholder
/// keyed by category, preserved from the legacy admin form.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    pub title: String,
    pub price: Price,
    pub description: String,
    pub category: String,
    pub stock: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Read/write surface of the remote catalog.
///
/// [`CatalogClient`] implements this against the live service; tests inject
/// in-memory fakes so store and checkout logic runs without a network.
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    /// Fetch the full product list.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the request or parse fails.
    async fn list(&self) -> Result<Vec<Product>, CatalogError>;

    /// Fetch one product by id. Always a live read.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the id is unknown.
    async fn get(&self, id: &ProductId) -> Result<Product, CatalogError>;

    /// Create a product; the service assigns the id.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the request or parse fails.
    async fn create(&self, draft: NewProduct) -> Result<Product, CatalogError>;

    /// Replace the product stored under `id` with `product`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the id is unknown.
    async fn update(&self, id: &ProductId, product: &Product) -> Result<Product, CatalogError>;

    /// Delete the product stored under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] if the id is unknown.
    async fn delete(&self, id: &ProductId) -> Result<(), CatalogError>;
}

/// Client for the remote catalog service.
///
/// List responses are cached for 5 minutes; every mutation invalidates the
/// cached list. `get` bypasses the cache so checkout's read-modify-write
/// observes live stock.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    endpoint: String,
    cache: Cache<String, Vec<Product>>,
}

impl CatalogClient {
    /// Create a new catalog client for the given service base URL.
    #[must_use]
    pub fn new(base_url: &Url) -> Self {
        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let endpoint = format!("{}/products", base_url.as_str().trim_end_matches('/'));

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                endpoint,
                cache,
            }),
        }
    }

    fn product_url(&self, id: &ProductId) -> String {
        format!("{}/{}", self.inner.endpoint, id)
    }

    /// Execute a request and return the response body.
    ///
    /// `missing` is returned for a 404 so callers can map it to the id they
    /// asked about.
    async fn execute(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
        missing: Option<&ProductId>,
    ) -> Result<String, CatalogError> {
        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND
            && let Some(id) = missing
        {
            return Err(CatalogError::NotFound(id.clone()));
        }

        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                status = %status,
                url,
                body = %body.chars().take(200).collect::<String>(),
                "catalog returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(body)
    }

    async fn fetch_list(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.inner.endpoint.clone();
        let body = self
            .execute(self.inner.client.get(&url), &url, None)
            .await?;
        let payloads: Vec<ProductPayload> = serde_json::from_str(&body)?;
        Ok(payloads.into_iter().map(ProductPayload::into_product).collect())
    }
}

impl CatalogApi for CatalogClient {
    #[instrument(skip(self))]
    async fn list(&self) -> Result<Vec<Product>, CatalogError> {
        if let Some(products) = self.inner.cache.get(LIST_KEY).await {
            debug!("serving product list from cache");
            return Ok(products);
        }

        let products = self.fetch_list().await?;
        self.inner
            .cache
            .insert(LIST_KEY.to_owned(), products.clone())
            .await;
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn get(&self, id: &ProductId) -> Result<Product, CatalogError> {
        let url = self.product_url(id);
        let body = self
            .execute(self.inner.client.get(&url), &url, Some(id))
            .await?;
        let payload: ProductPayload = serde_json::from_str(&body)?;
        Ok(payload.into_product())
    }

    #[instrument(skip(self, draft), fields(title = %draft.title))]
    async fn create(&self, draft: NewProduct) -> Result<Product, CatalogError> {
        let image = draft
            .image
            .clone()
            .unwrap_or_else(|| placeholder_image(&draft.category));
        let body = json!({
            "title": draft.title,
            "price": draft.price,
            "description": draft.description,
            "category": draft.category,
            "stock": draft.stock,
            "image": image,
        });

        let url = self.inner.endpoint.clone();
        let body = self
            .execute(self.inner.client.post(&url).json(&body), &url, None)
            .await?;
        let payload: ProductPayload = serde_json::from_str(&body)?;

        self.inner.cache.invalidate(LIST_KEY).await;
        Ok(payload.into_product())
    }

    #[instrument(skip(self, product))]
    async fn update(&self, id: &ProductId, product: &Product) -> Result<Product, CatalogError> {
        let url = self.product_url(id);
        let body = self
            .execute(self.inner.client.put(&url).json(product), &url, Some(id))
            .await?;
        let payload: ProductPayload = serde_json::from_str(&body)?;

        self.inner.cache.invalidate(LIST_KEY).await;
        Ok(payload.into_product())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: &ProductId) -> Result<(), CatalogError> {
        let url = self.product_url(id);
        self.execute(self.inner.client.delete(&url), &url, Some(id))
            .await?;

        self.inner.cache.invalidate(LIST_KEY).await;
        Ok(())
    }
}

/// Placeholder image for drafts created without one, keyed by category.
fn placeholder_image(category: &str) -> String {
    let topic = match category {
        "men's clothing" => "clothing,man",
        "women's clothing" => "clothing,woman",
        "electronics" => "electronics,gadget",
        "jewelery" => "jewelery",
        _ => "product",
    };
    let seed: u16 = rand::random_range(0..1000);
    format!("https://loremflickr.com/320/240/{topic}?random={seed}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let base: Url = "https://catalog.example/tuhogar/".parse().unwrap();
        let client = CatalogClient::new(&base);
        assert_eq!(
            client.inner.endpoint,
            "https://catalog.example/tuhogar/products"
        );
        assert_eq!(
            client.product_url(&ProductId::new("7")),
            "https://catalog.example/tuhogar/products/7"
        );
    }

    #[test]
    fn test_placeholder_image_by_category() {
        assert!(placeholder_image("electronics").contains("/electronics,gadget?"));
        assert!(placeholder_image("jewelery").contains("/jewelery?"));
        assert!(placeholder_image("garden").contains("/product?"));
    }
}
