//! Pure product filtering pipeline.
//!
//! Recomputed from scratch on every input change: no counters, no state,
//! same inputs always produce the same output.

use crate::models::Product;

/// Narrowing criteria for a product list.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Drop products with no stock.
    pub in_stock_only: bool,
    /// Keep only this exact category (case-sensitive).
    pub category: Option<String>,
    /// Case-insensitive substring over title, description, and category.
    pub search_term: Option<String>,
}

/// Apply the stock, category, and search stages in order, each narrowing
/// the previous stage's output.
#[must_use]
pub fn filter_products(products: &[Product], filter: &ProductFilter) -> Vec<Product> {
    let needle = filter
        .search_term
        .as_deref()
        .map(str::to_lowercase)
        .filter(|term| !term.is_empty());

    products
        .iter()
        .filter(|p| !filter.in_stock_only || p.stock > 0)
        .filter(|p| filter.category.as_deref().is_none_or(|c| p.category == c))
        .filter(|p| needle.as_deref().is_none_or(|term| matches_term(p, term)))
        .cloned()
        .collect()
}

fn matches_term(product: &Product, needle: &str) -> bool {
    product.title.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product.category.to_lowercase().contains(needle)
}
