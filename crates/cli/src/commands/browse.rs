//! Catalog browsing commands.

use tuhogar_core::ProductId;
use tuhogar_storefront::catalog::{CatalogApi, ProductFilter, filter_products};
use tuhogar_storefront::models::Product;

use crate::context::{CliError, Context};

/// List catalog products, narrowed by the given filters.
pub async fn list(
    ctx: &Context,
    in_stock: bool,
    category: Option<String>,
    search: Option<String>,
) -> Result<(), CliError> {
    let products = ctx.catalog.list().await?;
    let filter = ProductFilter {
        in_stock_only: in_stock,
        category,
        search_term: search,
    };
    let filtered = filter_products(&products, &filter);

    if filtered.is_empty() {
        println!("No products match.");
        return Ok(());
    }

    for product in &filtered {
        println!(
            "{:>6}  {:<40} {:>10}  stock {:>4}  [{}]",
            product.id,
            product.title,
            product.price.to_string(),
            product.stock,
            product.category,
        );
    }
    println!("{} product(s)", filtered.len());
    Ok(())
}

/// Show one product in full.
pub async fn show(ctx: &Context, id: &str) -> Result<(), CliError> {
    let product = ctx.catalog.get(&ProductId::new(id)).await?;
    print_product(&product);
    Ok(())
}

fn print_product(product: &Product) {
    println!("{}", product.title);
    println!("  id:          {}", product.id);
    println!("  price:       {}", product.price);
    println!("  category:    {}", product.category);
    println!("  stock:       {}", product.stock);
    println!("  image:       {}", product.image);
    println!("  description: {}", product.description);
}
