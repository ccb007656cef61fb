//! Cart commands.

use tuhogar_core::ProductId;
use tuhogar_storefront::catalog::CatalogApi;
use tuhogar_storefront::stores::CartError;

use crate::context::{CliError, Context};

/// Print the cart with per-line subtotals and the running total.
pub fn show(ctx: &Context) {
    if ctx.cart.is_empty() {
        println!("Your cart is empty.");
        return;
    }

    for line in ctx.cart.lines() {
        println!(
            "{:>6}  {:<40} {:>10} x {:<3} = {:>10.2}",
            line.product.id,
            line.product.title,
            line.product.price.to_string(),
            line.quantity,
            line.line_total(),
        );
    }
    println!(
        "Total: ${:.2} ({} item(s))",
        ctx.cart.total(),
        ctx.cart.count()
    );
}

/// Fetch the live product and add one unit of it to the cart.
pub async fn add(ctx: &mut Context, id: &str) -> Result<(), CliError> {
    let product = ctx.catalog.get(&ProductId::new(id)).await?;

    match ctx.cart.add(&product) {
        Ok(()) => {
            println!("Added {} to the cart.", product.title);
        }
        Err(CartError::StockExceeded { available, .. }) => {
            println!(
                "Not enough stock: only {available} unit(s) of {} available.",
                product.title
            );
        }
    }
    Ok(())
}

/// Drop a product's line from the cart.
pub fn remove(ctx: &mut Context, id: &str) {
    ctx.cart.remove(&ProductId::new(id));
    println!("Removed {id} from the cart.");
}

/// Set a line's quantity; the store clamps to the snapshot stock.
pub fn set_quantity(ctx: &mut Context, id: &str, quantity: u32) {
    let id = ProductId::new(id);
    ctx.cart.set_quantity(&id, quantity);

    match ctx.cart.lines().find(|line| line.product.id == id) {
        Some(line) => println!("{} now at quantity {}.", line.product.title, line.quantity),
        None => println!("No cart line for {id}."),
    }
}

/// Empty the cart.
pub fn clear(ctx: &mut Context) {
    ctx.cart.clear();
    println!("Cart cleared.");
}
