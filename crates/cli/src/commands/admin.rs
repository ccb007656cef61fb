//! Catalog administration commands.
//!
//! Every subcommand is gated on an authenticated admin session, mirroring
//! the admin-only route guard of the storefront.

use rust_decimal::Decimal;

use tuhogar_core::{Price, ProductId};
use tuhogar_storefront::catalog::{CatalogApi, NewProduct};

use crate::AdminAction;
use crate::context::{CliError, Context};

/// Dispatch an admin subcommand after checking the role gate.
pub async fn run(ctx: &mut Context, action: AdminAction) -> Result<(), CliError> {
    if !ctx.session.is_admin() {
        return Err(CliError::Usage(
            "admin role required - log in with an admin account first".to_string(),
        ));
    }

    match action {
        AdminAction::List => list(ctx).await,
        AdminAction::Create {
            title,
            price,
            description,
            category,
            stock,
            image,
        } => create(ctx, title, &price, description, category, stock, image).await,
        AdminAction::Update {
            id,
            title,
            price,
            description,
            category,
            stock,
            image,
        } => update(ctx, &id, title, price, description, category, stock, image).await,
        AdminAction::Delete { id } => delete(ctx, &id).await,
    }
}

async fn list(ctx: &Context) -> Result<(), CliError> {
    let products = ctx.catalog.list().await?;
    for product in &products {
        println!(
            "{:>6}  {:<40} {:>10}  stock {:>4}  [{}]",
            product.id,
            product.title,
            product.price.to_string(),
            product.stock,
            product.category,
        );
    }
    println!("{} product(s)", products.len());
    Ok(())
}

async fn create(
    ctx: &Context,
    title: String,
    price: &str,
    description: String,
    category: String,
    stock: u32,
    image: Option<String>,
) -> Result<(), CliError> {
    let draft = NewProduct {
        title,
        price: parse_price(price)?,
        description,
        category,
        stock,
        image,
    };

    let product = ctx.catalog.create(draft).await?;
    println!("Created {} with id {}.", product.title, product.id);
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn update(
    ctx: &Context,
    id: &str,
    title: Option<String>,
    price: Option<String>,
    description: Option<String>,
    category: Option<String>,
    stock: Option<u32>,
    image: Option<String>,
) -> Result<(), CliError> {
    let id = ProductId::new(id);
    let mut product = ctx.catalog.get(&id).await?;

    if let Some(title) = title {
        product.title = title;
    }
    if let Some(price) = price {
        product.price = parse_price(&price)?;
    }
    if let Some(description) = description {
        product.description = description;
    }
    if let Some(category) = category {
        product.category = category;
    }
    if let Some(stock) = stock {
        product.stock = stock;
    }
    if let Some(image) = image {
        product.image = image;
    }

    let updated = ctx.catalog.update(&id, &product).await?;
    println!("Updated {} ({}).", updated.title, updated.id);
    Ok(())
}

async fn delete(ctx: &Context, id: &str) -> Result<(), CliError> {
    let id = ProductId::new(id);
    ctx.catalog.delete(&id).await?;
    println!("Deleted {id}.");
    Ok(())
}

fn parse_price(value: &str) -> Result<Price, CliError> {
    let amount: Decimal = value
        .parse()
        .map_err(|_| CliError::Usage(format!("not a valid price: {value}")))?;
    Price::new(amount).map_err(|err| CliError::Usage(err.to_string()))
}
