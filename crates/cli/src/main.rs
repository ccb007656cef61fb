//! Tuhogar CLI - the storefront client surface.
//!
//! Each invocation is one process start: engine state is restored from the
//! state directory, the command runs, and every mutation persists before
//! the process exits. The cart and session therefore survive between
//! commands exactly as they survive page reloads in a browser.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! tuhogar browse --in-stock --search chair
//!
//! # Build a cart
//! tuhogar cart add 3
//! tuhogar cart set-qty 3 2
//! tuhogar cart show
//!
//! # Authenticate and check out
//! tuhogar login user user123
//! tuhogar checkout
//!
//! # Administer the catalog (admin role required)
//! tuhogar login admin admin123
//! tuhogar admin create --title "Oak Table" --price 129.99 \
//!     --description "Solid oak" --category furniture --stock 4
//! ```
//!
//! # Environment Variables
//!
//! - `TUHOGAR_CATALOG_URL` - Base URL of the remote catalog service
//! - `TUHOGAR_STATE_DIR` - Directory for persisted state (default: `.tuhogar`)
//! - `TUHOGAR_SESSION_TTL_SECS` - Session lifetime (default: 1800)

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;
mod context;

use context::Context;

#[derive(Parser)]
#[command(name = "tuhogar")]
#[command(author, version, about = "Tuhogar storefront client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the catalog with optional filters
    Browse {
        /// Only show products with stock
        #[arg(long)]
        in_stock: bool,

        /// Exact category to keep
        #[arg(long)]
        category: Option<String>,

        /// Free-text search over title, description, and category
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one product in full
    Product {
        /// Product id
        id: String,
    },
    /// Inspect or mutate the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Log in as a directory user
    Login {
        /// Username
        username: String,
        /// Password
        password: String,
    },
    /// Log out and clear the persisted session
    Logout,
    /// Show the current session
    Whoami,
    /// Decrement remote stock for every cart line and clear the cart
    Checkout,
    /// Administer the remote catalog (admin role required)
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines with subtotals
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: String,
    },
    /// Remove a product's line entirely
    Remove {
        /// Product id
        id: String,
    },
    /// Set a line's quantity (clamped to available stock)
    SetQty {
        /// Product id
        id: String,
        /// New quantity
        quantity: u32,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum AdminAction {
    /// List every product, including out-of-stock ones
    List,
    /// Create a product
    Create {
        /// Display name
        #[arg(long)]
        title: String,

        /// Unit price, e.g. 129.99
        #[arg(long)]
        price: String,

        /// Long-form description
        #[arg(long)]
        description: String,

        /// Category label
        #[arg(long)]
        category: String,

        /// Units in stock
        #[arg(long, default_value_t = 0)]
        stock: u32,

        /// Image URL (a category placeholder is assigned if omitted)
        #[arg(long)]
        image: Option<String>,
    },
    /// Update fields of an existing product
    Update {
        /// Product id
        id: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        price: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        stock: Option<u32>,

        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a product
    Delete {
        /// Product id
        id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), context::CliError> {
    let mut ctx = Context::bootstrap()?;

    match cli.command {
        Commands::Browse {
            in_stock,
            category,
            search,
        } => commands::browse::list(&ctx, in_stock, category, search).await?,
        Commands::Product { id } => commands::browse::show(&ctx, &id).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx),
            CartAction::Add { id } => commands::cart::add(&mut ctx, &id).await?,
            CartAction::Remove { id } => commands::cart::remove(&mut ctx, &id),
            CartAction::SetQty { id, quantity } => {
                commands::cart::set_quantity(&mut ctx, &id, quantity);
            }
            CartAction::Clear => commands::cart::clear(&mut ctx),
        },
        Commands::Login { username, password } => {
            commands::auth::login(&mut ctx, &username, &password)?;
        }
        Commands::Logout => commands::auth::logout(&mut ctx),
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Checkout => commands::checkout::run(&mut ctx).await,
        Commands::Admin { action } => commands::admin::run(&mut ctx, action).await?,
    }

    Ok(())
}
