//! Stockroom CLI - warehouse inventory dashboard.
//!
//! # Usage
//!
//! ```bash
//! # List products with derived availability
//! stockroom inventory
//!
//! # Show one product's article breakdown
//! stockroom product p1
//!
//! # Record a sale of two units
//! stockroom sell p1 2
//!
//! # List sales, delete one
//! stockroom sales
//! stockroom remove-sale s1
//! ```
//!
//! # Commands
//!
//! - `inventory` - List products with availability
//! - `articles` - List raw article stock levels
//! - `product` - Show one product's bill-of-materials breakdown
//! - `sales` - List sales with product details
//! - `sell` - Register a sale
//! - `remove-sale` - Delete a sale record
//!
//! The target service is configured via `STOCKROOM_API_BASE_URL`
//! (default `http://localhost:7000`).

#![cfg_attr(not(test), forbid(unsafe_code))]
// This binary's output IS stdout.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

use stockroom_engine::{ApiClient, EngineConfig, InventoryEngine};

mod commands;

#[derive(Parser)]
#[command(name = "stockroom")]
#[command(author, version, about = "Warehouse inventory dashboard")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List products with derived availability
    Inventory,
    /// List raw article stock levels
    Articles,
    /// Show one product's bill-of-materials breakdown
    Product {
        /// Product id
        id: String,
    },
    /// List sales with product details
    Sales,
    /// Register a sale
    Sell {
        /// Product id
        product_id: String,

        /// Units to sell
        quantity: u32,
    },
    /// Delete a sale record
    RemoveSale {
        /// Sale id
        sale_id: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = EngineConfig::from_env()?;
    let engine = InventoryEngine::new(ApiClient::new(&config));

    match cli.command {
        Commands::Inventory => commands::inventory::list_products(&engine).await?,
        Commands::Articles => commands::inventory::list_articles(&engine).await?,
        Commands::Product { id } => commands::inventory::show_product(&engine, &id).await?,
        Commands::Sales => commands::sales::list(&engine).await?,
        Commands::Sell {
            product_id,
            quantity,
        } => commands::sales::sell(&engine, &product_id, quantity).await?,
        Commands::RemoveSale { sale_id } => commands::sales::remove(&engine, &sale_id).await?,
    }
    Ok(())
}
