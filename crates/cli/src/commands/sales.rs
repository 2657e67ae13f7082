//! Sale commands.

use std::error::Error;

use stockroom_core::{ProductId, SaleId};
use stockroom_engine::{ApiClient, InventoryEngine};

/// Fetch and print all sales joined with their products.
pub async fn list(engine: &InventoryEngine<ApiClient>) -> Result<(), Box<dyn Error>> {
    let sales = engine.fetch_sales().await?;

    if sales.is_empty() {
        println!("No sales recorded.");
        return Ok(());
    }

    println!("{:<12} {:<18} {:<28} {:>6}", "SALE", "DATE", "PRODUCT", "UNITS");
    for entry in &sales {
        println!(
            "{:<12} {:<18} {:<28} {:>6}",
            entry.sale.id,
            entry.sale.created_at.format("%Y-%m-%d %H:%M"),
            entry.product.name,
            entry.sale.amount_sold
        );
    }
    Ok(())
}

/// Register a sale and report the refreshed availability.
pub async fn sell(
    engine: &InventoryEngine<ApiClient>,
    product_id: &str,
    quantity: u32,
) -> Result<(), Box<dyn Error>> {
    // The engine validates against loaded state, so load first.
    engine.refresh_inventory().await?;

    let product_id = ProductId::new(product_id);
    let sale = engine.register_sale(&product_id, quantity).await?;
    println!("Recorded sale {} ({} units).", sale.id, sale.amount_sold);

    let state = engine.snapshot().await;
    if let Some(product) = state.products.iter().find(|p| *p.id() == product_id) {
        println!(
            "{} now sellable: {}",
            product.name(),
            product.max_available_quantity
        );
    }
    Ok(())
}

/// Delete a sale record and report the remaining count.
pub async fn remove(
    engine: &InventoryEngine<ApiClient>,
    sale_id: &str,
) -> Result<(), Box<dyn Error>> {
    engine.remove_sale(&SaleId::new(sale_id)).await?;
    println!("Deleted sale {sale_id}.");

    // Stock consumed by the sale is not restored; re-fetch to show the
    // authoritative list.
    let remaining = engine.fetch_sales().await?;
    println!("{} sale(s) remaining.", remaining.len());
    Ok(())
}
