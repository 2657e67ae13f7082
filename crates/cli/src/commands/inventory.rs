//! Inventory listing commands.

use std::error::Error;

use stockroom_core::ProductId;
use stockroom_engine::{ApiClient, InventoryEngine};

/// Refresh and print all products with derived availability.
pub async fn list_products(engine: &InventoryEngine<ApiClient>) -> Result<(), Box<dyn Error>> {
    engine.refresh_inventory().await?;
    let state = engine.snapshot().await;

    println!("{:<28} {:<10} {:>10}  {}", "PRODUCT", "ID", "SELLABLE", "STATUS");
    for product in &state.products {
        println!(
            "{:<28} {:<10} {:>10}  {}",
            product.name(),
            product.id(),
            product.max_available_quantity,
            if product.is_available {
                "available"
            } else {
                "out of stock"
            }
        );
    }
    Ok(())
}

/// Refresh and print raw article stock levels.
pub async fn list_articles(engine: &InventoryEngine<ApiClient>) -> Result<(), Box<dyn Error>> {
    engine.refresh_inventory().await?;
    let state = engine.snapshot().await;

    println!("{:<28} {:<10} {:>8}", "ARTICLE", "ID", "IN STOCK");
    for article in &state.articles {
        println!(
            "{:<28} {:<10} {:>8}",
            article.name, article.id, article.amount_in_stock
        );
    }
    Ok(())
}

/// Refresh and print one product's bill-of-materials breakdown.
pub async fn show_product(
    engine: &InventoryEngine<ApiClient>,
    id: &str,
) -> Result<(), Box<dyn Error>> {
    engine.refresh_inventory().await?;
    let state = engine.snapshot().await;

    let product_id = ProductId::new(id);
    let Some(product) = state.products.iter().find(|p| *p.id() == product_id) else {
        return Err(format!("Product not found: {id}").into());
    };

    println!(
        "{} ({}) - sellable: {}",
        product.name(),
        product.id(),
        product.max_available_quantity
    );
    println!();
    println!("{:<28} {:>12} {:>10}", "ARTICLE", "PER UNIT", "IN STOCK");
    for line in engine.product_article_details(&product.product).await {
        println!(
            "{:<28} {:>12} {:>10}",
            line.name, line.amount_required, line.amount_in_stock
        );
    }
    Ok(())
}
