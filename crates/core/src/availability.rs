//! Pure derivation of sellable quantities from article stock.
//!
//! All functions here are pure: same inputs, same outputs, no I/O and no
//! hidden state. The engine recomputes them on every inventory refresh so
//! products, articles, and availability stay mutually consistent with the
//! last successful fetch.

use crate::types::{Article, ArticleWithDetails, Product, ProductArticle, ProductWithStock};

/// Largest quantity of `product` sellable given the current stock in
/// `articles`.
///
/// The result is the minimum over all bill-of-materials lines of
/// `floor(amount_in_stock / amount_required)`. A product with no lines is
/// never sellable, and a line referencing an article absent from
/// `articles` pins the result to zero.
#[must_use]
pub fn max_available_quantity(product: &Product, articles: &[Article]) -> u32 {
    product
        .articles
        .iter()
        .map(|line| units_buildable(line, articles))
        .min()
        .unwrap_or(0)
}

/// How many products one bill-of-materials line permits.
fn units_buildable(line: &ProductArticle, articles: &[Article]) -> u32 {
    let Some(article) = articles.iter().find(|a| a.id == line.id) else {
        return 0;
    };
    // A malformed zero-required line places no bound.
    article
        .amount_in_stock
        .checked_div(line.amount_required)
        .unwrap_or(u32::MAX)
}

/// Enrich every product with its derived availability facts.
///
/// Pure map over `products`; calling it twice with the same inputs yields
/// identical output.
#[must_use]
pub fn enrich_products(products: Vec<Product>, articles: &[Article]) -> Vec<ProductWithStock> {
    products
        .into_iter()
        .map(|product| {
            let max_available_quantity = max_available_quantity(&product, articles);
            ProductWithStock {
                product,
                max_available_quantity,
                is_available: max_available_quantity > 0,
            }
        })
        .collect()
}

/// Join a product's bill of materials against the loaded article set.
///
/// Lines whose article id is not found are silently dropped - this is a
/// display-only join and is never used for the availability derivation.
#[must_use]
pub fn article_details(product: &Product, articles: &[Article]) -> Vec<ArticleWithDetails> {
    product
        .articles
        .iter()
        .filter_map(|line| {
            let article = articles.iter().find(|a| a.id == line.id)?;
            Some(ArticleWithDetails {
                id: line.id.clone(),
                amount_required: line.amount_required,
                name: article.name.clone(),
                amount_in_stock: article.amount_in_stock,
            })
        })
        .collect()
}
