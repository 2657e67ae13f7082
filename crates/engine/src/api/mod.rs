//! Typed HTTP access to the external inventory service.
//!
//! # Architecture
//!
//! - One operation per resource action (articles, products, sales)
//! - Every transport failure is normalized into [`ApiError`] - operations
//!   never return a partially-filled or sentinel success value
//! - Transient failures are retried with a fixed inter-attempt delay; the
//!   policy applies uniformly to reads and writes (see [`RetryPolicy`])
//!
//! The [`InventoryApi`] trait is the seam between the engine and the
//! transport: [`ApiClient`] implements it over `reqwest`, and tests
//! substitute in-memory fakes.

mod client;
mod error;

pub use client::{ApiClient, RetryPolicy};
pub use error::ApiError;

use stockroom_core::{
    Article, ArticleId, ArticlePatch, ArticleStockUpdate, Product, ProductId, Sale, SaleId,
};

/// Operations the inventory service exposes.
///
/// Implemented by [`ApiClient`] for real HTTP access and by in-memory
/// fakes in engine tests.
#[allow(async_fn_in_trait)]
pub trait InventoryApi {
    /// Fetch all articles.
    async fn list_articles(&self) -> Result<Vec<Article>, ApiError>;

    /// Fetch a single article by id.
    async fn get_article(&self, id: &ArticleId) -> Result<Article, ApiError>;

    /// Apply a partial update to a single article.
    async fn update_article(
        &self,
        id: &ArticleId,
        patch: &ArticlePatch,
    ) -> Result<Article, ApiError>;

    /// Apply stock deltas to multiple articles in one request.
    async fn bulk_update_articles(
        &self,
        updates: &[ArticleStockUpdate],
    ) -> Result<Vec<Article>, ApiError>;

    /// Fetch all products.
    async fn list_products(&self) -> Result<Vec<Product>, ApiError>;

    /// Fetch a single product by id.
    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError>;

    /// Fetch all sales.
    async fn list_sales(&self) -> Result<Vec<Sale>, ApiError>;

    /// Fetch a single sale by id.
    ///
    /// The reference service answers this route with an array; the quirk
    /// is preserved rather than flattened.
    async fn get_sale(&self, id: &SaleId) -> Result<Vec<Sale>, ApiError>;

    /// Record a new sale of `amount_sold` units of a product.
    async fn create_sale(
        &self,
        product_id: &ProductId,
        amount_sold: u32,
    ) -> Result<Sale, ApiError>;

    /// Delete a sale record.
    async fn delete_sale(&self, id: &SaleId) -> Result<(), ApiError>;
}
