//! Stateful inventory orchestration.
//!
//! The engine owns the session's [`InventoryState`] and runs the
//! multi-step operations against the inventory service: refreshing the
//! product/article snapshot, registering sales, and deleting them. All
//! mutation paths end by re-fetching rather than patching state in place,
//! so the derived availability can never drift from the service's
//! authoritative records.

mod state;

pub use state::{InventoryState, LoadPhase};

use std::sync::Arc;

use futures::future::try_join_all;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::instrument;

use stockroom_core::{
    ArticleStockUpdate, ArticleWithDetails, Product, ProductId, Sale, SaleId, SaleWithProduct,
    article_details, enrich_products,
};

use crate::api::{ApiError, InventoryApi};

/// Errors from engine operations.
///
/// The first two variants are local validation failures raised before any
/// network call; `Api` wraps a normalized service failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The product id is not in the currently loaded inventory.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The requested quantity exceeds the derived availability.
    ///
    /// This pre-check runs against possibly-stale client state; the
    /// service remains the final authority and its own rejection arrives
    /// as [`EngineError::Api`] instead.
    #[error("Insufficient stock: requested {requested}, available {available}")]
    InsufficientStock {
        /// Quantity the caller asked for.
        requested: u32,
        /// Largest quantity the loaded state permits.
        available: u32,
    },

    /// The inventory service rejected or never received a request.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// The inventory engine.
///
/// Cheaply cloneable; all clones share one state object behind a
/// single-writer lock. The lock is never held across a network await, so
/// suspension points interleave exactly like the cooperative model the
/// service contract assumes.
#[derive(Clone)]
pub struct InventoryEngine<A> {
    inner: Arc<EngineInner<A>>,
}

struct EngineInner<A> {
    api: A,
    state: RwLock<InventoryState>,
}

impl<A: InventoryApi> InventoryEngine<A> {
    /// Create a detached engine with nothing loaded.
    ///
    /// Call [`refresh_inventory`](Self::refresh_inventory) once after
    /// construction; the same call serves manual retry after a failure.
    #[must_use]
    pub fn new(api: A) -> Self {
        Self {
            inner: Arc::new(EngineInner {
                api,
                state: RwLock::new(InventoryState::detached()),
            }),
        }
    }

    /// An owned copy of the current state, for rendering.
    pub async fn snapshot(&self) -> InventoryState {
        self.inner.state.read().await.clone()
    }

    /// Re-fetch articles and products and replace the state wholesale.
    ///
    /// The two fetches run concurrently and both must succeed; there is
    /// no partial refresh. On failure the previously loaded data is kept
    /// and only the phase moves to [`LoadPhase::Failed`].
    ///
    /// # Errors
    ///
    /// Returns the normalized service error, which is also stored in the
    /// state for consumers that render from snapshots.
    #[instrument(skip(self))]
    pub async fn refresh_inventory(&self) -> Result<(), ApiError> {
        self.inner.state.write().await.phase = LoadPhase::Loading;

        match tokio::try_join!(self.inner.api.list_articles(), self.inner.api.list_products()) {
            Ok((articles, products)) => {
                let products = enrich_products(products, &articles);
                tracing::debug!(
                    products = products.len(),
                    articles = articles.len(),
                    "inventory refreshed"
                );
                *self.inner.state.write().await = InventoryState {
                    products,
                    articles,
                    phase: LoadPhase::Ready,
                };
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "inventory refresh failed, keeping last good data");
                self.inner.state.write().await.phase = LoadPhase::Failed(err.clone());
                Err(err)
            }
        }
    }

    /// Register a sale of `quantity` units of a product.
    ///
    /// Resolves and validates against the loaded state first - both
    /// checks fail without touching the network. Then creates the sale
    /// record, applies the per-article stock decrements in one bulk call,
    /// and refreshes the inventory.
    ///
    /// A sale created in step three is not rolled back if the stock
    /// update afterwards fails; the service keeps the orphaned record.
    ///
    /// # Errors
    ///
    /// [`EngineError::ProductNotFound`] or
    /// [`EngineError::InsufficientStock`] before any network call;
    /// [`EngineError::Api`] if the service rejects the sale or the stock
    /// update. A failure of the final resync does not fail the sale - it
    /// is stored in the state phase like any other refresh failure.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn register_sale(
        &self,
        product_id: &ProductId,
        quantity: u32,
    ) -> Result<Sale, EngineError> {
        let product = {
            let state = self.inner.state.read().await;
            let enriched = state
                .products
                .iter()
                .find(|p| p.id() == product_id)
                .ok_or_else(|| EngineError::ProductNotFound(product_id.clone()))?;

            if quantity > enriched.max_available_quantity {
                return Err(EngineError::InsufficientStock {
                    requested: quantity,
                    available: enriched.max_available_quantity,
                });
            }
            enriched.product.clone()
        };

        let sale = self.inner.api.create_sale(product_id, quantity).await?;
        tracing::info!(sale_id = %sale.id, quantity, "sale recorded");

        let updates: Vec<ArticleStockUpdate> = product
            .articles
            .iter()
            .map(|line| ArticleStockUpdate::subtract(line.id.clone(), line.amount_required * quantity))
            .collect();
        self.inner.api.bulk_update_articles(&updates).await?;

        // The service has applied the sale and the decrements at this
        // point; a failed resync only delays fresh data and is recorded
        // in the state phase, it does not fail the sale.
        if let Err(err) = self.refresh_inventory().await {
            tracing::warn!(error = %err, "post-sale inventory refresh failed");
        }
        Ok(sale)
    }

    /// Delete a sale record.
    ///
    /// Consumed article stock is not restored; the service treats sales
    /// as plain records. Callers re-fetch the sales list afterward.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Api`] if the service rejects the deletion.
    #[instrument(skip(self))]
    pub async fn remove_sale(&self, sale_id: &SaleId) -> Result<(), EngineError> {
        self.inner.api.delete_sale(sale_id).await?;
        tracing::info!(sale_id = %sale_id, "sale deleted");
        Ok(())
    }

    /// Fetch all sales, each joined with its product.
    ///
    /// One product lookup per sale, issued concurrently - no batching.
    /// Any failed lookup fails the whole call; no partial list is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Api`] for the first underlying failure.
    #[instrument(skip(self))]
    pub async fn fetch_sales(&self) -> Result<Vec<SaleWithProduct>, EngineError> {
        let sales = self.inner.api.list_sales().await?;

        let joined = try_join_all(sales.into_iter().map(|sale| async move {
            let product = self.inner.api.get_product(&sale.product_id).await?;
            Ok::<_, ApiError>(SaleWithProduct { sale, product })
        }))
        .await?;

        Ok(joined)
    }

    /// Join a product's bill of materials against the loaded articles.
    ///
    /// Lines referencing unknown articles are silently dropped; this is
    /// the display join, not the availability derivation.
    pub async fn product_article_details(&self, product: &Product) -> Vec<ArticleWithDetails> {
        let state = self.inner.state.read().await;
        article_details(product, &state.articles)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Utc;

    use stockroom_core::{Article, ArticleId, ArticlePatch, ProductArticle};

    use super::*;

    /// In-memory stand-in for the inventory service.
    ///
    /// Records every operation name and mimics the service's stock
    /// arithmetic so orchestration ordering and payloads can be asserted
    /// without a network.
    #[derive(Default)]
    struct FakeApi {
        articles: Mutex<Vec<Article>>,
        products: Mutex<Vec<Product>>,
        sales: Mutex<Vec<Sale>>,
        calls: Mutex<Vec<String>>,
        last_bulk_update: Mutex<Option<Vec<ArticleStockUpdate>>>,
        fail_list_articles: Mutex<Option<ApiError>>,
        fail_bulk_update: Mutex<Option<ApiError>>,
        fail_product_lookup: Mutex<Option<ApiError>>,
    }

    impl FakeApi {
        fn record(&self, call: &str) {
            self.calls.lock().expect("calls lock").push(call.to_string());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().expect("calls lock").clone()
        }

        fn clear_calls(&self) {
            self.calls.lock().expect("calls lock").clear();
        }

        fn seed(articles: Vec<Article>, products: Vec<Product>) -> Self {
            let api = Self::default();
            *api.articles.lock().expect("articles lock") = articles;
            *api.products.lock().expect("products lock") = products;
            api
        }
    }

    impl InventoryApi for &FakeApi {
        async fn list_articles(&self) -> Result<Vec<Article>, ApiError> {
            self.record("list_articles");
            if let Some(err) = self.fail_list_articles.lock().expect("lock").clone() {
                return Err(err);
            }
            Ok(self.articles.lock().expect("lock").clone())
        }

        async fn get_article(&self, id: &ArticleId) -> Result<Article, ApiError> {
            self.record("get_article");
            self.articles
                .lock()
                .expect("lock")
                .iter()
                .find(|a| a.id == *id)
                .cloned()
                .ok_or_else(|| ApiError::rejection(404, r#"{"message":"Article not found"}"#))
        }

        async fn update_article(
            &self,
            id: &ArticleId,
            patch: &ArticlePatch,
        ) -> Result<Article, ApiError> {
            self.record("update_article");
            let mut articles = self.articles.lock().expect("lock");
            let article = articles
                .iter_mut()
                .find(|a| a.id == *id)
                .ok_or_else(|| ApiError::rejection(404, r#"{"message":"Article not found"}"#))?;
            if let Some(stock) = patch.amount_in_stock {
                article.amount_in_stock = stock;
            }
            if let Some(name) = &patch.name {
                article.name.clone_from(name);
            }
            Ok(article.clone())
        }

        async fn bulk_update_articles(
            &self,
            updates: &[ArticleStockUpdate],
        ) -> Result<Vec<Article>, ApiError> {
            self.record("bulk_update_articles");
            if let Some(err) = self.fail_bulk_update.lock().expect("lock").clone() {
                return Err(err);
            }
            *self.last_bulk_update.lock().expect("lock") = Some(updates.to_vec());

            let mut articles = self.articles.lock().expect("lock");
            for update in updates {
                if let Some(article) = articles.iter_mut().find(|a| a.id == update.id) {
                    if let Some(subtract) = update.amount_to_subtract {
                        article.amount_in_stock = article.amount_in_stock.saturating_sub(subtract);
                    }
                    if let Some(stock) = update.amount_in_stock {
                        article.amount_in_stock = stock;
                    }
                }
            }
            Ok(articles.clone())
        }

        async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
            self.record("list_products");
            Ok(self.products.lock().expect("lock").clone())
        }

        async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
            self.record("get_product");
            if let Some(err) = self.fail_product_lookup.lock().expect("lock").clone() {
                return Err(err);
            }
            self.products
                .lock()
                .expect("lock")
                .iter()
                .find(|p| p.id == *id)
                .cloned()
                .ok_or_else(|| ApiError::rejection(404, r#"{"message":"Product not found"}"#))
        }

        async fn list_sales(&self) -> Result<Vec<Sale>, ApiError> {
            self.record("list_sales");
            Ok(self.sales.lock().expect("lock").clone())
        }

        async fn get_sale(&self, id: &SaleId) -> Result<Vec<Sale>, ApiError> {
            self.record("get_sale");
            Ok(self
                .sales
                .lock()
                .expect("lock")
                .iter()
                .filter(|s| s.id == *id)
                .cloned()
                .collect())
        }

        async fn create_sale(
            &self,
            product_id: &ProductId,
            amount_sold: u32,
        ) -> Result<Sale, ApiError> {
            self.record("create_sale");
            let mut sales = self.sales.lock().expect("lock");
            let sale = Sale {
                id: SaleId::new(format!("sale-{}", sales.len() + 1)),
                created_at: Utc::now(),
                product_id: product_id.clone(),
                amount_sold,
            };
            sales.push(sale.clone());
            Ok(sale)
        }

        async fn delete_sale(&self, id: &SaleId) -> Result<(), ApiError> {
            self.record("delete_sale");
            let mut sales = self.sales.lock().expect("lock");
            let before = sales.len();
            sales.retain(|s| s.id != *id);
            if sales.len() == before {
                return Err(ApiError::rejection(404, r#"{"message":"Sale not found"}"#));
            }
            Ok(())
        }
    }

    fn article(id: &str, stock: u32) -> Article {
        Article {
            id: ArticleId::new(id),
            name: format!("article {id}"),
            amount_in_stock: stock,
        }
    }

    fn product(id: &str, lines: &[(&str, u32)]) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("product {id}"),
            articles: lines
                .iter()
                .map(|(article_id, required)| ProductArticle {
                    id: ArticleId::new(*article_id),
                    amount_required: *required,
                })
                .collect(),
        }
    }

    fn chair_warehouse() -> FakeApi {
        // One chair consumes 4 legs and 1 seat: 12 legs / 4 = 3 sellable.
        FakeApi::seed(
            vec![article("a1", 12), article("a2", 5)],
            vec![product("p1", &[("a1", 4), ("a2", 1)])],
        )
    }

    #[tokio::test]
    async fn test_refresh_replaces_state_with_enriched_products() {
        let api = chair_warehouse();
        let engine = InventoryEngine::new(&api);
        assert!(engine.snapshot().await.phase.is_loading());

        engine.refresh_inventory().await.expect("refresh");

        let state = engine.snapshot().await;
        assert_eq!(state.phase, LoadPhase::Ready);
        assert_eq!(state.articles.len(), 2);
        assert_eq!(state.products[0].max_available_quantity, 3);
        assert!(state.products[0].is_available);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_last_good_data() {
        let api = chair_warehouse();
        let engine = InventoryEngine::new(&api);
        engine.refresh_inventory().await.expect("refresh");

        *api.fail_list_articles.lock().expect("lock") =
            Some(ApiError::transport("connection refused"));
        let err = engine.refresh_inventory().await.expect_err("should fail");

        let state = engine.snapshot().await;
        assert_eq!(state.phase, LoadPhase::Failed(err));
        // Previously loaded data survives the failure.
        assert_eq!(state.products.len(), 1);
        assert_eq!(state.articles.len(), 2);
        assert_eq!(state.products[0].max_available_quantity, 3);
    }

    #[tokio::test]
    async fn test_oversized_sale_fails_locally_without_network() {
        let api = chair_warehouse();
        let engine = InventoryEngine::new(&api);
        engine.refresh_inventory().await.expect("refresh");
        api.clear_calls();

        let err = engine
            .register_sale(&ProductId::new("p1"), 4)
            .await
            .expect_err("only 3 available");

        assert_eq!(
            err,
            EngineError::InsufficientStock {
                requested: 4,
                available: 3
            }
        );
        assert!(api.calls().is_empty(), "no API call may be issued");
    }

    #[tokio::test]
    async fn test_unknown_product_fails_locally_without_network() {
        let api = chair_warehouse();
        let engine = InventoryEngine::new(&api);
        engine.refresh_inventory().await.expect("refresh");
        api.clear_calls();

        let err = engine
            .register_sale(&ProductId::new("ghost"), 1)
            .await
            .expect_err("unknown product");

        assert_eq!(err, EngineError::ProductNotFound(ProductId::new("ghost")));
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn test_successful_sale_decrements_stock_and_resyncs() {
        let api = chair_warehouse();
        let engine = InventoryEngine::new(&api);
        engine.refresh_inventory().await.expect("refresh");
        api.clear_calls();

        let sale = engine
            .register_sale(&ProductId::new("p1"), 2)
            .await
            .expect("sale");
        assert_eq!(sale.amount_sold, 2);

        // create, bulk decrement, then the refresh pair.
        assert_eq!(
            api.calls(),
            vec![
                "create_sale",
                "bulk_update_articles",
                "list_articles",
                "list_products"
            ]
        );

        // amount_required x quantity per bill-of-materials line.
        let updates = api
            .last_bulk_update
            .lock()
            .expect("lock")
            .clone()
            .expect("bulk update issued");
        assert_eq!(
            updates,
            vec![
                ArticleStockUpdate::subtract(ArticleId::new("a1"), 8),
                ArticleStockUpdate::subtract(ArticleId::new("a2"), 2),
            ]
        );

        // Refreshed state reflects the subtraction: 4 legs / 3 seats left.
        let state = engine.snapshot().await;
        assert_eq!(state.phase, LoadPhase::Ready);
        assert_eq!(state.articles[0].amount_in_stock, 4);
        assert_eq!(state.articles[1].amount_in_stock, 3);
        assert_eq!(state.products[0].max_available_quantity, 1);
    }

    #[tokio::test]
    async fn test_post_sale_refresh_failure_does_not_fail_the_sale() {
        let api = chair_warehouse();
        let engine = InventoryEngine::new(&api);
        engine.refresh_inventory().await.expect("refresh");
        *api.fail_list_articles.lock().expect("lock") =
            Some(ApiError::transport("connection reset"));

        // Sale and decrement land on the service; only the resync fails.
        let sale = engine
            .register_sale(&ProductId::new("p1"), 1)
            .await
            .expect("sale succeeds despite failed resync");
        assert_eq!(sale.amount_sold, 1);
        assert_eq!(api.sales.lock().expect("lock").len(), 1);
        assert_eq!(api.articles.lock().expect("lock")[0].amount_in_stock, 8);

        // The refresh failure is visible in the state, with stale data.
        let state = engine.snapshot().await;
        assert!(matches!(state.phase, LoadPhase::Failed(_)));
        assert_eq!(state.articles[0].amount_in_stock, 12);
    }

    #[tokio::test]
    async fn test_stock_update_failure_leaves_orphaned_sale() {
        let api = chair_warehouse();
        let engine = InventoryEngine::new(&api);
        engine.refresh_inventory().await.expect("refresh");
        *api.fail_bulk_update.lock().expect("lock") =
            Some(ApiError::rejection(500, r#"{"message":"stock update failed"}"#));

        let err = engine
            .register_sale(&ProductId::new("p1"), 1)
            .await
            .expect_err("bulk update fails");
        assert!(matches!(err, EngineError::Api(_)));

        // The created sale is not rolled back, and no decrement landed.
        assert_eq!(api.sales.lock().expect("lock").len(), 1);
        let state = engine.snapshot().await;
        assert_eq!(state.articles[0].amount_in_stock, 12);
        assert_eq!(state.products[0].max_available_quantity, 3);
    }

    #[tokio::test]
    async fn test_remove_sale_does_not_restore_stock() {
        let api = chair_warehouse();
        let engine = InventoryEngine::new(&api);
        engine.refresh_inventory().await.expect("refresh");

        let sale = engine
            .register_sale(&ProductId::new("p1"), 1)
            .await
            .expect("sale");
        let stock_after_sale = api.articles.lock().expect("lock")[0].amount_in_stock;

        engine.remove_sale(&sale.id).await.expect("delete");

        assert!(api.sales.lock().expect("lock").is_empty());
        // Consumed stock stays consumed.
        assert_eq!(
            api.articles.lock().expect("lock")[0].amount_in_stock,
            stock_after_sale
        );
    }

    #[tokio::test]
    async fn test_remove_unknown_sale_surfaces_service_error() {
        let api = chair_warehouse();
        let engine = InventoryEngine::new(&api);

        let err = engine
            .remove_sale(&SaleId::new("ghost"))
            .await
            .expect_err("unknown sale");
        assert!(matches!(err, EngineError::Api(ApiError { status: Some(404), .. })));
    }

    #[tokio::test]
    async fn test_fetch_sales_joins_each_product() {
        let api = chair_warehouse();
        let engine = InventoryEngine::new(&api);
        engine.refresh_inventory().await.expect("refresh");
        engine
            .register_sale(&ProductId::new("p1"), 1)
            .await
            .expect("first sale");
        engine
            .register_sale(&ProductId::new("p1"), 1)
            .await
            .expect("second sale");
        api.clear_calls();

        let sales = engine.fetch_sales().await.expect("fetch sales");

        assert_eq!(sales.len(), 2);
        assert!(sales.iter().all(|s| s.product.id == ProductId::new("p1")));
        // One product lookup per sale, no batching.
        let lookups = api.calls().iter().filter(|c| *c == "get_product").count();
        assert_eq!(lookups, 2);
    }

    #[tokio::test]
    async fn test_fetch_sales_fails_wholesale_on_lookup_failure() {
        let api = chair_warehouse();
        let engine = InventoryEngine::new(&api);
        engine.refresh_inventory().await.expect("refresh");
        engine
            .register_sale(&ProductId::new("p1"), 1)
            .await
            .expect("sale");

        *api.fail_product_lookup.lock().expect("lock") =
            Some(ApiError::rejection(404, r#"{"message":"Product not found"}"#));

        let err = engine.fetch_sales().await.expect_err("lookup fails");
        assert!(matches!(err, EngineError::Api(_)));
    }

    #[tokio::test]
    async fn test_article_details_join_against_loaded_state() {
        let api = chair_warehouse();
        let engine = InventoryEngine::new(&api);
        engine.refresh_inventory().await.expect("refresh");

        let with_ghost = product("p1", &[("a1", 4), ("ghost", 1)]);
        let details = engine.product_article_details(&with_ghost).await;

        assert_eq!(details.len(), 1);
        assert_eq!(details[0].amount_in_stock, 12);
    }
}
