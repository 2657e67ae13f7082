//! HTTP client for the inventory service.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};
use tracing::instrument;

use stockroom_core::{
    Article, ArticleId, ArticlePatch, ArticleStockUpdate, Product, ProductId, Sale, SaleId,
};

use super::InventoryApi;
use super::error::ApiError;

/// Fixed-delay retry policy for API calls.
///
/// Every transport-classified failure - connection errors, timeouts, and
/// non-2xx responses alike - is retried until the budget is exhausted,
/// uniformly across reads and writes. A write that succeeded server-side
/// but whose response was lost to a transient failure will therefore be
/// re-sent and may duplicate its side effect; the service offers no
/// idempotency keys to close this gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    /// Fixed pause between attempts. No backoff.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            delay: Duration::from_secs(1),
        }
    }
}

/// Client for the inventory service REST API.
///
/// Provides one typed operation per resource action. Each call is a
/// single HTTP round trip, plus up to [`RetryPolicy::max_retries`]
/// re-sends on transport failure; nothing is cached locally.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    retry: RetryPolicy,
}

/// Request body for `POST /sales`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SaleDraft<'a> {
    product_id: &'a ProductId,
    amount_sold: u32,
}

impl ApiClient {
    /// Create a new inventory service client.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be created. This should never
    /// happen under normal circumstances as we use standard TLS
    /// configuration.
    #[must_use]
    pub fn new(config: &crate::config::EngineConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.clone(),
                retry: config.retry,
            }),
        }
    }

    /// The base URL all requests are issued against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    // =========================================================================
    // Request execution
    // =========================================================================

    /// Run one HTTP round trip under the retry policy and return the raw
    /// response body.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<String, ApiError> {
        let url = format!("{}{}", self.inner.base_url, path);
        retry_request(self.inner.retry, || {
            self.attempt(method.clone(), &url, body.as_ref())
        })
        .await
    }

    /// A single request attempt: send, check status, read the body.
    async fn attempt(
        &self,
        method: Method,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<String, ApiError> {
        let mut request = self.inner.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            Ok(text)
        } else {
            Err(ApiError::rejection(status.as_u16(), &text))
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.execute(Method::GET, path, None).await?;
        parse(&body)
    }

    async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let payload = encode(body)?;
        let text = self.execute(Method::POST, path, Some(payload)).await?;
        parse(&text)
    }

    async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let payload = encode(body)?;
        let text = self.execute(Method::PATCH, path, Some(payload)).await?;
        parse(&text)
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(Method::DELETE, path, None).await?;
        Ok(())
    }
}

impl InventoryApi for ApiClient {
    #[instrument(skip(self))]
    async fn list_articles(&self) -> Result<Vec<Article>, ApiError> {
        self.get("/articles").await
    }

    #[instrument(skip(self))]
    async fn get_article(&self, id: &ArticleId) -> Result<Article, ApiError> {
        self.get(&format!("/articles/{id}")).await
    }

    #[instrument(skip(self, patch))]
    async fn update_article(
        &self,
        id: &ArticleId,
        patch: &ArticlePatch,
    ) -> Result<Article, ApiError> {
        self.patch(&format!("/articles/{id}"), patch).await
    }

    #[instrument(skip(self, updates), fields(lines = updates.len()))]
    async fn bulk_update_articles(
        &self,
        updates: &[ArticleStockUpdate],
    ) -> Result<Vec<Article>, ApiError> {
        self.patch("/articles", &updates).await
    }

    #[instrument(skip(self))]
    async fn list_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get("/products").await
    }

    #[instrument(skip(self))]
    async fn get_product(&self, id: &ProductId) -> Result<Product, ApiError> {
        self.get(&format!("/products/{id}")).await
    }

    #[instrument(skip(self))]
    async fn list_sales(&self) -> Result<Vec<Sale>, ApiError> {
        self.get("/sales").await
    }

    #[instrument(skip(self))]
    async fn get_sale(&self, id: &SaleId) -> Result<Vec<Sale>, ApiError> {
        self.get(&format!("/sales/{id}")).await
    }

    #[instrument(skip(self))]
    async fn create_sale(
        &self,
        product_id: &ProductId,
        amount_sold: u32,
    ) -> Result<Sale, ApiError> {
        self.post(
            "/sales",
            &SaleDraft {
                product_id,
                amount_sold,
            },
        )
        .await
    }

    #[instrument(skip(self))]
    async fn delete_sale(&self, id: &SaleId) -> Result<(), ApiError> {
        self.delete(&format!("/sales/{id}")).await
    }
}

/// Run `request` until it succeeds or the retry budget is spent.
///
/// Retries fire on any [`ApiError`] the attempt produces; the delay
/// between attempts is fixed, with no backoff.
async fn retry_request<T, F, Fut>(policy: RetryPolicy, mut request: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt: u32 = 1;
    loop {
        match request().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt <= policy.max_retries => {
                tracing::warn!(
                    error = %err,
                    attempt,
                    max_retries = policy.max_retries,
                    "request failed, retrying after fixed delay"
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

fn encode<B: Serialize>(body: &B) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(body).map_err(|e| ApiError {
        message: format!("encode error: {e}"),
        status: None,
    })
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::decode(e.to_string()))
}
