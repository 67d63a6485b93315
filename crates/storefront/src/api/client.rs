//! HTTP client for the Blanja REST backend.

use std::sync::Arc;

use async_trait::async_trait;
use blanja_core::ProductId;
use reqwest::RequestBuilder;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use super::cache::{CacheKey, ListingCache};
use super::types::{
    Address, Cart, CartProductRequest, CheckoutRequest, CheckoutResponse, DataEnvelope,
    DeleteAllProductsRequest, ErrorBody, ProductDetail, ProductFilter, ProductPage,
    ProductsEnvelope,
};
use super::{ApiError, CartApi};
use crate::config::StorefrontConfig;
use crate::credentials::CredentialProvider;

/// Longest body excerpt written to logs or error messages.
const BODY_EXCERPT_CHARS: usize = 200;

// =============================================================================
// BlanjaClient
// =============================================================================

/// Client for the Blanja REST backend.
///
/// Cheap to clone; clones share the connection pool and listing cache.
#[derive(Clone)]
pub struct BlanjaClient {
    inner: Arc<BlanjaClientInner>,
}

struct BlanjaClientInner {
    client: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
    cache: ListingCache,
}

impl BlanjaClient {
    /// Create a new backend client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(
        config: &StorefrontConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            inner: Arc::new(BlanjaClientInner {
                client,
                base_url: config.api_url.clone(),
                credentials,
                cache: ListingCache::new(config.product_cache_ttl),
            }),
        })
    }

    /// Resolve an endpoint path against the base URL.
    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.inner.base_url.join(path)?)
    }

    /// Attach the bearer token, if the shopper has one.
    fn authorized(&self, request: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        match self.inner.credentials.bearer_token()? {
            Some(token) => Ok(request.bearer_auth(token.expose_secret())),
            None => {
                debug!("No bearer token available, sending request anonymously");
                Ok(request)
            }
        }
    }

    /// Send a request and decode the JSON body.
    async fn execute<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if !status.is_success() {
            let error = backend_error(status, &body);
            tracing::warn!(
                status = %status,
                error = %error,
                "Backend returned non-success status"
            );
            return Err(error);
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %excerpt(&body),
                "Failed to parse backend response"
            );
            ApiError::Parse(e)
        })
    }

    /// Send a request whose success body is irrelevant.
    async fn execute_unit(&self, request: RequestBuilder) -> Result<(), ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        let error = backend_error(status, &body);
        tracing::warn!(status = %status, error = %error, "Backend rejected request");
        Err(error)
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// List products matching a filter, 10 per page.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Backend`] carrying the backend's message and status
    /// code unchanged, or a transport/parse error.
    #[instrument(skip(self), fields(page = filter.page))]
    pub async fn get_all_products(&self, filter: &ProductFilter) -> Result<ProductPage, ApiError> {
        let cache_key = CacheKey::products(filter);
        if let Some(page) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product listing");
            return Ok(page);
        }

        let request = self
            .inner
            .client
            .get(self.endpoint("products")?)
            .query(&filter.query_pairs());
        let envelope: ProductsEnvelope = self.execute(request).await?;
        let page = ProductPage::from(envelope);

        self.inner.cache.insert(cache_key, page.clone()).await;
        Ok(page)
    }

    /// List products by condition (e.g. `new`, `used`).
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_all_products`].
    #[instrument(skip(self))]
    pub async fn get_products_by_condition(&self, condition: &str) -> Result<ProductPage, ApiError> {
        let cache_key = CacheKey::condition(condition);
        if let Some(page) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for condition listing");
            return Ok(page);
        }

        let request = self
            .inner
            .client
            .get(self.endpoint("products")?)
            .query(&[("condition", condition)]);
        let envelope: ProductsEnvelope = self.execute(request).await?;
        let page = ProductPage::from(envelope);

        self.inner.cache.insert(cache_key, page.clone()).await;
        Ok(page)
    }

    /// Get a single product's detail.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get_product(&self, id: ProductId) -> Result<ProductDetail, ApiError> {
        let request = self
            .inner
            .client
            .get(self.endpoint(&format!("products/{id}"))?);
        let envelope: DataEnvelope<ProductDetail> = self.execute(request).await?;
        Ok(envelope.data)
    }

    /// Drop every cached listing.
    pub fn invalidate_products(&self) {
        self.inner.cache.invalidate_all();
    }
}

#[async_trait]
impl CartApi for BlanjaClient {
    #[instrument(skip(self))]
    async fn get_carts(&self) -> Result<Vec<Cart>, ApiError> {
        let request = self.authorized(self.inner.client.get(self.endpoint("cart")?))?;
        let envelope: DataEnvelope<Option<Vec<Cart>>> = self.execute(request).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    #[instrument(skip(self))]
    async fn get_addresses(&self) -> Result<Vec<Address>, ApiError> {
        let request = self.authorized(
            self.inner
                .client
                .get(self.endpoint("addresses/profile")?),
        )?;
        let envelope: DataEnvelope<Option<Vec<Address>>> = self.execute(request).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    #[instrument(skip(self), fields(cart_id = %request.cart_id, product_id = %request.product_id))]
    async fn add_product(&self, request: &CartProductRequest) -> Result<(), ApiError> {
        let http = self.authorized(
            self.inner
                .client
                .post(self.endpoint("cart/addProduct")?)
                .json(request),
        )?;
        self.execute_unit(http).await
    }

    #[instrument(skip(self), fields(cart_id = %request.cart_id, product_id = %request.product_id))]
    async fn remove_product(&self, request: &CartProductRequest) -> Result<(), ApiError> {
        let http = self.authorized(
            self.inner
                .client
                .post(self.endpoint("cart/removeProduct")?)
                .json(request),
        )?;
        self.execute_unit(http).await
    }

    #[instrument(skip(self, request), fields(items = request.product_id.len()))]
    async fn delete_all_products(&self, request: &DeleteAllProductsRequest) -> Result<(), ApiError> {
        let http = self.authorized(
            self.inner
                .client
                .post(self.endpoint("cart/deleteAllProduct")?)
                .json(request),
        )?;
        self.execute_unit(http).await
    }

    #[instrument(skip(self, request), fields(carts = request.carts.len()))]
    async fn checkout(&self, request: &CheckoutRequest) -> Result<CheckoutResponse, ApiError> {
        let http = self.authorized(
            self.inner
                .client
                .post(self.endpoint("checkout")?)
                .json(request),
        )?;
        self.execute(http).await
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Build a backend error from a non-success response.
///
/// The backend's own `message` and `statusCode` win; the HTTP status and a
/// body excerpt fill in whatever the body does not provide.
fn backend_error(status: reqwest::StatusCode, body: &str) -> ApiError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    ApiError::Backend {
        message: parsed.message.unwrap_or_else(|| {
            if body.trim().is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("Unknown error")
                    .to_string()
            } else {
                excerpt(body)
            }
        }),
        status: parsed.status_code.unwrap_or_else(|| status.as_u16()),
    }
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn test_backend_error_prefers_body_fields() {
        let err = backend_error(
            StatusCode::BAD_REQUEST,
            r#"{"status":"bad request","statusCode":422,"message":"Validation failed"}"#,
        );
        assert!(matches!(
            err,
            ApiError::Backend { ref message, status: 422 } if message == "Validation failed"
        ));
    }

    #[test]
    fn test_backend_error_falls_back_to_http_status() {
        let err = backend_error(StatusCode::BAD_GATEWAY, "upstream down");
        assert!(matches!(
            err,
            ApiError::Backend { ref message, status: 502 } if message == "upstream down"
        ));
    }

    #[test]
    fn test_backend_error_empty_body_uses_reason() {
        let err = backend_error(StatusCode::NOT_FOUND, "");
        assert!(matches!(
            err,
            ApiError::Backend { ref message, status: 404 } if message == "Not Found"
        ));
    }

    #[test]
    fn test_excerpt_truncates() {
        let long = "x".repeat(500);
        assert_eq!(excerpt(&long).len(), BODY_EXCERPT_CHARS);
    }
}
