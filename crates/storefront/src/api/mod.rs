//! Blanja REST backend client.
//!
//! # Architecture
//!
//! - Plain JSON over HTTP via `reqwest`; the backend is the source of truth
//!   and nothing is synced locally
//! - Bearer token read from an injected [`CredentialProvider`] on every
//!   authenticated call
//! - Product listings cached in memory via `moka` (TTL from config)
//!
//! # Endpoints
//!
//! ```text
//! GET  products                 - Paginated product listing (public)
//! GET  products/{id}            - Product detail (public)
//! GET  cart                     - Shopper's carts with their products
//! GET  addresses/profile        - Shopper's shipping addresses
//! POST cart/addProduct          - Increase a product's quantity
//! POST cart/removeProduct       - Decrease a product's quantity
//! POST cart/deleteAllProduct    - Remove several products at once
//! POST checkout                 - Create a checkout from selected carts
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use blanja_storefront::api::{BlanjaClient, ProductFilter};
//!
//! let client = BlanjaClient::new(&config, config.credentials())?;
//! let page = client
//!     .get_all_products(&ProductFilter::keyword("sneakers"))
//!     .await?;
//! ```
//!
//! [`CredentialProvider`]: crate::credentials::CredentialProvider

mod cache;
mod client;
pub mod types;

pub use client::BlanjaClient;
pub use types::*;

use async_trait::async_trait;
use thiserror::Error;

use crate::credentials::CredentialError;

/// Errors that can occur when talking to the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure (connection refused, timeout, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status.
    ///
    /// `message` and `status` are the backend's own `message` and
    /// `statusCode` fields, passed through unchanged.
    #[error("Backend error ({status}): {message}")]
    Backend { message: String, status: u16 },

    /// Response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Endpoint URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Bearer token could not be read.
    #[error("Credential error: {0}")]
    Credentials(#[from] CredentialError),
}

impl ApiError {
    /// Backend status code, if the backend produced this error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Backend operations the cart page depends on.
///
/// Implemented by [`BlanjaClient`]; tests substitute an in-memory fake.
#[async_trait]
pub trait CartApi: Send + Sync {
    /// Load the shopper's carts.
    async fn get_carts(&self) -> Result<Vec<Cart>, ApiError>;

    /// Load the shopper's shipping addresses.
    async fn get_addresses(&self) -> Result<Vec<Address>, ApiError>;

    /// Increase a product's quantity in a cart.
    async fn add_product(&self, request: &CartProductRequest) -> Result<(), ApiError>;

    /// Decrease a product's quantity in a cart.
    async fn remove_product(&self, request: &CartProductRequest) -> Result<(), ApiError>;

    /// Remove several products from their carts in one request.
    async fn delete_all_products(&self, request: &DeleteAllProductsRequest) -> Result<(), ApiError>;

    /// Create a checkout.
    async fn checkout(&self, request: &CheckoutRequest) -> Result<CheckoutResponse, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display() {
        let err = ApiError::Backend {
            message: "Product not found".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "Backend error (404): Product not found");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_non_backend_errors_have_no_status() {
        let err = ApiError::InvalidUrl(url::ParseError::EmptyHost);
        assert_eq!(err.status(), None);
    }
}
