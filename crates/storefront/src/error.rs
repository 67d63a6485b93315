//! Unified error handling.
//!
//! Each layer has its own error enum; `AppError` gathers them for callers
//! that drive several layers at once (the CLI, integration tests).

use blanja_core::PriceOverflow;
use thiserror::Error;

use crate::api::ApiError;
use crate::cart::CheckoutError;
use crate::config::ConfigError;
use crate::credentials::CredentialError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Backend call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// Checkout was refused or could not be priced.
    #[error("{0}")]
    Checkout(#[from] CheckoutError),

    /// Cart amounts are out of range.
    #[error("Cart amount error: {0}")]
    Amount(#[from] PriceOverflow),

    /// Token could not be read or written.
    #[error("Credential error: {0}")]
    Credentials(#[from] CredentialError),

    /// A component failed to render.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    /// Output could not be written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The cart failed to load, so nothing in it can be acted on.
    #[error("Cart could not be loaded")]
    CartUnavailable,

    /// The backend refused a cart mutation; details are already logged.
    #[error("{0} failed")]
    Rejected(&'static str),
}

/// Result type alias for storefront operations.
pub type Result<T, E = AppError> = std::result::Result<T, E>;
