//! Storefront client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `BLANJA_API_URL` - Base URL of the Blanja REST backend (e.g., `https://api.blanja.id/v1/`)
//!
//! ## Optional
//! - `BLANJA_TOKEN` - Bearer token; takes precedence over the token file
//! - `BLANJA_TOKEN_FILE` - Token file path (default: `$HOME/.blanja/token`)
//! - `BLANJA_DELIVERY_FEE_RATE` - Delivery fee as a fraction of the total (default: 0.10)
//! - `BLANJA_HTTP_TIMEOUT_SECS` - Request timeout in seconds (default: 30)
//! - `BLANJA_PRODUCT_CACHE_TTL_SECS` - Product listing cache TTL, 0 disables (default: 300)
//! - `BLANJA_MUTATION_ERRORS` - `log` or `notify` (default: `log`)

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::cart::DeliveryFeePolicy;
use crate::credentials::{CredentialProvider, FileTokenStore, StaticToken};
use crate::notify::ErrorVisibility;

const DEFAULT_HTTP_TIMEOUT_SECS: &str = "30";
const DEFAULT_PRODUCT_CACHE_TTL_SECS: &str = "300";
const DEFAULT_TOKEN_FILE: &str = ".blanja/token";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Backend base URL, always ending in `/` so relative endpoints join under it
    pub api_url: Url,
    /// Bearer token supplied directly through the environment
    pub token: Option<SecretString>,
    /// File the bearer token is persisted in between runs
    pub token_file: PathBuf,
    /// Delivery fee rule applied at checkout
    pub delivery_fee: DeliveryFeePolicy,
    /// Client-wide HTTP timeout
    pub http_timeout: Duration,
    /// TTL for cached product listings (`None` disables caching)
    pub product_cache_ttl: Option<Duration>,
    /// Whether failed cart mutations are surfaced to the user
    pub mutation_errors: ErrorVisibility,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("api_url", &self.api_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("token_file", &self.token_file)
            .field("delivery_fee", &self.delivery_fee)
            .field("http_timeout", &self.http_timeout)
            .field("product_cache_ttl", &self.product_cache_ttl)
            .field("mutation_errors", &self.mutation_errors)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_url = parse_api_url(&required(&lookup, "BLANJA_API_URL")?)?;
        let token = lookup("BLANJA_TOKEN")
            .filter(|t| !t.trim().is_empty())
            .map(SecretString::from);
        let token_file = lookup("BLANJA_TOKEN_FILE").map_or_else(
            || {
                let home = lookup("HOME").unwrap_or_else(|| ".".to_string());
                PathBuf::from(home).join(DEFAULT_TOKEN_FILE)
            },
            PathBuf::from,
        );

        let delivery_fee = match lookup("BLANJA_DELIVERY_FEE_RATE") {
            None => DeliveryFeePolicy::default(),
            Some(raw) => {
                let rate = Decimal::from_str(raw.trim()).map_err(|e| {
                    ConfigError::InvalidEnvVar("BLANJA_DELIVERY_FEE_RATE".to_string(), e.to_string())
                })?;
                DeliveryFeePolicy::new(rate).ok_or_else(|| {
                    ConfigError::InvalidEnvVar(
                        "BLANJA_DELIVERY_FEE_RATE".to_string(),
                        format!("rate must be between 0 and 1 (got {rate})"),
                    )
                })?
            }
        };

        let http_timeout = Duration::from_secs(parse_or_default::<u64>(
            &lookup,
            "BLANJA_HTTP_TIMEOUT_SECS",
            DEFAULT_HTTP_TIMEOUT_SECS,
        )?);
        let cache_secs = parse_or_default::<u64>(
            &lookup,
            "BLANJA_PRODUCT_CACHE_TTL_SECS",
            DEFAULT_PRODUCT_CACHE_TTL_SECS,
        )?;
        let product_cache_ttl = (cache_secs > 0).then(|| Duration::from_secs(cache_secs));
        let mutation_errors = parse_or_default::<ErrorVisibility>(&lookup, "BLANJA_MUTATION_ERRORS", "log")?;

        Ok(Self {
            api_url,
            token,
            token_file,
            delivery_fee,
            http_timeout,
            product_cache_ttl,
            mutation_errors,
        })
    }

    /// The credential provider this configuration selects.
    ///
    /// An explicit `BLANJA_TOKEN` wins; otherwise the token file is read on
    /// every authenticated request.
    #[must_use]
    pub fn credentials(&self) -> Arc<dyn CredentialProvider> {
        match &self.token {
            Some(token) => Arc::new(StaticToken::new(token.clone())),
            None => Arc::new(self.token_store()),
        }
    }

    /// The file-backed token store at the configured path.
    #[must_use]
    pub fn token_store(&self) -> FileTokenStore {
        FileTokenStore::new(self.token_file.clone())
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required variable.
fn required(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String, ConfigError> {
    lookup(key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Parse a variable, falling back to a default when unset.
fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse the backend URL, forcing a trailing slash.
///
/// Endpoints are joined relative to this URL, and `Url::join` drops the last
/// path segment unless it ends in `/`.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let mut normalized = raw.trim().to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized)
        .map_err(|e| ConfigError::InvalidEnvVar("BLANJA_API_URL".to_string(), e.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidEnvVar(
            "BLANJA_API_URL".to_string(),
            "must be an absolute http(s) URL".to_string(),
        ));
    }
    Ok(url)
}
