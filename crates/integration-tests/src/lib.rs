//! Integration test harness for the Blanja storefront client.
//!
//! Spins up an in-process `axum` server that stands in for the Blanja REST
//! backend. Every request is recorded; responses are canned per
//! `(method, path)` and default to a backend-style 404.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p blanja-integration-tests
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! let backend = MockBackend::start().await?;
//! backend.respond("GET", "cart", 200, json!({ "data": [] }));
//! let client = BlanjaClient::new(&backend.config(&[]), Arc::new(NoCredentials))?;
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex, PoisonError};

use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri, header};
use axum::response::IntoResponse;
use axum::Json;
use blanja_storefront::config::{ConfigError, StorefrontConfig};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Path prefix the mock mounts the API under, so relative endpoint joining
/// is exercised.
pub const API_PREFIX: &str = "/v1/";

/// One request as the backend saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path relative to [`API_PREFIX`], e.g. `cart/addProduct`.
    pub path: String,
    /// Decoded query parameters in order.
    pub query: Vec<(String, String)>,
    pub authorization: Option<String>,
    /// JSON body, if one was sent.
    pub body: Option<Value>,
}

impl RecordedRequest {
    /// First value of a query parameter.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

type Responses = HashMap<(String, String), (StatusCode, Value)>;

#[derive(Default)]
struct MockState {
    responses: Mutex<Responses>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// In-process stand-in for the Blanja REST backend.
pub struct MockBackend {
    addr: SocketAddr,
    state: Arc<MockState>,
    server: JoinHandle<()>,
}

impl MockBackend {
    /// Bind to an ephemeral local port and start serving.
    ///
    /// # Errors
    ///
    /// Returns an error if the listener cannot bind.
    pub async fn start() -> std::io::Result<Self> {
        let state = Arc::new(MockState::default());
        let app = Router::new().fallback(handle).with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let server = tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(error = %e, "Mock backend stopped");
            }
        });

        Ok(Self {
            addr,
            state,
            server,
        })
    }

    /// Base URL to point the client at (with a trailing slash).
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://{}{API_PREFIX}", self.addr)
    }

    /// Client configuration pointing at this backend.
    ///
    /// Caching is off unless `overrides` turns it on; `overrides` may set
    /// any other `BLANJA_*` variable too.
    ///
    /// # Errors
    ///
    /// Returns an error if an override is invalid.
    pub fn config(&self, overrides: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let mut vars: HashMap<String, String> = HashMap::from([
            ("BLANJA_API_URL".to_string(), self.url()),
            ("BLANJA_PRODUCT_CACHE_TTL_SECS".to_string(), "0".to_string()),
            ("BLANJA_HTTP_TIMEOUT_SECS".to_string(), "5".to_string()),
        ]);
        for (key, value) in overrides {
            vars.insert((*key).to_string(), (*value).to_string());
        }
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    /// Answer `method path` with `status` and a JSON `body` from now on.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        self.state
            .responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((method.to_ascii_uppercase(), path.to_string()), (status, body));
    }

    /// Every request received so far.
    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Requests received for one path.
    #[must_use]
    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.server.abort();
    }
}

async fn handle(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let path = uri
        .path()
        .strip_prefix(API_PREFIX)
        .unwrap_or_else(|| uri.path())
        .to_string();

    let query = uri
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect()
        })
        .unwrap_or_default();

    let request = RecordedRequest {
        method: method.to_string(),
        path: path.clone(),
        query,
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    };
    state
        .requests
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(request);

    let canned = state
        .responses
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&(method.to_string(), path))
        .cloned();

    match canned {
        Some((status, body)) => (status, Json(body)),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({
                "status": "not found",
                "statusCode": 404,
                "message": "Route not found"
            })),
        ),
    }
}
