//! Finance backend HTTP client
//!
//! A typed async client for the bookkeeping REST API. Endpoints are grouped
//! by resource, each group in its own module as an `impl BackendClient`:
//! - auth: login and self-registration
//! - transactions: list, create, update, status changes
//! - catalog: categories and funds
//! - users: account management
//! - dashboard: headline stats and charts
//! - reports: filtered reports, exports, receipt upload
//!
//! The client is cheap to clone. Requests made on behalf of a signed-in
//! user go through [`BackendClient::with_token`], which attaches the bearer
//! token.

pub mod error;
mod auth;
mod catalog;
mod dashboard;
mod reports;
mod transactions;
mod users;

pub use error::{ClientError, Result};
pub use reports::ExportFile;

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// HTTP client for the finance backend
#[derive(Debug, Clone)]
pub struct BackendClient {
    /// Base URL of the backend (e.g., "http://localhost:8080"), without `/api`
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Bearer token of the signed-in user
    token: Option<String>,
}

/// Success body of most endpoints
///
/// A few endpoints answer with the bare payload, so both shapes decode.
#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } => data,
            Envelope::Bare(data) => data,
        }
    }
}

impl BackendClient {
    /// Create a client with a default `reqwest::Client`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a client with a configured `reqwest::Client` (timeouts, TLS)
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            token: None,
        }
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(base_url: impl Into<String>, timeout: std::time::Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(base_url, client))
    }

    /// Copy of this client that authenticates as the holder of `token`
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            token: Some(token.into()).filter(|t| !t.is_empty()),
        }
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    /// Start a request to `/api<path>`, with the bearer token when present
    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = self.url(path);
        log::debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status and return the body text of a failed response as an error
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let url = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        let err = ClientError::from_response(status.as_u16(), &body);
        if status.is_server_error() {
            log::error!("Backend {} failed with {}: {}", url, status, body);
        } else {
            log::warn!("Backend {} refused with {}: {}", url, status, err);
        }
        Err(err)
    }

    /// Parse a raw JSON body
    async fn handle_json<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = self.check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Parse a `{"data": ...}` body (or a bare payload)
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let envelope: Envelope<T> = self.handle_json(response).await?;
        Ok(envelope.into_inner())
    }

    /// Parse a list body where the backend may send `null` for an empty list
    async fn handle_list<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<Vec<T>> {
        let envelope: Envelope<Option<Vec<T>>> = self.handle_json(response).await?;
        Ok(envelope.into_inner().unwrap_or_default())
    }

    /// Check the status of a response whose body is not needed
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        self.check_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use axum::Router;

    /// Serve `app` on an ephemeral port and return its base URL
    pub async fn spawn_backend(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }
}
