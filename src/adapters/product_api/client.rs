//! Transport client for the external product-management API.
//!
//! Every call to the API goes through [`ProductApiClient::prepare`] and
//! [`ProductApiClient::execute`], so header construction and status
//! classification are identical for registering, listing and deleting
//! subscriptions.

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};

use crate::domain::subscription::SubscriptionError;

/// API version requested on every call.
pub const API_VERSION: &str = "1";

/// Header carrying [`API_VERSION`].
pub const VERSION_HEADER: &str = "X-Version";

/// Raw outcome of a successful API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

/// Issues authenticated requests against the API base URL.
#[derive(Clone)]
pub struct ProductApiClient {
    http_client: reqwest::Client,
    base_url: String,
    api_token: SecretString,
}

impl ProductApiClient {
    /// Create a client for `base_url` authenticating with `api_token`.
    pub fn new(base_url: impl Into<String>, api_token: SecretString) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_token,
        }
    }

    /// Use a preconfigured HTTP client (timeouts, proxies).
    pub fn with_http_client(mut self, http_client: reqwest::Client) -> Self {
        self.http_client = http_client;
        self
    }

    /// Absolute URL of `path` under the base URL.
    ///
    /// Slashes at the seam are normalised, so base URLs with and without a
    /// trailing slash address the same endpoint.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Build a request with the headers every API call needs.
    ///
    /// A body is always JSON and adds `Content-Type: application/json`.
    pub fn prepare(&self, method: Method, path: &str, body: Option<Vec<u8>>) -> RequestBuilder {
        let request = self
            .http_client
            .request(method, self.endpoint(path))
            .header(VERSION_HEADER, API_VERSION)
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.api_token.expose_secret()),
            );

        match body {
            Some(body) => request.header(CONTENT_TYPE, "application/json").body(body),
            None => request,
        }
    }

    /// Send a prepared request and drain its body.
    ///
    /// Any status of 300 or above is a failure carrying status and body.
    pub async fn execute(
        &self,
        request: RequestBuilder,
        operation: &str,
    ) -> Result<ApiResponse, SubscriptionError> {
        let response = request.send().await.map_err(|e| {
            tracing::error!(operation, error = %e, "API request failed");
            SubscriptionError::transport(operation, e.to_string())
        })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            tracing::error!(operation, status, error = %e, "Could not read API response body");
            SubscriptionError::transport(operation, e.to_string())
        })?;

        if status >= 300 {
            tracing::error!(operation, status, body = %body, "API rejected request");
            return Err(SubscriptionError::upstream_status(operation, status, body));
        }

        Ok(ApiResponse { status, body })
    }
}
