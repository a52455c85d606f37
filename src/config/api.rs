//! External API configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;
use crate::adapters::product_api::ProductApiConfig;

/// Settings for the product-management API and the public callback URL
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer token sent on every outbound request
    pub api_token: SecretString,

    /// Public URL of this relay's `/pbwebhook` endpoint
    pub webhook_url: String,

    /// Timeout for each outbound API request in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl ApiConfig {
    /// Connection settings for the subscription repository.
    pub fn product_api(&self) -> ProductApiConfig {
        ProductApiConfig::new(
            self.base_url.clone(),
            self.api_token.clone(),
            self.webhook_url.clone(),
            Duration::from_secs(self.request_timeout_secs),
        )
    }

    /// Validate API configuration
    ///
    /// In production the webhook URL must be HTTPS.
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        if self.api_token.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("API_TOKEN"));
        }
        if self.webhook_url.is_empty() {
            return Err(ValidationError::MissingRequired("WEBHOOK_URL"));
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !is_http_url(&self.base_url) {
            return Err(ValidationError::InvalidBaseUrl(self.base_url.clone()));
        }
        if !is_http_url(&self.webhook_url) {
            return Err(ValidationError::InvalidWebhookUrl(self.webhook_url.clone()));
        }

        if *environment == Environment::Production && !self.webhook_url.starts_with("https://") {
            return Err(ValidationError::WebhookUrlMustBeHttps);
        }

        Ok(())
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("https://") || url.starts_with("http://")
}

fn default_base_url() -> String {
    "https://api.productboard.com".to_string()
}

fn default_request_timeout() -> u64 {
    10
}
