//! HTTP-backed subscription repository.
//!
//! Implements `SubscriptionRepository` against the external API's
//! `/webhooks` resource using the shared [`ProductApiClient`].
//!
//! # Configuration
//!
//! ```ignore
//! let config = ProductApiConfig::new(base_url, api_token, webhook_url, Duration::from_secs(10));
//! let repository = HttpSubscriptionRepository::new(config)?;
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use secrecy::SecretString;

use crate::domain::subscription::{
    CallbackToken, SubscriptionError, SubscriptionList, SubscriptionRecord, SubscriptionRequest,
};
use crate::ports::SubscriptionRepository;

use super::client::ProductApiClient;

/// Path of the subscription collection under the API base URL.
const WEBHOOKS_PATH: &str = "webhooks";

/// Connection settings for the external API.
#[derive(Clone)]
pub struct ProductApiConfig {
    /// Base URL of the API (e.g. `https://api.productboard.com`).
    base_url: String,

    /// Bearer token for the API.
    api_token: SecretString,

    /// Public URL the API should deliver callbacks to.
    webhook_url: String,

    /// Cap on each outbound request, connect to last body byte.
    request_timeout: Duration,
}

impl ProductApiConfig {
    pub fn new(
        base_url: impl Into<String>,
        api_token: SecretString,
        webhook_url: impl Into<String>,
        request_timeout: Duration,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            api_token,
            webhook_url: webhook_url.into(),
            request_timeout,
        }
    }
}

/// Subscription repository talking to the real API.
pub struct HttpSubscriptionRepository {
    client: ProductApiClient,
    webhook_url: String,
}

impl HttpSubscriptionRepository {
    /// Build the repository with an HTTP client bounded by the configured timeout.
    pub fn new(config: ProductApiConfig) -> Result<Self, SubscriptionError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| SubscriptionError::transport("client setup", e.to_string()))?;

        Ok(Self {
            client: ProductApiClient::new(config.base_url, config.api_token)
                .with_http_client(http_client),
            webhook_url: config.webhook_url,
        })
    }
}

#[async_trait]
impl SubscriptionRepository for HttpSubscriptionRepository {
    async fn register(&self, token: &CallbackToken) -> Result<(), SubscriptionError> {
        let request = SubscriptionRequest::for_feature_events(&self.webhook_url, token);
        let body = serde_json::to_vec(&request).map_err(|e| {
            tracing::error!(error = %e, "Could not generate subscription request");
            SubscriptionError::serialization("Could not generate subscription request", e.to_string())
        })?;

        let prepared = self.client.prepare(Method::POST, WEBHOOKS_PATH, Some(body));
        let response = self.client.execute(prepared, "registration").await?;

        tracing::info!(
            status = response.status,
            webhook_url = %self.webhook_url,
            "Successfully registered for notifications"
        );
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SubscriptionRecord>, SubscriptionError> {
        let prepared = self.client.prepare(Method::GET, WEBHOOKS_PATH, None);
        let response = self.client.execute(prepared, "list subscriptions").await?;

        tracing::info!(
            status = response.status,
            "Successfully listed subscriptions for notifications"
        );

        let list: SubscriptionList = serde_json::from_str(&response.body).map_err(|e| {
            tracing::error!(error = %e, "Error parsing subscription list");
            SubscriptionError::serialization("Error parsing subscription list", e.to_string())
        })?;

        if list.data.is_empty() {
            tracing::info!("No subscriptions found");
            return Err(SubscriptionError::not_found("No subscriptions found"));
        }

        Ok(list.data)
    }

    async fn unregister(&self, records: &[SubscriptionRecord]) -> Result<(), SubscriptionError> {
        for record in records {
            let path = format!("{}/{}", WEBHOOKS_PATH, record.id);
            let prepared = self.client.prepare(Method::DELETE, &path, None);
            let response = self.client.execute(prepared, "delete subscription").await?;

            tracing::info!(
                status = response.status,
                subscription_id = %record.id,
                "Successfully deleted subscription for notifications"
            );
        }
        Ok(())
    }
}
