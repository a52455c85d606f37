//! Subscription repository port for the external product-management API.
//!
//! Defines the contract for managing the relay's webhook subscription.
//! The HTTP adapter talks to the real API; the mock stands in for it in tests.
//!
//! # Design
//!
//! - **Configuration bound at construction**: API base URL, bearer token and
//!   webhook URL are fixed per implementation, so calls only carry per-call data
//! - **No retries**: every failure is returned to the caller as-is

use async_trait::async_trait;

use crate::domain::subscription::{CallbackToken, SubscriptionError, SubscriptionRecord};

/// Port for the external API's `/webhooks` resource.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Create a subscription for all feature events whose callbacks carry
    /// `token` in their `Authorization` header.
    async fn register(&self, token: &CallbackToken) -> Result<(), SubscriptionError>;

    /// List existing subscriptions.
    ///
    /// An empty list is reported as `SubscriptionError::NotFound`, never as
    /// `Ok(vec![])`.
    async fn list(&self) -> Result<Vec<SubscriptionRecord>, SubscriptionError>;

    /// Delete the given subscriptions in order.
    ///
    /// Stops at the first failed deletion and returns its error; later
    /// records are not attempted.
    async fn unregister(&self, records: &[SubscriptionRecord]) -> Result<(), SubscriptionError>;
}
