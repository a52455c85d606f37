//! Product-management API adapter.
//!
//! Implements the `SubscriptionRepository` port against the external API's
//! webhook subscription resource:
//! - `ProductApiClient` - shared request preparation and execution
//! - `HttpSubscriptionRepository` - register, list and delete subscriptions
//! - `MockSubscriptionRepository` - in-memory double for tests
//!
//! # Configuration
//!
//! Required settings:
//! - `api.api_token`: bearer token for the API
//! - `api.webhook_url`: public URL of this relay's `/pbwebhook` endpoint

mod client;
mod http_subscription_repository;
mod mock_subscription_repository;

pub use client::{ApiResponse, ProductApiClient, API_VERSION, VERSION_HEADER};
pub use http_subscription_repository::{HttpSubscriptionRepository, ProductApiConfig};
pub use mock_subscription_repository::MockSubscriptionRepository;
