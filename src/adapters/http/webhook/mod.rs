//! HTTP adapter for the webhook callbacks.
//!
//! - `GET /pbwebhook` - Subscription validation
//! - `POST /pbwebhook` - Event notification
//! - `GET /ping` - Liveness check

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{ErrorResponse, ValidationParams};
pub use handlers::{WebhookApiError, WebhookAppState, MAX_EVENT_BODY_BYTES};
pub use routes::webhook_routes;
