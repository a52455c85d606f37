//! Application layer - orchestrates ports into the relay's use cases.
//!
//! - `SubscriptionService` - register / unregister the webhook subscription
//! - `LifecycleController` - ties both to process startup and shutdown

mod lifecycle;
mod subscription_service;

pub use lifecycle::{LifecycleConfig, LifecycleController, ShutdownOutcome};
pub use subscription_service::SubscriptionService;
