//! pb-webhook-relay - receives feature notifications from the product-management API
//!
//! The relay registers a webhook subscription at startup, authenticates the
//! API's callbacks with a per-registration token, and removes its
//! subscriptions again on shutdown.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
