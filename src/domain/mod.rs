//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (error codes)
//! - `subscription` - Webhook subscription payloads, records and the callback token

pub mod foundation;
pub mod subscription;
