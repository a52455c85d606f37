//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - inbound webhook API
//! - `product_api` - outbound subscription API client
//! - `token` - callback token generation

pub mod http;
pub mod product_api;
pub mod token;
