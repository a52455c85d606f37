//! Foundation module - Shared domain primitives.
//!
//! Contains the error vocabulary shared by every layer of the relay.

mod errors;

pub use errors::ErrorCode;
