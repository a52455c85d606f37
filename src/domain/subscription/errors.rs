//! Subscription-specific error types.
//!
//! Errors raised while registering, listing or tearing down the webhook
//! subscription, and while authenticating inbound callbacks.
//!
//! # Error Kind Mapping
//!
//! | Error | Kind | HTTP Status |
//! |-------|------|-------------|
//! | Unauthenticated | Unauthenticated | 401 |
//! | BadRequest | BadRequest | 400 |
//! | NotFound | NotFound | 404 |
//! | TokenGeneration | InternalServerError | 500 |
//! | Transport | InternalServerError | 500 |
//! | UpstreamStatus | InternalServerError | 500 |
//! | Serialization | InternalServerError | 500 |

use thiserror::Error;

use crate::domain::foundation::ErrorCode;

/// Subscription-specific errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscriptionError {
    /// Inbound callback carried a missing or wrong token.
    #[error("{0}")]
    Unauthenticated(String),

    /// Inbound callback was malformed.
    #[error("{0}")]
    BadRequest(String),

    /// The external API reports no subscriptions.
    #[error("{0}")]
    NotFound(String),

    /// The randomness source could not produce a callback token.
    #[error("Could not generate callback auth token: {0}")]
    TokenGeneration(String),

    /// The request never produced an HTTP response.
    #[error("Error when trying to send {operation} request: {reason}")]
    Transport { operation: String, reason: String },

    /// The external API answered with a status of 300 or above.
    #[error("Error when sending {operation} request to API. Status code: {status}. Message: {body}")]
    UpstreamStatus {
        operation: String,
        status: u16,
        body: String,
    },

    /// A payload could not be encoded or decoded.
    #[error("{context}: {reason}")]
    Serialization { context: String, reason: String },
}

impl SubscriptionError {
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        SubscriptionError::Unauthenticated(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        SubscriptionError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        SubscriptionError::NotFound(message.into())
    }

    pub fn token_generation(reason: impl Into<String>) -> Self {
        SubscriptionError::TokenGeneration(reason.into())
    }

    pub fn transport(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        SubscriptionError::Transport {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    pub fn upstream_status(operation: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        SubscriptionError::UpstreamStatus {
            operation: operation.into(),
            status,
            body: body.into(),
        }
    }

    pub fn serialization(context: impl Into<String>, reason: impl Into<String>) -> Self {
        SubscriptionError::Serialization {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Returns the error kind for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SubscriptionError::Unauthenticated(_) => ErrorCode::Unauthenticated,
            SubscriptionError::BadRequest(_) => ErrorCode::BadRequest,
            SubscriptionError::NotFound(_) => ErrorCode::NotFound,
            SubscriptionError::TokenGeneration(_)
            | SubscriptionError::Transport { .. }
            | SubscriptionError::UpstreamStatus { .. }
            | SubscriptionError::Serialization { .. } => ErrorCode::InternalServerError,
        }
    }

    /// Upstream HTTP status, when the error came from an API response.
    pub fn upstream_status_code(&self) -> Option<u16> {
        match self {
            SubscriptionError::UpstreamStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SubscriptionError::NotFound(_))
    }
}
