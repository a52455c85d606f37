//! HTTP DTOs for the webhook endpoints.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query key carrying the value to echo.
pub const VALIDATION_TOKEN_PARAM: &str = "validationToken";

/// Query of the subscription-validation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationParams {
    /// Value the API expects to be echoed back.
    pub validation_token: Option<String>,
}

impl ValidationParams {
    /// Picks `validationToken` out of decoded query pairs.
    ///
    /// When the key repeats, the first occurrence wins.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        Self {
            validation_token: pairs
                .into_iter()
                .find(|(key, _)| key == VALIDATION_TOKEN_PARAM)
                .map(|(_, value)| value),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
