//! Error types for the domain layer.

use std::fmt;

/// Error kinds surfaced to callers of the relay.
///
/// Every domain error maps onto exactly one of these; the HTTP adapter turns
/// them into status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    /// Missing or wrong callback token.
    Unauthenticated,

    /// Malformed client input.
    BadRequest,

    /// No subscriptions exist upstream.
    NotFound,

    /// Transport failure, non-2xx upstream response, (de)serialization
    /// failure or token generation failure.
    InternalServerError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Unauthenticated => "UNAUTHENTICATED",
            ErrorCode::BadRequest => "BAD_REQUEST",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::Unauthenticated), "UNAUTHENTICATED");
        assert_eq!(format!("{}", ErrorCode::BadRequest), "BAD_REQUEST");
        assert_eq!(format!("{}", ErrorCode::NotFound), "NOT_FOUND");
        assert_eq!(
            format!("{}", ErrorCode::InternalServerError),
            "INTERNAL_SERVER_ERROR"
        );
    }
}
