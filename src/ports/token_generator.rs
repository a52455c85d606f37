//! Token generator port.

use crate::domain::subscription::{CallbackToken, SubscriptionError};

/// Produces fresh callback tokens.
///
/// Implementations must draw from a cryptographically secure source and
/// report an exhausted or unavailable source as
/// `SubscriptionError::TokenGeneration` instead of retrying.
pub trait TokenGenerator: Send + Sync {
    fn generate(&self) -> Result<CallbackToken, SubscriptionError>;
}
