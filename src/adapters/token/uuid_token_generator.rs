//! Random v4 UUID callback tokens.
//!
//! Bytes come straight from the operating system's CSPRNG. A failing source
//! is reported, never papered over with a weaker generator.

use rand::rngs::OsRng;
use rand::RngCore;
use uuid::{Builder, Uuid};

use crate::domain::subscription::{CallbackToken, SubscriptionError};
use crate::ports::TokenGenerator;

/// Generates callback tokens as hyphenated v4 UUID strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidTokenGenerator;

impl UuidTokenGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl TokenGenerator for UuidTokenGenerator {
    fn generate(&self) -> Result<CallbackToken, SubscriptionError> {
        tracing::info!("Generating API callback token");

        let mut bytes = [0u8; 16];
        OsRng.try_fill_bytes(&mut bytes).map_err(|e| {
            tracing::error!(error = %e, "Could not generate callback auth token");
            SubscriptionError::token_generation(e.to_string())
        })?;

        let id: Uuid = Builder::from_random_bytes(bytes).into_uuid();
        Ok(CallbackToken::new(id.to_string()))
    }
}
