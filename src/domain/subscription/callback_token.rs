//! Callback token and the shared handle that holds the active one.
//!
//! The token is handed to the external API at registration time and comes
//! back verbatim in the `Authorization` header of every callback. The
//! subscription service is the only writer; webhook handlers only read.

use std::fmt;
use std::sync::Arc;

use subtle::ConstantTimeEq;
use tokio::sync::RwLock;

/// Secret that authenticates callbacks from the external API.
#[derive(Clone, PartialEq, Eq)]
pub struct CallbackToken(String);

impl CallbackToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares a presented header value against this token in constant time.
    pub fn verify(&self, presented: &str) -> bool {
        self.0.as_bytes().ct_eq(presented.as_bytes()).unwrap_u8() == 1
    }
}

impl fmt::Debug for CallbackToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CallbackToken([REDACTED])")
    }
}

/// Shared handle to the active callback token.
///
/// Empty until the first registration. Cloning the handle shares the same
/// slot.
#[derive(Clone, Default)]
pub struct CallbackTokenState {
    inner: Arc<RwLock<Option<CallbackToken>>>,
}

impl CallbackTokenState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a new active token, replacing the previous one.
    pub async fn replace(&self, token: CallbackToken) {
        *self.inner.write().await = Some(token);
    }

    /// Returns a copy of the active token, if any.
    pub async fn current(&self) -> Option<CallbackToken> {
        self.inner.read().await.clone()
    }

    /// True when a token is active and `presented` equals it.
    pub async fn verify(&self, presented: &str) -> bool {
        match self.inner.read().await.as_ref() {
            Some(token) => token.verify(presented),
            None => false,
        }
    }
}

impl fmt::Debug for CallbackTokenState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackTokenState").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_requires_exact_match() {
        let token = CallbackToken::new("abc-123");
        assert!(token.verify("abc-123"));
        assert!(!token.verify("abc-124"));
        assert!(!token.verify("abc-1234"));
        assert!(!token.verify("Bearer abc-123"));
        assert!(!token.verify(""));
    }

    #[test]
    fn debug_does_not_leak_token() {
        let token = CallbackToken::new("super-secret");
        assert!(!format!("{:?}", token).contains("super-secret"));
    }

    #[tokio::test]
    async fn empty_state_rejects_everything() {
        let state = CallbackTokenState::new();
        assert!(state.current().await.is_none());
        assert!(!state.verify("").await);
        assert!(!state.verify("anything").await);
    }

    #[tokio::test]
    async fn replace_swaps_active_token_for_all_clones() {
        let state = CallbackTokenState::new();
        let reader = state.clone();

        state.replace(CallbackToken::new("first")).await;
        assert!(reader.verify("first").await);

        state.replace(CallbackToken::new("second")).await;
        assert!(!reader.verify("first").await);
        assert!(reader.verify("second").await);
        assert_eq!(reader.current().await, Some(CallbackToken::new("second")));
    }
}
