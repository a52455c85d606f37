//! Mock subscription repository for testing.
//!
//! Provides an in-memory stand-in for the external API's `/webhooks`
//! resource. Supports:
//! - Error injection per method, and on the k-th deletion
//! - Call tracking (including every individual deletion)

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::subscription::{
    CallbackToken, EventType, RecordedEvent, SubscriptionError, SubscriptionRecord,
    SUBSCRIPTION_NAME,
};
use crate::ports::SubscriptionRepository;

/// Mock subscription repository.
///
/// # Example
///
/// ```ignore
/// let mock = MockSubscriptionRepository::new();
/// mock.register(&token).await?;
/// mock.fail_delete_at(2, SubscriptionError::upstream_status("delete subscription", 500, ""));
///
/// let records = mock.list().await?;
/// let result = mock.unregister(&records).await;
/// assert_eq!(mock.call_count("delete"), 1);
/// ```
#[derive(Default)]
pub struct MockSubscriptionRepository {
    inner: Arc<Mutex<MockState>>,
}

#[derive(Default)]
struct MockState {
    /// Subscriptions currently "on the server", in creation order.
    subscriptions: Vec<SubscriptionRecord>,

    /// Tokens passed to `register`, in call order.
    registered_tokens: Vec<CallbackToken>,

    /// Counter for generated subscription IDs.
    next_id: u64,

    /// Specific errors by method name.
    method_errors: HashMap<String, SubscriptionError>,

    /// Fail the k-th deletion (1-based) with the given error.
    delete_failure: Option<(usize, SubscriptionError)>,

    /// Names of called methods, in call order.
    call_log: Vec<String>,
}

impl MockSubscriptionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Configuration Methods
    // ════════════════════════════════════════════════════════════════════════════

    /// Set an error for a specific method (`register`, `list`, `unregister`).
    pub fn set_method_error(&self, method: &str, error: SubscriptionError) {
        self.state().method_errors.insert(method.to_string(), error);
    }

    /// Make the `k`-th individual deletion (1-based) fail.
    pub fn fail_delete_at(&self, k: usize, error: SubscriptionError) {
        self.state().delete_failure = Some((k, error));
    }

    /// Clear all configured errors.
    pub fn clear_errors(&self) {
        let mut state = self.state();
        state.method_errors.clear();
        state.delete_failure = None;
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Inspection
    // ════════════════════════════════════════════════════════════════════════════

    /// Subscriptions currently stored.
    pub fn subscriptions(&self) -> Vec<SubscriptionRecord> {
        self.state().subscriptions.clone()
    }

    /// Tokens passed to `register`, oldest first.
    pub fn registered_tokens(&self) -> Vec<CallbackToken> {
        self.state().registered_tokens.clone()
    }

    /// Check if a method was called.
    pub fn was_called(&self, method: &str) -> bool {
        self.state().call_log.iter().any(|c| c == method)
    }

    /// Get count of calls to a method. Individual deletions are logged as `delete`.
    pub fn call_count(&self, method: &str) -> usize {
        self.state()
            .call_log
            .iter()
            .filter(|c| *c == method)
            .count()
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Internal Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn record_call(&self, method: &str) {
        self.state().call_log.push(method.to_string());
    }

    fn check_error(&self, method: &str) -> Result<(), SubscriptionError> {
        match self.state().method_errors.get(method) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl Clone for MockSubscriptionRepository {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

#[async_trait]
impl SubscriptionRepository for MockSubscriptionRepository {
    async fn register(&self, token: &CallbackToken) -> Result<(), SubscriptionError> {
        self.record_call("register");
        self.check_error("register")?;

        let mut state = self.state();
        state.next_id += 1;
        let record = SubscriptionRecord {
            id: format!("sub_mock_{}", state.next_id),
            created_at: Utc::now(),
            name: SUBSCRIPTION_NAME.to_string(),
            events: EventType::ALL
                .into_iter()
                .map(|event_type| RecordedEvent {
                    event_type: event_type.as_str().to_string(),
                })
                .collect(),
        };
        state.subscriptions.push(record);
        state.registered_tokens.push(token.clone());
        Ok(())
    }

    async fn list(&self) -> Result<Vec<SubscriptionRecord>, SubscriptionError> {
        self.record_call("list");
        self.check_error("list")?;

        let state = self.state();
        if state.subscriptions.is_empty() {
            return Err(SubscriptionError::not_found("No subscriptions found"));
        }
        Ok(state.subscriptions.clone())
    }

    async fn unregister(&self, records: &[SubscriptionRecord]) -> Result<(), SubscriptionError> {
        self.record_call("unregister");
        self.check_error("unregister")?;

        for (index, record) in records.iter().enumerate() {
            self.record_call("delete");

            let mut state = self.state();
            if let Some((k, error)) = &state.delete_failure {
                if *k == index + 1 {
                    return Err(error.clone());
                }
            }
            state.subscriptions.retain(|s| s.id != record.id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn register_then_list_returns_created_subscription() {
        let mock = MockSubscriptionRepository::new();
        let token = CallbackToken::new("token-1");

        mock.register(&token).await.unwrap();
        let records = mock.list().await.unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, SUBSCRIPTION_NAME);
        assert_eq!(records[0].event_types(), EventType::ALL.to_vec());
        assert_eq!(mock.registered_tokens(), vec![token]);
    }

    #[tokio::test]
    async fn list_of_nothing_is_not_found() {
        let mock = MockSubscriptionRepository::new();
        let err = mock.list().await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn delete_failure_stops_later_deletions() {
        let mock = MockSubscriptionRepository::new();
        for i in 0..4 {
            mock.register(&CallbackToken::new(format!("t{}", i))).await.unwrap();
        }
        mock.fail_delete_at(2, SubscriptionError::upstream_status("delete subscription", 500, ""));

        let records = mock.list().await.unwrap();
        let err = mock.unregister(&records).await.unwrap_err();

        assert_eq!(err.upstream_status_code(), Some(500));
        assert_eq!(mock.call_count("delete"), 2);
        assert_eq!(mock.subscriptions().len(), 3);
    }

    #[tokio::test]
    async fn method_error_is_returned() {
        let mock = MockSubscriptionRepository::new();
        mock.set_method_error(
            "register",
            SubscriptionError::transport("registration", "connection reset"),
        );

        assert!(mock.register(&CallbackToken::new("t")).await.is_err());
        assert!(mock.subscriptions().is_empty());

        mock.clear_errors();
        assert!(mock.register(&CallbackToken::new("t")).await.is_ok());
        assert_eq!(mock.call_count("register"), 2);
    }
}
