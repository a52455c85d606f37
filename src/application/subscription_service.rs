//! SubscriptionService - registers and tears down the relay's webhook subscription.
//!
//! The service is the only writer of the callback token. Webhook handlers
//! read the same [`CallbackTokenState`] to authenticate callbacks.

use std::sync::Arc;

use crate::domain::subscription::{CallbackToken, CallbackTokenState, SubscriptionError};
use crate::ports::{SubscriptionRepository, TokenGenerator};

/// Orchestrates token generation and the subscription repository.
pub struct SubscriptionService {
    repository: Arc<dyn SubscriptionRepository>,
    token_generator: Arc<dyn TokenGenerator>,
    token_state: CallbackTokenState,
}

impl SubscriptionService {
    pub fn new(
        repository: Arc<dyn SubscriptionRepository>,
        token_generator: Arc<dyn TokenGenerator>,
        token_state: CallbackTokenState,
    ) -> Self {
        Self {
            repository,
            token_generator,
            token_state,
        }
    }

    /// Register a fresh subscription for feature events.
    ///
    /// A new callback token is generated and installed before the API is
    /// called. If generation fails nothing is sent and the previous token
    /// stays active.
    pub async fn register_for_notifications(&self) -> Result<(), SubscriptionError> {
        tracing::info!("Registering for notifications");

        let token = self.token_generator.generate()?;
        self.token_state.replace(token.clone()).await;

        self.repository.register(&token).await
    }

    /// Delete every subscription the API reports.
    ///
    /// Having no subscriptions is not an error: there is nothing to clean up.
    pub async fn unregister_for_notifications(&self) -> Result<(), SubscriptionError> {
        tracing::info!("Unregistering from notifications");

        let records = match self.repository.list().await {
            Ok(records) => records,
            Err(SubscriptionError::NotFound(message)) => {
                tracing::info!(reason = %message, "No subscriptions to remove");
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        tracing::info!(count = records.len(), "Removing subscriptions");
        self.repository.unregister(&records).await
    }

    /// The callback token currently accepted on inbound requests.
    pub async fn current_token(&self) -> Option<CallbackToken> {
        self.token_state.current().await
    }

    /// Shared handle to the callback token, for readers.
    pub fn token_state(&self) -> CallbackTokenState {
        self.token_state.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::product_api::MockSubscriptionRepository;
    use crate::adapters::token::UuidTokenGenerator;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ════════════════════════════════════════════════════════════════════════════
    // Test Doubles
    // ════════════════════════════════════════════════════════════════════════════

    struct FailingTokenGenerator;

    impl TokenGenerator for FailingTokenGenerator {
        fn generate(&self) -> Result<CallbackToken, SubscriptionError> {
            Err(SubscriptionError::token_generation("entropy source unavailable"))
        }
    }

    struct SequenceTokenGenerator {
        next: AtomicUsize,
    }

    impl TokenGenerator for SequenceTokenGenerator {
        fn generate(&self) -> Result<CallbackToken, SubscriptionError> {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            Ok(CallbackToken::new(format!("token-{}", n)))
        }
    }

    fn service_with(
        repository: &MockSubscriptionRepository,
        generator: Arc<dyn TokenGenerator>,
    ) -> SubscriptionService {
        SubscriptionService::new(
            Arc::new(repository.clone()),
            generator,
            CallbackTokenState::new(),
        )
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Registration
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn register_installs_token_and_registers_it() {
        let repository = MockSubscriptionRepository::new();
        let service = service_with(&repository, Arc::new(UuidTokenGenerator::new()));

        service.register_for_notifications().await.unwrap();

        let token = service.current_token().await.expect("token installed");
        assert_eq!(repository.registered_tokens(), vec![token.clone()]);
        assert!(service.token_state().verify(token.as_str()).await);
    }

    #[tokio::test]
    async fn register_aborts_before_network_when_token_generation_fails() {
        let repository = MockSubscriptionRepository::new();
        let service = service_with(&repository, Arc::new(FailingTokenGenerator));

        let err = service.register_for_notifications().await.unwrap_err();

        assert!(matches!(err, SubscriptionError::TokenGeneration(_)));
        assert!(!repository.was_called("register"));
        assert!(service.current_token().await.is_none());
    }

    #[tokio::test]
    async fn reregistration_replaces_token() {
        let repository = MockSubscriptionRepository::new();
        let service = service_with(
            &repository,
            Arc::new(SequenceTokenGenerator {
                next: AtomicUsize::new(0),
            }),
        );

        service.register_for_notifications().await.unwrap();
        service.register_for_notifications().await.unwrap();

        let state = service.token_state();
        assert!(!state.verify("token-0").await);
        assert!(state.verify("token-1").await);
    }

    #[tokio::test]
    async fn register_propagates_repository_error_unchanged() {
        let repository = MockSubscriptionRepository::new();
        let upstream = SubscriptionError::upstream_status("registration", 401, "invalid token");
        repository.set_method_error("register", upstream.clone());
        let service = service_with(&repository, Arc::new(UuidTokenGenerator::new()));

        let err = service.register_for_notifications().await.unwrap_err();

        assert_eq!(err, upstream);
        // Token was installed before the API call.
        assert!(service.current_token().await.is_some());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Unregistration
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn unregister_with_no_subscriptions_succeeds_without_deleting() {
        let repository = MockSubscriptionRepository::new();
        let service = service_with(&repository, Arc::new(UuidTokenGenerator::new()));

        service.unregister_for_notifications().await.unwrap();

        assert!(repository.was_called("list"));
        assert!(!repository.was_called("unregister"));
        assert_eq!(repository.call_count("delete"), 0);
    }

    #[tokio::test]
    async fn unregister_deletes_all_listed_subscriptions() {
        let repository = MockSubscriptionRepository::new();
        let service = service_with(&repository, Arc::new(UuidTokenGenerator::new()));
        for _ in 0..3 {
            service.register_for_notifications().await.unwrap();
        }

        service.unregister_for_notifications().await.unwrap();

        assert_eq!(repository.call_count("delete"), 3);
        assert!(repository.subscriptions().is_empty());
    }

    #[tokio::test]
    async fn unregister_stops_at_first_failed_deletion() {
        let repository = MockSubscriptionRepository::new();
        let service = service_with(&repository, Arc::new(UuidTokenGenerator::new()));
        for _ in 0..5 {
            service.register_for_notifications().await.unwrap();
        }
        repository.fail_delete_at(
            3,
            SubscriptionError::upstream_status("delete subscription", 503, "unavailable"),
        );

        let err = service.unregister_for_notifications().await.unwrap_err();

        assert_eq!(err.upstream_status_code(), Some(503));
        assert_eq!(repository.call_count("delete"), 3);
        assert_eq!(repository.subscriptions().len(), 3);
    }

    #[tokio::test]
    async fn unregister_propagates_list_failure() {
        let repository = MockSubscriptionRepository::new();
        repository.set_method_error(
            "list",
            SubscriptionError::serialization("Error parsing subscription list", "expected value"),
        );
        let service = service_with(&repository, Arc::new(UuidTokenGenerator::new()));

        let err = service.unregister_for_notifications().await.unwrap_err();

        assert!(matches!(err, SubscriptionError::Serialization { .. }));
        assert!(!repository.was_called("unregister"));
    }
}
