//! Process lifecycle: delayed registration on startup, bounded teardown on shutdown.
//!
//! ```text
//! start ──► sleep(registration_delay) ──► register_for_notifications
//!   │
//! signal ──► abort pending registration ──► unregister ──► listener graceful shutdown
//!            └───────────────── one shutdown_timeout budget ──────────────────┘
//! ```

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum_server::Handle;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::domain::subscription::SubscriptionError;

use super::subscription_service::SubscriptionService;

/// Timing of the lifecycle phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleConfig {
    /// Wait before registering so the listener is bound when the API
    /// sends its validation request.
    pub registration_delay: Duration,

    /// Overall cap for teardown: unregistration and connection draining
    /// share this one budget.
    pub shutdown_timeout: Duration,
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self {
            registration_delay: Duration::from_secs(10),
            shutdown_timeout: Duration::from_secs(10),
        }
    }
}

/// How the shutdown unregistration ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShutdownOutcome {
    Unregistered,
    Failed(SubscriptionError),
    TimedOut,
}

/// Drives registration and teardown around the server's lifetime.
pub struct LifecycleController {
    service: Arc<SubscriptionService>,
    config: LifecycleConfig,
}

impl LifecycleController {
    pub fn new(service: Arc<SubscriptionService>, config: LifecycleConfig) -> Self {
        Self { service, config }
    }

    /// Register once, after the settling delay, on a background task.
    ///
    /// A failure is logged; the server keeps serving.
    pub fn spawn_registration(&self) -> JoinHandle<Result<(), SubscriptionError>> {
        let service = Arc::clone(&self.service);
        let delay = self.config.registration_delay;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            let result = service.register_for_notifications().await;
            match &result {
                Ok(()) => tracing::info!("Registered for notifications"),
                Err(e) => tracing::error!(
                    error = %e,
                    code = %e.code(),
                    "Registration for notifications failed; callbacks will be rejected"
                ),
            }
            result
        })
    }

    /// Remove the relay's subscriptions, giving up after the shutdown timeout.
    pub async fn shutdown(&self) -> ShutdownOutcome {
        self.shutdown_by(Instant::now() + self.config.shutdown_timeout).await
    }

    async fn shutdown_by(&self, deadline: Instant) -> ShutdownOutcome {
        tracing::info!("Cleaning up");

        let outcome = match tokio::time::timeout_at(
            deadline,
            self.service.unregister_for_notifications(),
        )
        .await
        {
            Ok(Ok(())) => ShutdownOutcome::Unregistered,
            Ok(Err(e)) => {
                tracing::error!(error = %e, "Unregistering from notifications failed");
                ShutdownOutcome::Failed(e)
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.config.shutdown_timeout.as_secs(),
                    "Unregistering from notifications timed out"
                );
                ShutdownOutcome::TimedOut
            }
        };

        tracing::info!(?outcome, "Done cleaning up");
        outcome
    }

    /// Run the full lifecycle around a server controlled by `server`.
    ///
    /// Registration is spawned immediately (after its delay). When `signal`
    /// resolves, a still-pending registration is aborted, subscriptions are
    /// removed, and only then is the listener told to shut down. Both steps
    /// draw on a single `shutdown_timeout` budget.
    pub async fn run_until<F>(&self, signal: F, server: Handle) -> ShutdownOutcome
    where
        F: Future<Output = ()>,
    {
        let registration = self.spawn_registration();

        signal.await;
        let deadline = Instant::now() + self.config.shutdown_timeout;

        if !registration.is_finished() {
            tracing::warn!("Shutdown requested before registration completed");
            registration.abort();
        }

        let outcome = self.shutdown_by(deadline).await;

        let remaining = deadline.saturating_duration_since(Instant::now());
        tracing::info!(remaining_ms = remaining.as_millis() as u64, "Stopping listener");
        server.graceful_shutdown(Some(remaining));
        outcome
    }
}
