//! pb-webhook-relay binary: load configuration, serve callbacks, clean up on exit.

use std::sync::Arc;

use axum_server::Handle;
use tokio::signal;

use pb_webhook_relay::adapters::http::{app_router, serve, WebhookAppState};
use pb_webhook_relay::adapters::product_api::HttpSubscriptionRepository;
use pb_webhook_relay::adapters::token::UuidTokenGenerator;
use pb_webhook_relay::application::{LifecycleController, ShutdownOutcome, SubscriptionService};
use pb_webhook_relay::config::AppConfig;
use pb_webhook_relay::domain::subscription::CallbackTokenState;
use pb_webhook_relay::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    telemetry::init_tracing(&config.server.log_level, config.is_production())?;

    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid configuration");
        return Err(e.into());
    }
    let addr = config.server.socket_addr()?;

    let repository = HttpSubscriptionRepository::new(config.api.product_api())?;
    let token_state = CallbackTokenState::new();
    let service = Arc::new(SubscriptionService::new(
        Arc::new(repository),
        Arc::new(UuidTokenGenerator::new()),
        token_state.clone(),
    ));
    let controller = LifecycleController::new(service, config.lifecycle());

    let router = app_router(
        WebhookAppState::new(token_state),
        config.server.request_timeout(),
    );
    let handle = Handle::new();
    let mut server = tokio::spawn(serve(
        router,
        addr,
        config.server.tls_files(),
        handle.clone(),
    ));

    tokio::select! {
        result = &mut server => {
            tracing::error!(?result, "Listener exited before shutdown was requested");
            result??;
            return Ok(());
        }
        outcome = controller.run_until(shutdown_signal(), handle) => {
            if outcome != ShutdownOutcome::Unregistered {
                tracing::warn!(?outcome, "Subscriptions may remain registered");
            }
        }
    }

    server.await??;
    tracing::info!("Relay stopped");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
