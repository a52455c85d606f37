//! HTTP adapter - inbound webhook API and its listener.
//!
//! - `webhook` - handlers and routes for `/pbwebhook` and `/ping`
//! - [`app_router`] - the full router with tracing and timeout layers
//! - [`serve`] - binds the listener, over TLS when certificates are configured

pub mod webhook;

use std::net::SocketAddr;
use std::time::Duration;

use axum::extract::Request;
use axum::Router;
use axum_server::tls_rustls::RustlsConfig;
use axum_server::Handle;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::TlsFiles;

pub use webhook::{webhook_routes, WebhookAppState};

/// Build the relay's router.
pub fn app_router(state: WebhookAppState, request_timeout: Duration) -> Router {
    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request| {
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path()
        )
    });

    webhook_routes()
        .layer(TimeoutLayer::new(request_timeout))
        .layer(trace_layer)
        .with_state(state)
}

/// Serve `router` on `addr` until `handle` is told to shut down.
///
/// With `tls` set the listener speaks HTTPS via rustls; otherwise plain HTTP.
pub async fn serve(
    router: Router,
    addr: SocketAddr,
    tls: Option<TlsFiles>,
    handle: Handle,
) -> std::io::Result<()> {
    let service = router.into_make_service();

    match tls {
        Some(files) => {
            let rustls = RustlsConfig::from_pem_file(&files.cert, &files.key).await?;
            tracing::info!(%addr, "Listening for webhooks over HTTPS");
            axum_server::bind_rustls(addr, rustls)
                .handle(handle)
                .serve(service)
                .await
        }
        None => {
            tracing::warn!(%addr, "TLS not configured, listening over plain HTTP");
            axum_server::bind(addr).handle(handle).serve(service).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::CallbackTokenState;
    use axum::body::Body;
    use http::StatusCode;
    use std::path::PathBuf;
    use tower::ServiceExt;

    #[tokio::test]
    async fn app_router_serves_ping() {
        let router = app_router(
            WebhookAppState::new(CallbackTokenState::new()),
            Duration::from_secs(5),
        );

        let response = router
            .oneshot(Request::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let router = app_router(
            WebhookAppState::new(CallbackTokenState::new()),
            Duration::from_secs(5),
        );

        let response = router
            .oneshot(Request::get("/webhooks").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn serve_fails_on_missing_certificate() {
        let router = app_router(
            WebhookAppState::new(CallbackTokenState::new()),
            Duration::from_secs(5),
        );
        let tls = TlsFiles {
            cert: PathBuf::from("/nonexistent/cert.pem"),
            key: PathBuf::from("/nonexistent/key.pem"),
        };

        let result = serve(
            router,
            "127.0.0.1:0".parse().unwrap(),
            Some(tls),
            Handle::new(),
        )
        .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn serve_stops_on_graceful_shutdown() {
        let router = app_router(
            WebhookAppState::new(CallbackTokenState::new()),
            Duration::from_secs(5),
        );
        let handle = Handle::new();
        let server = tokio::spawn(serve(
            router,
            "127.0.0.1:0".parse().unwrap(),
            None,
            handle.clone(),
        ));

        assert!(handle.listening().await.is_some());
        handle.graceful_shutdown(Some(Duration::from_secs(1)));

        tokio::time::timeout(Duration::from_secs(5), server)
            .await
            .expect("server stopped")
            .unwrap()
            .unwrap();
    }
}
