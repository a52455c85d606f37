//! Axum router configuration for the webhook endpoints.

use axum::{routing::get, Router};

use super::handlers::{
    handle_event_notification, handle_subscription_validation, ping, WebhookAppState,
};

/// Create the webhook router.
///
/// # Routes
/// - `GET /pbwebhook` - Subscription validation (echoes `validationToken`)
/// - `POST /pbwebhook` - Event notification
/// - `GET /ping` - Liveness check, no authentication
pub fn webhook_routes() -> Router<WebhookAppState> {
    Router::new()
        .route(
            "/pbwebhook",
            get(handle_subscription_validation).post(handle_event_notification),
        )
        .route("/ping", get(ping))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::subscription::{CallbackToken, CallbackTokenState};
    use axum::body::{to_bytes, Body};
    use http::{header::AUTHORIZATION, Request, StatusCode};
    use tower::ServiceExt;

    async fn app(token: Option<&str>) -> Router {
        let token_state = CallbackTokenState::new();
        if let Some(token) = token {
            token_state.replace(CallbackToken::new(token)).await;
        }
        webhook_routes().with_state(WebhookAppState::new(token_state))
    }

    #[tokio::test]
    async fn ping_needs_no_auth() {
        let response = app(None)
            .await
            .oneshot(Request::get("/ping").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"Pong");
    }

    #[tokio::test]
    async fn pbwebhook_routes_both_methods() {
        let router = app(Some("secret")).await;

        let get = router
            .clone()
            .oneshot(
                Request::get("/pbwebhook?validationToken=v")
                    .header(AUTHORIZATION, "secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(get.status(), StatusCode::OK);

        let post = router
            .oneshot(
                Request::post("/pbwebhook")
                    .header(AUTHORIZATION, "secret")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(post.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn other_methods_are_not_allowed() {
        let response = app(Some("secret"))
            .await
            .oneshot(
                Request::delete("/pbwebhook")
                    .header(AUTHORIZATION, "secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
