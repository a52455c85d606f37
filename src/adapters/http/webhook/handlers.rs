//! HTTP handlers for the webhook endpoints.
//!
//! Every callback walks the same states:
//!
//! ```text
//! Received ──► AuthChecked ──► Accepted
//!    │
//!    └──────────────────────► Rejected (401 / 400)
//! ```
//!
//! The `Authorization` header is checked before the query string or body is
//! looked at, so an unauthenticated caller always gets 401.

use axum::body::to_bytes;
use axum::extract::{Query, Request, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use http::header::AUTHORIZATION;
use http::{HeaderMap, StatusCode};
use serde_json::{Map, Value};

use crate::domain::foundation::ErrorCode;
use crate::domain::subscription::{CallbackTokenState, EventSummary, SubscriptionError};

use super::dto::{ErrorResponse, ValidationParams};

/// Largest event notification body accepted.
pub const MAX_EVENT_BODY_BYTES: usize = 1024 * 1024;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the webhook handlers.
///
/// Holds a read handle to the callback token written by the subscription
/// service.
#[derive(Clone, Debug)]
pub struct WebhookAppState {
    pub token_state: CallbackTokenState,
}

impl WebhookAppState {
    pub fn new(token_state: CallbackTokenState) -> Self {
        Self { token_state }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /ping - Liveness check
pub async fn ping() -> &'static str {
    tracing::debug!("Ping invoked");
    "Pong"
}

/// GET /pbwebhook - Subscription validation
///
/// Echoes the `validationToken` query parameter as `text/plain`.
pub async fn handle_subscription_validation(
    State(state): State<WebhookAppState>,
    request: Request,
) -> Result<impl IntoResponse, WebhookApiError> {
    authenticate(&state, request.headers()).await?;

    let Query(pairs) =
        Query::<Vec<(String, String)>>::try_from_uri(request.uri()).map_err(|e| {
            tracing::warn!(error = %e, "Could not parse validation query");
            SubscriptionError::bad_request("Could not parse query string")
        })?;

    let validation_token = ValidationParams::from_pairs(pairs)
        .validation_token
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            tracing::warn!("Validation request without validation token");
            SubscriptionError::bad_request("Could not find validation token")
        })?;

    tracing::info!("Answered subscription validation request");
    Ok((StatusCode::OK, validation_token))
}

/// POST /pbwebhook - Event notification
///
/// Accepts any JSON object and acknowledges it with 204.
pub async fn handle_event_notification(
    State(state): State<WebhookAppState>,
    request: Request,
) -> Result<impl IntoResponse, WebhookApiError> {
    authenticate(&state, request.headers()).await?;

    let body = to_bytes(request.into_body(), MAX_EVENT_BODY_BYTES)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Could not read event notification body");
            SubscriptionError::bad_request("Could not read request body")
        })?;

    let payload: Map<String, Value> = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(error = %e, "Invalid JSON body in event notification");
        SubscriptionError::bad_request("Invalid json body")
    })?;

    let summary = EventSummary::from_payload(&payload);
    tracing::info!(
        event_id = summary.id.as_deref().unwrap_or("-"),
        event_type = summary.event_type.as_deref().unwrap_or("-"),
        target = summary.target.as_deref().unwrap_or("-"),
        "Received event notification"
    );
    tracing::debug!(payload = %serde_json::Value::Object(payload), "Event data");

    Ok(StatusCode::NO_CONTENT)
}

/// Check the `Authorization` header against the active callback token.
async fn authenticate(state: &WebhookAppState, headers: &HeaderMap) -> Result<(), SubscriptionError> {
    let presented = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());

    let authenticated = match presented {
        Some(value) => state.token_state.verify(value).await,
        None => false,
    };

    if !authenticated {
        tracing::warn!(
            header_present = presented.is_some(),
            "Rejected callback with wrong or missing auth key"
        );
        return Err(SubscriptionError::unauthenticated("wrong or missing auth key"));
    }
    Ok(())
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts subscription errors to HTTP responses.
#[derive(Debug)]
pub struct WebhookApiError(SubscriptionError);

impl From<SubscriptionError> for WebhookApiError {
    fn from(err: SubscriptionError) -> Self {
        Self(err)
    }
}

impl IntoResponse for WebhookApiError {
    fn into_response(self) -> Response {
        let code = self.0.code();
        let status = match code {
            ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = ErrorResponse::new(code.to_string(), self.0.to_string());
        (status, Json(body)).into_response()
    }
}
