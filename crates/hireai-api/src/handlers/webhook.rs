//! Identity provider webhook intake.

use axum::Json;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use tracing::warn;

use hireai_core::error::AppError;
use hireai_entity::identity::WebhookEvent;

use crate::dto::response::WebhookAck;
use crate::error::ApiErrorResponse;
use crate::state::AppState;

const SIGNATURE_HEADER: &str = "svix-signature";
const TIMESTAMP_HEADER: &str = "svix-timestamp";

/// POST /api/webhook
///
/// The body is taken as raw bytes; the signature covers exactly what was
/// received.
pub async fn receive(State(state): State<AppState>, headers: HeaderMap, body: Bytes) -> Response {
    let signature = header_str(&headers, SIGNATURE_HEADER);
    let timestamp = header_str(&headers, TIMESTAMP_HEADER);

    if let Err(rejection) = state.verifier.check(&body, signature, timestamp) {
        warn!(reason = %rejection, "Webhook signature rejected");
        return reject(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Invalid signature");
    }

    match process(&state, &body).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(WebhookAck {
                received: true,
                outcome: outcome.to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            warn!(kind = %e.kind, error = %e.message, "Webhook processing failed");
            reject(StatusCode::BAD_REQUEST, "WEBHOOK_PROCESSING_FAILED", &e.message)
        }
    }
}

async fn process(state: &AppState, body: &[u8]) -> Result<&'static str, AppError> {
    let event: WebhookEvent = serde_json::from_slice(body)?;
    let outcome = state.reconciler.apply(&event).await?;
    Ok(outcome.label())
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers.get(name).and_then(|v| v.to_str().ok())
}

fn reject(status: StatusCode, error: &str, message: &str) -> Response {
    (
        status,
        Json(ApiErrorResponse {
            error: error.to_string(),
            message: message.to_string(),
        }),
    )
        .into_response()
}
