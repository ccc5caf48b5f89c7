//! HTTP server for the messaging-platform webhook.

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, warn};

use super::orchestrator::Orchestrator;
use crate::errors::BotError;
use crate::events::normalize_webhook;

pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Channel secret keying the webhook signature
    pub channel_secret: String,
    /// The conversation state machine
    pub orchestrator: Arc<Orchestrator>,
}

/// Build the HTTP router for the bot
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/callback", post(callback_handler))
        .route("/health", get(health_check))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Handle one webhook delivery.
///
/// Validates the signature over the raw body, normalizes the payload into
/// domain events, and feeds them to the orchestrator strictly in delivery
/// order. An invalid signature rejects the whole request before any event is
/// processed.
pub async fn callback_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<&'static str, StatusCode> {
    let signature = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());

    let events = match normalize_webhook(&state.channel_secret, signature, &body) {
        Ok(events) => events,
        Err(BotError::SignatureInvalid) => {
            warn!("Rejected webhook delivery with invalid signature");
            return Err(StatusCode::BAD_REQUEST);
        }
        Err(e) => {
            warn!(error = %e, "Failed to decode webhook payload");
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    debug!(event_count = events.len(), "Webhook delivery decoded");

    for event in events {
        state.orchestrator.handle_event(event).await;
    }

    Ok("OK")
}
