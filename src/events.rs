//! # Inbound Event Normalizer Module
//!
//! This module is the only place the messaging platform's wire format is
//! interpreted. It validates the webhook signature, decodes the JSON
//! envelope, and emits typed domain events; everything downstream operates
//! on [`InboundEvent`] values only.

use serde::Deserialize;
use tracing::debug;

use crate::errors::BotError;
use crate::signature::validate_signature;

/// A normalized inbound event, tagged with the sending user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    /// The user sent an image; its bytes are fetched separately by message id
    ImageReceived {
        user_id: String,
        message_id: String,
        reply_token: String,
    },
    /// The user sent a text message
    TextReceived {
        user_id: String,
        text: String,
        reply_token: String,
    },
}

/// Webhook envelope as delivered by the platform
#[derive(Debug, Deserialize)]
struct WebhookEnvelope {
    #[serde(default)]
    events: Vec<WebhookEvent>,
}

#[derive(Debug, Deserialize)]
struct WebhookEvent {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(rename = "replyToken")]
    reply_token: Option<String>,
    source: Option<EventSource>,
    message: Option<EventMessage>,
}

#[derive(Debug, Deserialize)]
struct EventSource {
    #[serde(rename = "userId")]
    user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventMessage {
    #[serde(rename = "type")]
    message_type: String,
    id: Option<String>,
    text: Option<String>,
}

/// Validate and decode a raw webhook delivery into domain events.
///
/// Fails with [`BotError::SignatureInvalid`] before any parsing when the
/// signature header does not match the body. Event and message kinds the bot
/// does not handle are skipped without error, preserving delivery order of
/// the rest.
pub fn normalize_webhook(
    channel_secret: &str,
    signature_header: Option<&str>,
    body: &[u8],
) -> Result<Vec<InboundEvent>, BotError> {
    if !validate_signature(channel_secret, signature_header, body) {
        return Err(BotError::SignatureInvalid);
    }

    let envelope: WebhookEnvelope =
        serde_json::from_slice(body).map_err(|e| BotError::PayloadDecode(e.to_string()))?;

    Ok(envelope
        .events
        .into_iter()
        .filter_map(into_domain_event)
        .collect())
}

fn into_domain_event(event: WebhookEvent) -> Option<InboundEvent> {
    if event.event_type != "message" {
        debug!(event_type = %event.event_type, "Skipping unhandled event type");
        return None;
    }
    let reply_token = event.reply_token?;
    let user_id = event.source?.user_id?;
    let message = event.message?;

    match message.message_type.as_str() {
        "image" => Some(InboundEvent::ImageReceived {
            user_id,
            message_id: message.id?,
            reply_token,
        }),
        "text" => Some(InboundEvent::TextReceived {
            user_id,
            text: message.text?,
            reply_token,
        }),
        other => {
            debug!(message_type = %other, "Skipping unhandled message type");
            None
        }
    }
}
