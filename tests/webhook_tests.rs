use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use std::sync::{Arc, Mutex};

use bonsai_appraiser::bot::replies::SIZE_PROMPT;
use bonsai_appraiser::bot::webhook::{callback_handler, AppState, SIGNATURE_HEADER};
use bonsai_appraiser::bot::Orchestrator;
use bonsai_appraiser::errors::BotError;
use bonsai_appraiser::generation::{AppraisalGenerator, AppraisalRequest};
use bonsai_appraiser::messaging::{ContentFetcher, ReplySender};
use bonsai_appraiser::pending_store::PendingImageStore;
use bonsai_appraiser::signature::compute_signature;

const SECRET: &str = "test-channel-secret";

struct StubFetcher;

#[async_trait]
impl ContentFetcher for StubFetcher {
    async fn get_message_content(&self, message_id: &str) -> Result<Vec<u8>, BotError> {
        Ok(message_id.as_bytes().to_vec())
    }
}

struct StubGenerator;

#[async_trait]
impl AppraisalGenerator for StubGenerator {
    async fn generate(&self, _request: &AppraisalRequest) -> Result<String, BotError> {
        Ok("healthy specimen, estimated range ¥5,000–¥8,000".to_string())
    }
}

struct RecordingReplies {
    sent: Mutex<Vec<String>>,
}

#[async_trait]
impl ReplySender for RecordingReplies {
    async fn reply(&self, _reply_token: &str, text: &str) -> Result<(), BotError> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

fn app_state() -> (AppState, Arc<PendingImageStore>, Arc<RecordingReplies>) {
    let store = Arc::new(PendingImageStore::new());
    let replies = Arc::new(RecordingReplies {
        sent: Mutex::new(Vec::new()),
    });
    let orchestrator = Arc::new(Orchestrator::new(
        store.clone(),
        Arc::new(StubFetcher),
        None,
        Arc::new(StubGenerator),
        replies.clone(),
    ));
    (
        AppState {
            channel_secret: SECRET.to_string(),
            orchestrator,
        },
        store,
        replies,
    )
}

fn signed_headers(body: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let signature = compute_signature(SECRET, body.as_bytes());
    headers.insert(SIGNATURE_HEADER, signature.parse().unwrap());
    headers
}

const DELIVERY: &str = r#"{
    "events": [
        {
            "type": "message",
            "replyToken": "rt1",
            "source": { "type": "user", "userId": "u1" },
            "message": { "type": "image", "id": "m1" }
        },
        {
            "type": "message",
            "replyToken": "rt2",
            "source": { "type": "user", "userId": "u1" },
            "message": { "type": "text", "text": "15cm" }
        }
    ]
}"#;

/// A signed delivery is processed event by event, in order
#[tokio::test]
async fn test_valid_delivery_processed_in_order() {
    let (state, store, replies) = app_state();

    let response = callback_handler(
        State(state),
        signed_headers(DELIVERY),
        Bytes::from(DELIVERY.as_bytes().to_vec()),
    )
    .await;

    assert_eq!(response, Ok("OK"));
    assert_eq!(
        *replies.sent.lock().unwrap(),
        vec![
            SIZE_PROMPT.to_string(),
            "healthy specimen, estimated range ¥5,000–¥8,000".to_string(),
        ]
    );
    assert!(!store.contains("u1"));
}

/// An invalid signature rejects the request before any event is processed
#[tokio::test]
async fn test_invalid_signature_rejected() {
    let (state, store, replies) = app_state();

    let mut headers = HeaderMap::new();
    let wrong = compute_signature("some-other-secret", DELIVERY.as_bytes());
    headers.insert(SIGNATURE_HEADER, wrong.parse().unwrap());

    let response = callback_handler(
        State(state),
        headers,
        Bytes::from(DELIVERY.as_bytes().to_vec()),
    )
    .await;

    assert_eq!(response, Err(StatusCode::BAD_REQUEST));
    assert!(replies.sent.lock().unwrap().is_empty());
    assert_eq!(store.entry_count(), 0);
}

/// A missing signature header is rejected the same way
#[tokio::test]
async fn test_missing_signature_rejected() {
    let (state, _store, replies) = app_state();

    let response = callback_handler(
        State(state),
        HeaderMap::new(),
        Bytes::from(DELIVERY.as_bytes().to_vec()),
    )
    .await;

    assert_eq!(response, Err(StatusCode::BAD_REQUEST));
    assert!(replies.sent.lock().unwrap().is_empty());
}

/// A correctly signed but undecodable body is rejected
#[tokio::test]
async fn test_malformed_payload_rejected() {
    let (state, _store, replies) = app_state();
    let body = "not json";

    let response = callback_handler(
        State(state),
        signed_headers(body),
        Bytes::from(body.as_bytes().to_vec()),
    )
    .await;

    assert_eq!(response, Err(StatusCode::BAD_REQUEST));
    assert!(replies.sent.lock().unwrap().is_empty());
}
