use bonsai_appraiser::errors::BotError;
use bonsai_appraiser::events::{normalize_webhook, InboundEvent};
use bonsai_appraiser::signature::compute_signature;

const SECRET: &str = "test-channel-secret";

fn signed(body: &str) -> (String, String) {
    (compute_signature(SECRET, body.as_bytes()), body.to_string())
}

/// Test decoding a delivery with image, text, and unhandled events
#[test]
fn test_normalizes_image_and_text_events() {
    let body = r#"{
        "events": [
            {
                "type": "message",
                "replyToken": "rt1",
                "source": { "type": "user", "userId": "u1" },
                "message": { "type": "image", "id": "m1" }
            },
            {
                "type": "follow",
                "replyToken": "rt2",
                "source": { "type": "user", "userId": "u1" }
            },
            {
                "type": "message",
                "replyToken": "rt3",
                "source": { "type": "user", "userId": "u1" },
                "message": { "type": "text", "text": "15cm" }
            }
        ]
    }"#;
    let (signature, body) = signed(body);

    let events = normalize_webhook(SECRET, Some(&signature), body.as_bytes())
        .expect("delivery should decode");

    assert_eq!(
        events,
        vec![
            InboundEvent::ImageReceived {
                user_id: "u1".to_string(),
                message_id: "m1".to_string(),
                reply_token: "rt1".to_string(),
            },
            InboundEvent::TextReceived {
                user_id: "u1".to_string(),
                text: "15cm".to_string(),
                reply_token: "rt3".to_string(),
            },
        ]
    );
}

/// Test that unhandled message types are skipped without error
#[test]
fn test_unhandled_message_types_are_skipped() {
    let body = r#"{
        "events": [
            {
                "type": "message",
                "replyToken": "rt1",
                "source": { "type": "user", "userId": "u1" },
                "message": { "type": "sticker", "id": "s1" }
            }
        ]
    }"#;
    let (signature, body) = signed(body);

    let events = normalize_webhook(SECRET, Some(&signature), body.as_bytes())
        .expect("delivery should decode");
    assert!(events.is_empty());
}

/// Test that an empty envelope decodes to no events
#[test]
fn test_empty_envelope() {
    for body in [r#"{"events":[]}"#, "{}"] {
        let (signature, body) = signed(body);
        let events = normalize_webhook(SECRET, Some(&signature), body.as_bytes())
            .expect("delivery should decode");
        assert!(events.is_empty());
    }
}

/// Test that a bad signature rejects the delivery before any parsing
#[test]
fn test_invalid_signature_rejected() {
    let body = r#"{"events":[]}"#;
    let signature = compute_signature("some-other-secret", body.as_bytes());

    let result = normalize_webhook(SECRET, Some(&signature), body.as_bytes());
    assert!(matches!(result, Err(BotError::SignatureInvalid)));

    let result = normalize_webhook(SECRET, None, body.as_bytes());
    assert!(matches!(result, Err(BotError::SignatureInvalid)));
}

/// Test that a correctly signed but malformed body is a decode error
#[test]
fn test_malformed_payload() {
    let body = "not json at all";
    let (signature, body) = signed(body);

    let result = normalize_webhook(SECRET, Some(&signature), body.as_bytes());
    assert!(matches!(result, Err(BotError::PayloadDecode(_))));
}
