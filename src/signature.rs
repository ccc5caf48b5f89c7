//! Webhook signature validation.
//!
//! The messaging platform signs each webhook delivery with the base64-encoded
//! HMAC-SHA256 of the raw request body, keyed by the channel secret.

use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Compute the expected signature for a request body
pub fn compute_signature(channel_secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(channel_secret.as_bytes())
        .expect("HMAC accepts keys of any length");
    mac.update(body);
    BASE64_STANDARD.encode(mac.finalize().into_bytes())
}

/// Validate the signature header against the raw request body.
///
/// Returns `false` for a missing, empty, undecodable, or mismatched header.
/// Comparison happens inside the MAC verifier, in constant time.
pub fn validate_signature(
    channel_secret: &str,
    signature_header: Option<&str>,
    body: &[u8],
) -> bool {
    let signature = match signature_header {
        Some(value) => value.trim(),
        None => return false,
    };
    if signature.is_empty() {
        return false;
    }
    let Ok(signature_bytes) = BASE64_STANDARD.decode(signature) else {
        return false;
    };
    let Ok(mut mac) = HmacSha256::new_from_slice(channel_secret.as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&signature_bytes).is_ok()
}
