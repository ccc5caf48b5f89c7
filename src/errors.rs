//! # Bot Error Types Module
//!
//! This module defines custom error types used throughout the webhook and
//! appraisal pipeline. It provides structured error handling for signature
//! validation, payload decoding, and the external service calls.

/// Custom error types for webhook and appraisal operations
#[derive(Debug, Clone)]
pub enum BotError {
    /// Webhook signature did not match the request body
    SignatureInvalid,
    /// Webhook payload decoding errors
    PayloadDecode(String),
    /// Image content download errors
    ContentFetch(String),
    /// Vision labeling service errors
    VisionApi(String),
    /// Appraisal generation service errors
    GenerationApi(String),
    /// Reply delivery errors
    Delivery(String),
}

impl std::fmt::Display for BotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotError::SignatureInvalid => write!(f, "invalid webhook signature"),
            BotError::PayloadDecode(msg) => write!(f, "payload decode error: {msg}"),
            BotError::ContentFetch(msg) => write!(f, "content fetch error: {msg}"),
            BotError::VisionApi(msg) => write!(f, "Vision API error: {msg}"),
            BotError::GenerationApi(msg) => write!(f, "Generation API error: {msg}"),
            BotError::Delivery(msg) => write!(f, "delivery error: {msg}"),
        }
    }
}

impl std::error::Error for BotError {}
