//! # Configuration Module
//!
//! This module defines the process configuration, read once from the
//! environment at startup: platform credentials, generation settings,
//! and the optional pending-image expiry.

use anyhow::{Context, Result};
use std::env;

// Constants for application configuration
pub const DEFAULT_GENERATION_MODEL: &str = "gpt-4-turbo";
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Configuration structure for the webhook bot
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Messaging platform access token, used for content download and replies
    pub channel_access_token: String,
    /// Messaging platform channel secret, keys the webhook signature
    pub channel_secret: String,
    /// API key for the appraisal generation service
    pub generation_api_key: String,
    /// Optional API key for the vision labeling service; unset disables labeling
    pub vision_api_key: Option<String>,
    /// Model identifier for appraisal generation
    pub generation_model: String,
    /// Maximum tokens for one generated appraisal
    pub max_tokens: u32,
    /// Optional expiry for pending images, in seconds; unset means never
    pub pending_image_ttl_secs: Option<u64>,
    /// Socket address the webhook server binds to
    pub bind_addr: String,
}

impl AppConfig {
    /// Read the configuration from the environment.
    ///
    /// Secrets are required; everything else falls back to the defaults above.
    pub fn from_env() -> Result<Self> {
        let channel_access_token = env::var("LINE_CHANNEL_ACCESS_TOKEN")
            .context("LINE_CHANNEL_ACCESS_TOKEN must be set")?;
        let channel_secret =
            env::var("LINE_CHANNEL_SECRET").context("LINE_CHANNEL_SECRET must be set")?;
        let generation_api_key =
            env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?;

        let vision_api_key = env::var("VISION_API_KEY").ok().filter(|key| !key.is_empty());

        let generation_model = env::var("GENERATION_MODEL")
            .unwrap_or_else(|_| DEFAULT_GENERATION_MODEL.to_string());

        let pending_image_ttl_secs = match env::var("PENDING_IMAGE_TTL_SECS") {
            Ok(raw) => Some(
                raw.parse::<u64>()
                    .context("PENDING_IMAGE_TTL_SECS must be a number of seconds")?,
            ),
            Err(_) => None,
        };

        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Self {
            channel_access_token,
            channel_secret,
            generation_api_key,
            vision_api_key,
            generation_model,
            max_tokens: DEFAULT_MAX_TOKENS,
            pending_image_ttl_secs,
            bind_addr,
        })
    }
}
