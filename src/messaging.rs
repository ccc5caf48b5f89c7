//! # Messaging Platform Client Module
//!
//! This module wraps the two platform calls the bot depends on: downloading
//! the content of an image message and sending a reply. Both sit behind
//! traits so the orchestrator can run against stubs in tests.

use async_trait::async_trait;
use tracing::debug;

use crate::errors::BotError;

pub const DEFAULT_API_BASE: &str = "https://api.line.me";
pub const DEFAULT_CONTENT_API_BASE: &str = "https://api-data.line.me";

/// Downloads the binary content of a received message
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn get_message_content(&self, message_id: &str) -> Result<Vec<u8>, BotError>;
}

/// Sends one text reply through the platform reply API
#[async_trait]
pub trait ReplySender: Send + Sync {
    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), BotError>;
}

/// Client for the messaging platform's content and reply endpoints
pub struct MessagingClient {
    http: reqwest::Client,
    access_token: String,
    api_base: String,
    content_api_base: String,
}

impl MessagingClient {
    pub fn new(access_token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            access_token,
            api_base: DEFAULT_API_BASE.to_string(),
            content_api_base: DEFAULT_CONTENT_API_BASE.to_string(),
        }
    }
}

#[async_trait]
impl ContentFetcher for MessagingClient {
    async fn get_message_content(&self, message_id: &str) -> Result<Vec<u8>, BotError> {
        let url = format!(
            "{}/v2/bot/message/{}/content",
            self.content_api_base, message_id
        );

        let response = self
            .http
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .send()
            .await
            .map_err(|e| BotError::ContentFetch(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(BotError::ContentFetch(format!("status {status}: {text}")));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| BotError::ContentFetch(e.to_string()))?;

        debug!(message_id = %message_id, bytes = bytes.len(), "Downloaded message content");
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl ReplySender for MessagingClient {
    async fn reply(&self, reply_token: &str, text: &str) -> Result<(), BotError> {
        let url = format!("{}/v2/bot/message/reply", self.api_base);
        let body = serde_json::json!({
            "replyToken": reply_token,
            "messages": [{ "type": "text", "text": text }],
        });

        let response = self
            .http
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.access_token))
            .json(&body)
            .send()
            .await
            .map_err(|e| BotError::Delivery(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(BotError::Delivery(format!("status {status}: {text}")));
        }

        Ok(())
    }
}
