//! # Appraisal Generation Client Module
//!
//! Produces the natural-language appraisal through a multimodal
//! chat-completions API: the composed prompt rides alongside the image as a
//! base64 data URL in a single user message.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::errors::BotError;

pub const DEFAULT_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Everything one appraisal call needs; built and consumed within a single
/// text-event transition
#[derive(Debug, Clone, PartialEq)]
pub struct AppraisalRequest {
    /// Raw image bytes, embedded in the request as a data URL
    pub image: Vec<u8>,
    /// Normalized size answer from the user
    pub size_text: String,
    /// Labels from the vision service; empty when labeling is disabled
    pub labels: Vec<String>,
}

/// Generates appraisal text from a composed request
#[async_trait]
pub trait AppraisalGenerator: Send + Sync {
    async fn generate(&self, request: &AppraisalRequest) -> Result<String, BotError>;
}

/// Client for the chat-completions endpoint
pub struct GenerationClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    max_tokens: u32,
    endpoint: String,
}

impl GenerationClient {
    pub fn new(api_key: String, model: String, max_tokens: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            max_tokens,
            endpoint: DEFAULT_CHAT_COMPLETIONS_URL.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Compose the prompt text for an appraisal request
pub fn build_prompt(request: &AppraisalRequest) -> String {
    let mut prompt = format!(
        "This image shows a bonsai tree. Its size is {}. Identify the species \
         (for example black pine or shimpaku juniper), describe its condition, \
         and give a detailed estimated price range.",
        request.size_text
    );
    if !request.labels.is_empty() {
        prompt.push_str(&format!(
            " Labels detected in the image: {}.",
            request.labels.join(", ")
        ));
    }
    prompt
}

#[async_trait]
impl AppraisalGenerator for GenerationClient {
    async fn generate(&self, request: &AppraisalRequest) -> Result<String, BotError> {
        let encoded_image = BASE64_STANDARD.encode(&request.image);
        let body = json!({
            "model": self.model,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": build_prompt(request) },
                    {
                        "type": "image_url",
                        "image_url": { "url": format!("data:image/jpeg;base64,{encoded_image}") },
                    },
                ],
            }],
            "max_tokens": self.max_tokens,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .map_err(|e| BotError::GenerationApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(BotError::GenerationApi(format!("status {status}: {text}")));
        }

        let data: ChatResponse = response
            .json()
            .await
            .map_err(|e| BotError::GenerationApi(e.to_string()))?;

        let content = data
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| BotError::GenerationApi("response contained no choices".to_string()))?;

        let appraisal = content.trim().to_string();
        debug!(chars = appraisal.len(), "Appraisal text generated");
        Ok(appraisal)
    }
}
