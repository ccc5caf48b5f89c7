//! # Vision Labeling Client Module
//!
//! Optional label extraction for a received image through the vision
//! annotation REST API. The upstream error message, when the service returns
//! one inside a 200 response, is surfaced verbatim.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::errors::BotError;

pub const DEFAULT_VISION_ENDPOINT: &str = "https://vision.googleapis.com/v1/images:annotate";
pub const MAX_LABEL_RESULTS: u32 = 10;

/// Extracts descriptive labels from image bytes
#[async_trait]
pub trait VisionLabeler: Send + Sync {
    async fn label_detection(&self, image_bytes: &[u8]) -> Result<Vec<String>, BotError>;
}

/// Client for the vision annotation endpoint, authenticated by API key
pub struct VisionClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl VisionClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            endpoint: DEFAULT_VISION_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    #[serde(default)]
    responses: Vec<AnnotateResult>,
}

#[derive(Debug, Deserialize)]
struct AnnotateResult {
    #[serde(default, rename = "labelAnnotations")]
    label_annotations: Vec<LabelAnnotation>,
    error: Option<ApiStatus>,
}

#[derive(Debug, Deserialize)]
struct LabelAnnotation {
    description: String,
}

#[derive(Debug, Deserialize)]
struct ApiStatus {
    message: Option<String>,
}

#[async_trait]
impl VisionLabeler for VisionClient {
    async fn label_detection(&self, image_bytes: &[u8]) -> Result<Vec<String>, BotError> {
        let body = json!({
            "requests": [{
                "image": { "content": BASE64_STANDARD.encode(image_bytes) },
                "features": [{ "type": "LABEL_DETECTION", "maxResults": MAX_LABEL_RESULTS }],
            }],
        });

        let url = format!("{}?key={}", self.endpoint, self.api_key);
        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| BotError::VisionApi(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(BotError::VisionApi(format!("status {status}: {text}")));
        }

        let annotated: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| BotError::VisionApi(e.to_string()))?;

        let result = annotated
            .responses
            .into_iter()
            .next()
            .ok_or_else(|| BotError::VisionApi("empty annotation response".to_string()))?;

        if let Some(error) = result.error {
            let message = error.message.unwrap_or_else(|| "unknown".to_string());
            return Err(BotError::VisionApi(message));
        }

        let labels: Vec<String> = result
            .label_annotations
            .into_iter()
            .map(|label| label.description)
            .collect();

        debug!(label_count = labels.len(), "Label detection completed");
        Ok(labels)
    }
}
