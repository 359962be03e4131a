use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::time::timeout;
use tracing::debug;

use crate::config::AnalyzerSettings;

const API_KEY_HEADER: &str = "x-goog-api-key";
const JSON_MIME_TYPE: &str = "application/json";

#[derive(Debug, thiserror::Error)]
pub enum ModelClientError {
    #[error("model request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("HTTP request failed")]
    Transport(#[from] reqwest::Error),

    #[error("provider returned HTTP {status}: {body}")]
    HttpStatus { status: StatusCode, body: String },

    #[error("prompt was blocked by the provider: {reason}")]
    Blocked { reason: String },

    #[error("response missing field: {field}")]
    MissingField { field: &'static str },
}

/// One structured-output call: a natural-language instruction plus the JSON
/// schema the reply must follow.
#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRequest {
    pub instruction: String,
    pub response_schema: Value,
}

impl StructuredRequest {
    pub fn new(instruction: impl Into<String>, response_schema: Value) -> Self {
        Self {
            instruction: instruction.into(),
            response_schema,
        }
    }
}

/// Seam between analysis and the text-generation backend.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Returns the raw reply text. It should hold JSON but is not parsed here.
    async fn generate_json(&self, request: &StructuredRequest) -> Result<String, ModelClientError>;
}

#[derive(Debug, Clone)]
pub struct ModelClient {
    http_client: reqwest::Client,
    settings: AnalyzerSettings,
}

impl ModelClient {
    pub fn new(settings: AnalyzerSettings) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            settings,
        }
    }

    pub fn model(&self) -> &str {
        &self.settings.model
    }

    fn generate_content_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.gemini_base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    async fn generate_once(&self, request: &StructuredRequest) -> Result<String, ModelClientError> {
        let url = self.generate_content_url();
        let body = GenerateContentRequest::from_structured_request(request);

        debug!(url = %url, model = %self.settings.model, "sending generateContent request");

        let response = self
            .http_client
            .post(&url)
            .header(API_KEY_HEADER, &self.settings.api_key)
            .json(&body)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        let payload: GenerateContentResponse = response.json().await?;
        payload.into_text()
    }
}

#[async_trait]
impl GenerativeModel for ModelClient {
    async fn generate_json(&self, request: &StructuredRequest) -> Result<String, ModelClientError> {
        let timeout_duration = Duration::from_millis(self.settings.model_timeout_ms);
        match timeout(timeout_duration, self.generate_once(request)).await {
            Ok(result) => result,
            Err(_) => Err(ModelClientError::Timeout {
                timeout_ms: self.settings.model_timeout_ms,
            }),
        }
    }
}

async fn ensure_success(
    response: reqwest::Response,
) -> Result<reqwest::Response, ModelClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error response body>".to_owned());
    Err(ModelClientError::HttpStatus { status, body })
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    fn from_structured_request(request: &StructuredRequest) -> Self {
        Self {
            contents: vec![RequestContent {
                role: "user".to_owned(),
                parts: vec![RequestPart {
                    text: request.instruction.clone(),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: JSON_MIME_TYPE.to_owned(),
                response_schema: request.response_schema.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
struct RequestContent {
    role: String,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

impl GenerateContentResponse {
    fn into_text(self) -> Result<String, ModelClientError> {
        if let Some(reason) = self
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason)
        {
            return Err(ModelClientError::Blocked { reason });
        }

        let candidate = self
            .candidates
            .into_iter()
            .next()
            .ok_or(ModelClientError::MissingField {
                field: "candidates[0]",
            })?;
        let parts = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default();

        let text = parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<String>();
        if text.trim().is_empty() {
            return Err(ModelClientError::MissingField {
                field: "candidates[0].content.parts[].text",
            });
        }

        Ok(text)
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}
