use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::error::GenerationError;
use crate::schema::Schema;
use crate::StructuredGenerator;

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_API_BASE.to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content>,
    generation_config: GenerationConfig<'a>,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig<'a> {
    response_mime_type: &'static str,
    response_schema: &'a Schema,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GenerationError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send one `generateContent` call constrained to `shape` and return the
    /// raw text of the first candidate.
    pub async fn generate_text(&self, prompt: &str, shape: &Schema) -> Result<String, GenerationError> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                response_schema: shape,
            },
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            "Sending structured generation request"
        );

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerationError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerationError::Provider {
                status: status.as_u16(),
                body,
            });
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::MalformedOutput(format!("provider envelope: {}", e)))?;

        let candidate = api_response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| GenerationError::EmptyResponse("no candidates".to_string()))?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(GenerationError::EmptyResponse(
                "content blocked by provider safety filter".to_string(),
            ));
        }

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(GenerationError::EmptyResponse(format!(
                "finish reason {}",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }

        Ok(text)
    }
}

#[async_trait]
impl StructuredGenerator for GeminiClient {
    async fn generate(&self, prompt: &str, shape: &Schema) -> Result<Value, GenerationError> {
        let text = self.generate_text(prompt, shape).await?;
        parse_json_text(&text)
    }
}

/// Parse model text as JSON. Tolerates a surrounding markdown code fence.
pub fn parse_json_text(text: &str) -> Result<Value, GenerationError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(body.trim()).map_err(|e| GenerationError::MalformedOutput(e.to_string()))
}
