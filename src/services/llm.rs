// src/services/llm.rs
use crate::common::ApiError;
use crate::services::settings::SettingsService;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("LLM API key not configured")]
    NotConfigured,

    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Settings error: {0}")]
    SettingsError(String),

    #[error("No JSON object found in model reply")]
    NoJson,
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::NotConfigured => {
                ApiError::ServiceUnavailable("AI service is not configured".to_string())
            }
            LlmError::RateLimitExceeded => ApiError::ServiceUnavailable(
                "AI service rate limit exceeded, try again shortly".to_string(),
            ),
            other => ApiError::ServiceUnavailable(format!("AI generation failed: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// What a completion is for; selects the system prompt
#[derive(Debug, Clone, Copy)]
pub enum GenerationPurpose {
    ContentGeneration,
    ResumeAnalysis,
    ResumeParsing,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct Usage {
    total_tokens: u32,
}

/// Client for an OpenAI-compatible chat completions endpoint
#[derive(Debug)]
pub struct LlmService {
    settings_service: Arc<SettingsService>,
    client: Client,
}

impl LlmService {
    pub fn new(settings_service: Arc<SettingsService>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(180))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            settings_service,
            client,
        }
    }

    /// Reads the provider configuration; `llm_*` settings override `LLM_*` env vars
    pub async fn get_config(&self) -> Result<LlmConfig, LlmError> {
        let api_key = self
            .setting("llm_api_key")
            .await?
            .filter(|k| !k.trim().is_empty())
            .ok_or(LlmError::NotConfigured)?;

        let base_url = self
            .setting("llm_base_url")
            .await?
            .unwrap_or_else(|| "https://api.openai.com".to_string());
        let model = self
            .setting("llm_model")
            .await?
            .unwrap_or_else(|| "gpt-4o-mini".to_string());
        let max_tokens = self
            .setting("llm_max_tokens")
            .await?
            .and_then(|v| v.parse().ok())
            .unwrap_or(2000);
        let temperature = self
            .setting("llm_temperature")
            .await?
            .and_then(|v| v.parse().ok())
            .unwrap_or(0.7);

        Ok(LlmConfig {
            api_key,
            base_url,
            model,
            max_tokens,
            temperature,
        })
    }

    pub async fn is_configured(&self) -> bool {
        self.get_config().await.is_ok()
    }

    async fn setting(&self, key: &str) -> Result<Option<String>, LlmError> {
        self.settings_service
            .get_setting(key)
            .await
            .map_err(|e| LlmError::SettingsError(e.to_string()))
    }

    /// Sends a system + user prompt and returns the reply text
    pub async fn generate_text(
        &self,
        purpose: GenerationPurpose,
        prompt: &str,
    ) -> Result<String, LlmError> {
        let config = self.get_config().await?;

        let request = ChatCompletionRequest {
            model: config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system_prompt(purpose).to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        };

        debug!(purpose = ?purpose, model = %config.model, "Sending LLM completion request");

        let response = self.make_request_with_retry(&config, &request).await?;

        let text = response
            .choices
            .first()
            .map(|c| c.message.content.clone())
            .ok_or_else(|| LlmError::InvalidResponse("No choices in response".to_string()))?;

        if let Some(usage) = response.usage {
            info!(
                purpose = ?purpose,
                model = %config.model,
                tokens_used = usage.total_tokens,
                "LLM completion finished"
            );
        }

        Ok(text)
    }

    /// Like `generate_text`, then pulls a JSON object out of the reply
    pub async fn generate_json(
        &self,
        purpose: GenerationPurpose,
        prompt: &str,
    ) -> Result<Value, LlmError> {
        let text = self.generate_text(purpose, prompt).await?;
        extract_json(&text)
    }

    async fn make_request_with_retry(
        &self,
        config: &LlmConfig,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LlmError> {
        let max_retries = 3;
        let mut last_error = None;

        for attempt in 1..=max_retries {
            match self.make_request(config, request).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    warn!(
                        attempt = attempt,
                        max_retries = max_retries,
                        error = %e,
                        "LLM request failed, retrying..."
                    );
                    last_error = Some(e);

                    if attempt < max_retries {
                        let delay = std::time::Duration::from_millis(1000 * 2_u64.pow(attempt - 1));
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| LlmError::RequestFailed("Unknown error".to_string())))
    }

    async fn make_request(
        &self,
        config: &LlmConfig,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LlmError> {
        let url = format!(
            "{}/v1/chat/completions",
            config.base_url.trim_end_matches('/')
        );

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", config.api_key))
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!(status = %status, error = %error_text, "LLM API request failed");
            return Err(LlmError::RequestFailed(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))
    }
}

fn system_prompt(purpose: GenerationPurpose) -> &'static str {
    match purpose {
        GenerationPurpose::ContentGeneration => {
            "You are a content writer for a career platform serving students and early-career engineers in India. Always answer with a single valid JSON object and nothing else."
        }
        GenerationPurpose::ResumeAnalysis => {
            "You are an expert ATS (Applicant Tracking System) reviewer. Score resumes honestly and give specific, actionable feedback. Always answer with a single valid JSON object."
        }
        GenerationPurpose::ResumeParsing => {
            "You are a resume parser. Extract structured data exactly as written in the resume without inventing details. Always answer with a single valid JSON object."
        }
    }
}

/// Extracts a JSON object from a model reply.
///
/// Fenced blocks (```json ... ```) are unwrapped first; otherwise the text between
/// the first `{` and the last `}` is parsed.
pub fn extract_json(text: &str) -> Result<Value, LlmError> {
    let trimmed = text.trim();

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if value.is_object() {
            return Ok(value);
        }
    }

    if let Some(start) = trimmed.find("```") {
        let after = &trimmed[start + 3..];
        let after = after.strip_prefix("json").unwrap_or(after);
        if let Some(end) = after.find("```") {
            if let Ok(value) = serde_json::from_str::<Value>(after[..end].trim()) {
                return Ok(value);
            }
        }
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if end > start => {
            serde_json::from_str::<Value>(&trimmed[start..=end]).map_err(|e| {
                debug!(error = %e, "Model reply contained malformed JSON");
                LlmError::NoJson
            })
        }
        _ => Err(LlmError::NoJson),
    }
}
