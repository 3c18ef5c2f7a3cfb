//! OpenAI-compatible chat-completions summarization backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use cta_core::defaults::SUMMARY_TIMEOUT_SECS;
use cta_core::{Error, Result, SummarizationBackend, SummarizationError};

use super::types::{CompletionBody, PromptMessage, SummaryRequest};
use crate::http::{error_message, transport_error};

/// Default OpenAI API endpoint.
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";

/// Default generation model.
pub const DEFAULT_GEN_MODEL: &str = "gpt-4o-mini";

/// Environment variable holding the OpenAI credential.
pub const OPENAI_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// System message framing every summarization request.
const SYSTEM_PROMPT: &str =
    "You summarize clinical trial agreements for contract reviewers. Be concise and factual.";

/// Configuration for OpenAI-compatible backend.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// Base URL for the API endpoint.
    pub base_url: String,
    /// API key for authentication.
    pub api_key: Option<String>,
    /// Model to use for generation.
    pub gen_model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OPENAI_URL.to_string(),
            api_key: None,
            gen_model: DEFAULT_GEN_MODEL.to_string(),
            timeout_seconds: SUMMARY_TIMEOUT_SECS,
        }
    }
}

impl OpenAIConfig {
    /// Read `OPENAI_BASE_URL`, `OPENAI_API_KEY`, `OPENAI_GEN_MODEL`, and `SUMMARY_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_URL.to_string()),
            api_key: std::env::var(OPENAI_API_KEY_VAR)
                .ok()
                .filter(|k| !k.trim().is_empty()),
            gen_model: std::env::var("OPENAI_GEN_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEN_MODEL.to_string()),
            timeout_seconds: std::env::var("SUMMARY_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(SUMMARY_TIMEOUT_SECS),
        }
    }
}

/// OpenAI-compatible summarization backend.
pub struct OpenAIBackend {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIBackend {
    /// Create a new OpenAI backend with the given configuration.
    pub fn new(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            "Initializing OpenAI summarization backend: url={}, gen={}",
            config.base_url, config.gen_model
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(OpenAIConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    async fn request(&self, payload: &str) -> std::result::Result<String, SummarizationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| SummarizationError::MissingCredential(OPENAI_API_KEY_VAR.to_string()))?;

        if payload.trim().is_empty() {
            return Err(SummarizationError::EmptyInput);
        }

        debug!(
            "Summarizing with model {}, prompt length: {}",
            self.config.gen_model,
            payload.len()
        );

        let request = SummaryRequest {
            model: &self.config.gen_model,
            messages: [
                PromptMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                PromptMessage {
                    role: "user",
                    content: payload,
                },
            ],
            temperature: 0.2,
            stream: false,
        };

        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| transport_error(e, self.config.timeout_seconds))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, self.config.timeout_seconds))?;

        if !status.is_success() {
            return Err(SummarizationError::from_status(
                status.as_u16(),
                error_message(&body),
            ));
        }

        let result: CompletionBody = serde_json::from_str(&body)
            .map_err(|e| SummarizationError::MalformedResponse(e.to_string()))?;

        let content = result
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| {
                SummarizationError::MalformedResponse("response contained no content".into())
            })?;

        debug!("Summary complete, response length: {}", content.len());
        Ok(content)
    }
}

#[async_trait]
impl SummarizationBackend for OpenAIBackend {
    async fn summarize(&self, payload: &str) -> Result<String> {
        Ok(self.request(payload).await?)
    }

    fn model_name(&self) -> &str {
        &self.config.gen_model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = OpenAIConfig::default();
        assert_eq!(config.base_url, DEFAULT_OPENAI_URL);
        assert_eq!(config.gen_model, DEFAULT_GEN_MODEL);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_request_shape() {
        let request = SummaryRequest {
            model: "gpt-4o-mini",
            messages: [
                PromptMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                PromptMessage {
                    role: "user",
                    content: "Excerpt",
                },
            ],
            temperature: 0.2,
            stream: false,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["messages"][1]["content"], "Excerpt");
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn test_null_content_deserializes() {
        let body: CompletionBody =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
                .unwrap();
        assert!(body.choices[0].message.content.is_none());
    }

    #[tokio::test]
    async fn test_missing_credential() {
        let backend = OpenAIBackend::new(OpenAIConfig::default()).unwrap();
        let err = backend.summarize("text").await.unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }
}
