//! Hugging Face Inference API summarization backend.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use cta_core::defaults::{HF_API_KEY_VAR, HF_API_URL, HF_SUMMARY_MODEL, SUMMARY_TIMEOUT_SECS};
use cta_core::{Error, Result, SummarizationBackend, SummarizationError};

use crate::http::{error_message, transport_error};

/// Configuration for the Hugging Face backend.
#[derive(Debug, Clone)]
pub struct HuggingFaceConfig {
    /// Base URL; the model id is appended as a path.
    pub base_url: String,
    /// Summarization model id.
    pub model: String,
    /// Bearer token. Requests fail with `MissingCredential` when absent.
    pub api_key: Option<String>,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for HuggingFaceConfig {
    fn default() -> Self {
        Self {
            base_url: HF_API_URL.to_string(),
            model: HF_SUMMARY_MODEL.to_string(),
            api_key: None,
            timeout_seconds: SUMMARY_TIMEOUT_SECS,
        }
    }
}

impl HuggingFaceConfig {
    /// Read `HF_API_URL`, `HF_SUMMARY_MODEL`, `HF_API_KEY`, and `SUMMARY_TIMEOUT_SECS`.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("HF_API_URL").unwrap_or_else(|_| HF_API_URL.to_string()),
            model: std::env::var("HF_SUMMARY_MODEL")
                .unwrap_or_else(|_| HF_SUMMARY_MODEL.to_string()),
            api_key: std::env::var(HF_API_KEY_VAR)
                .ok()
                .filter(|k| !k.trim().is_empty()),
            timeout_seconds: std::env::var("SUMMARY_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(SUMMARY_TIMEOUT_SECS),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.model.trim_start_matches('/')
        )
    }
}

#[derive(Serialize)]
struct SummarizeRequest<'a> {
    inputs: &'a str,
}

#[derive(Deserialize)]
struct SummaryItem {
    summary_text: String,
}

/// Summarization backend calling a hosted Hugging Face model.
///
/// Response shape: `[{"summary_text": "..."}]`.
pub struct HuggingFaceBackend {
    client: Client,
    config: HuggingFaceConfig,
}

impl HuggingFaceBackend {
    /// Create a new backend with the given configuration.
    pub fn new(config: HuggingFaceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Config(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            url = %config.base_url,
            model = %config.model,
            credential = config.api_key.is_some(),
            "Initializing Hugging Face summarization backend"
        );

        Ok(Self { client, config })
    }

    /// Create from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(HuggingFaceConfig::from_env())
    }

    /// Get the current configuration.
    pub fn config(&self) -> &HuggingFaceConfig {
        &self.config
    }

    async fn request(&self, payload: &str) -> std::result::Result<String, SummarizationError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .ok_or_else(|| SummarizationError::MissingCredential(HF_API_KEY_VAR.to_string()))?;

        if payload.trim().is_empty() {
            return Err(SummarizationError::EmptyInput);
        }

        debug!(
            model = %self.config.model,
            prompt_len = payload.len(),
            "Requesting summary"
        );

        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(api_key)
            .json(&SummarizeRequest { inputs: payload })
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

        let items: Vec<SummaryItem> = serde_json::from_str(&body)
            .map_err(|e| SummarizationError::MalformedResponse(e.to_string()))?;
        let summary = items
            .into_iter()
            .next()
            .map(|item| item.summary_text.trim().to_string())
            .ok_or_else(|| {
                SummarizationError::MalformedResponse("response contained no summaries".into())
            })?;

        debug!(response_len = summary.len(), "Summary received");
        Ok(summary)
    }
}

#[async_trait]
impl SummarizationBackend for HuggingFaceBackend {
    async fn summarize(&self, payload: &str) -> Result<String> {
        Ok(self.request(payload).await?)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = HuggingFaceConfig::default();
        assert_eq!(config.model, "facebook/bart-large-cnn");
        assert!(config.api_key.is_none());
        assert_eq!(config.timeout_seconds, 60);
    }

    #[test]
    fn test_endpoint_joins_model() {
        let config = HuggingFaceConfig {
            base_url: "http://localhost:9000/models/".into(),
            model: "facebook/bart-large-cnn".into(),
            ..Default::default()
        };
        assert_eq!(
            config.endpoint(),
            "http://localhost:9000/models/facebook/bart-large-cnn"
        );
    }

    #[tokio::test]
    async fn test_missing_credential_fails_before_request() {
        let backend = HuggingFaceBackend::new(HuggingFaceConfig {
            base_url: "http://127.0.0.1:9".into(),
            ..Default::default()
        })
        .unwrap();

        let err = backend.summarize("Some agreement text").await.unwrap_err();
        match err {
            Error::Summarization(SummarizationError::MissingCredential(var)) => {
                assert_eq!(var, "HF_API_KEY")
            }
            other => panic!("Expected MissingCredential, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_payload_rejected() {
        let backend = HuggingFaceBackend::new(HuggingFaceConfig {
            base_url: "http://127.0.0.1:9".into(),
            api_key: Some("hf_test".into()),
            ..Default::default()
        })
        .unwrap();

        let err = backend.summarize("   ").await.unwrap_err();
        assert!(matches!(
            err,
            Error::Summarization(SummarizationError::EmptyInput)
        ));
    }
}
