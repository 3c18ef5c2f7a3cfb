//! Mock summarization backend for deterministic testing.
//!
//! ```rust
//! use cta_inference::mock::MockSummarizer;
//!
//! let backend = MockSummarizer::new().with_response("Short summary");
//! assert_eq!(backend.call_count(), 0);
//! ```

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use cta_core::{Result, SummarizationBackend, SummarizationError};

/// Mock summarization backend that records every payload it receives.
#[derive(Clone)]
pub struct MockSummarizer {
    outcome: std::result::Result<String, SummarizationError>,
    model: String,
    calls: Arc<Mutex<Vec<String>>>,
}

impl Default for MockSummarizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSummarizer {
    pub fn new() -> Self {
        Self {
            outcome: Ok("Mock summary".to_string()),
            model: "mock-summarizer".to_string(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Return `response` for every request.
    pub fn with_response(mut self, response: impl Into<String>) -> Self {
        self.outcome = Ok(response.into());
        self
    }

    /// Fail every request with `error`.
    pub fn with_failure(mut self, error: SummarizationError) -> Self {
        self.outcome = Err(error);
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Payloads received so far, oldest first.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }
}

#[async_trait]
impl SummarizationBackend for MockSummarizer {
    async fn summarize(&self, payload: &str) -> Result<String> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(payload.to_string());
        }
        Ok(self.outcome.clone()?)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
