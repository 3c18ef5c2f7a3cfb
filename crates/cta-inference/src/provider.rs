//! Summarization backend selection.
//!
//! `SUMMARY_BACKEND` picks the provider:
//!
//! ```text
//! "huggingface" (default) → hosted Hugging Face summarization model
//! "openai"                → OpenAI-compatible chat completions (feature `openai`)
//! ```

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use cta_core::{Error, Result, SummarizationBackend};

use crate::huggingface::HuggingFaceBackend;

// ---------------------------------------------------------------------------
// Backend kind
// ---------------------------------------------------------------------------

/// Which summarization provider to use.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryBackendKind {
    #[default]
    HuggingFace,
    OpenAI,
}

impl SummaryBackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HuggingFace => "huggingface",
            Self::OpenAI => "openai",
        }
    }

    /// Read `SUMMARY_BACKEND`, defaulting to Hugging Face when unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var("SUMMARY_BACKEND") {
            Ok(value) if !value.trim().is_empty() => value.parse(),
            _ => Ok(Self::default()),
        }
    }
}

impl fmt::Display for SummaryBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SummaryBackendKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "huggingface" | "hf" => Ok(Self::HuggingFace),
            "openai" => Ok(Self::OpenAI),
            other => Err(Error::Config(format!(
                "Unknown summary backend '{}' (expected huggingface or openai)",
                other
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Construction from environment
// ---------------------------------------------------------------------------

/// Build the configured summarization backend.
///
/// A missing credential is not an error here; the backend reports it on
/// each request so analysis still completes with a failed summary.
pub fn backend_from_env() -> Result<Arc<dyn SummarizationBackend>> {
    let kind = SummaryBackendKind::from_env()?;
    info!(backend = %kind, "Selecting summarization backend");
    build_backend(kind)
}

fn build_backend(kind: SummaryBackendKind) -> Result<Arc<dyn SummarizationBackend>> {
    match kind {
        SummaryBackendKind::HuggingFace => Ok(Arc::new(HuggingFaceBackend::from_env()?)),
        #[cfg(feature = "openai")]
        SummaryBackendKind::OpenAI => Ok(Arc::new(crate::openai::OpenAIBackend::from_env()?)),
        #[cfg(not(feature = "openai"))]
        SummaryBackendKind::OpenAI => Err(Error::Config(
            "SUMMARY_BACKEND=openai requires the `openai` feature".to_string(),
        )),
    }
}
