//! Summary requests with recorded, non-fatal failures.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use cta_core::{Error, PromptMode, SummarizationBackend, SummarizationError, SummaryOutcome};

use crate::cache::{content_hash, CacheStats, ContentCache};
use crate::prompt::build_payload;

/// Delegates summaries to a backend and turns every failure into a
/// [`SummaryOutcome::Failed`] record.
///
/// Only successful summaries are cached, so a fixed credential or a
/// recovered backend takes effect on the next request.
pub struct SummaryRequester {
    backend: Arc<dyn SummarizationBackend>,
    mode: PromptMode,
    cache: Option<ContentCache<String>>,
}

impl SummaryRequester {
    pub fn new(backend: Arc<dyn SummarizationBackend>, mode: PromptMode) -> Self {
        Self {
            backend,
            mode,
            cache: None,
        }
    }

    /// Memoize successful summaries in an LRU of `capacity` entries.
    pub fn with_cache(mut self, capacity: usize) -> Self {
        self.cache = Some(ContentCache::new(capacity));
        self
    }

    pub fn mode(&self) -> PromptMode {
        self.mode
    }

    pub fn model_name(&self) -> &str {
        self.backend.model_name()
    }

    pub async fn cache_stats(&self) -> Option<CacheStats> {
        match &self.cache {
            Some(cache) => Some(cache.stats().await),
            None => None,
        }
    }

    /// Summarize `input`, or record why no summary was produced.
    ///
    /// `None` means the document had no text to send.
    pub async fn summarize(&self, input: Option<&str>) -> SummaryOutcome {
        let Some(text) = input else {
            warn!(
                subsystem = "analysis",
                component = "summary",
                "Nothing to summarize"
            );
            return SummaryOutcome::failed(&SummarizationError::EmptyInput);
        };

        let payload = build_payload(text, self.mode);
        let model = self.backend.model_name().to_string();
        let key = content_hash(format!("{}\n{}", model, payload).as_bytes());

        if let Some(cache) = &self.cache {
            if let Some(summary) = cache.get(&key).await {
                debug!(component = "summary", model = %model, "Summary cache hit");
                return SummaryOutcome::Generated {
                    text: summary,
                    model,
                };
            }
        }

        let start = Instant::now();
        match self.backend.summarize(&payload).await {
            Ok(summary) => {
                info!(
                    subsystem = "analysis",
                    component = "summary",
                    op = "summarize",
                    model = %model,
                    payload_len = payload.len(),
                    duration_ms = start.elapsed().as_millis() as u64,
                    "Summary generated"
                );
                if let Some(cache) = &self.cache {
                    cache.insert(key, summary.clone()).await;
                }
                SummaryOutcome::Generated {
                    text: summary,
                    model,
                }
            }
            Err(Error::Summarization(err)) => {
                warn!(
                    subsystem = "analysis",
                    component = "summary",
                    model = %model,
                    status = ?err.status_code(),
                    error = %err,
                    "Summarization failed"
                );
                SummaryOutcome::failed(&err)
            }
            Err(other) => {
                warn!(
                    subsystem = "analysis",
                    component = "summary",
                    model = %model,
                    error = %other,
                    "Summarization failed"
                );
                SummaryOutcome::Failed {
                    error: format!("Summarization failed: {}", other),
                }
            }
        }
    }
}
