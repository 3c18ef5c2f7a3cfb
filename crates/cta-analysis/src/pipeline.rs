//! The analysis pipeline for one uploaded document.
//!
//! ```text
//! bytes → TextResolver → resolved text ─┬─ normalize → summary input → SummaryRequester
//!                                       └─ clauses, milestones, payments, risks
//! ```
//!
//! Resolution failures end the pass. Summarization failures are recorded in
//! the report and never suppress the other sections.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};

use cta_core::defaults::{ANALYSIS_CACHE_SIZE, SUMMARY_CACHE_SIZE};
use cta_core::{
    AnalysisReport, ClauseFindings, MilestoneFinding, PaymentFinding, PaymentStrategy,
    PromptMode, Result, RiskAssessment, SummarizationBackend,
};
use cta_extract::TextResolver;

use crate::cache::{content_hash, CacheStats, ContentCache};
use crate::clauses::extract_clauses;
use crate::milestones::extract_milestones;
use crate::normalize::{normalize, summary_input};
use crate::payments::extract_payments;
use crate::risks::flag_risks;
use crate::summary::SummaryRequester;

// =============================================================================
// CONFIGURATION
// =============================================================================

/// Analyzer settings.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Payment strategy used when a request does not name one.
    pub payment_strategy: PaymentStrategy,
    pub prompt_mode: PromptMode,
    pub cache_enabled: bool,
    /// Entries in the report cache; the summary cache uses [`SUMMARY_CACHE_SIZE`].
    pub cache_size: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            payment_strategy: PaymentStrategy::default(),
            prompt_mode: PromptMode::default(),
            cache_enabled: true,
            cache_size: ANALYSIS_CACHE_SIZE,
        }
    }
}

impl AnalyzerConfig {
    /// Read `PAYMENT_STRATEGY`, `SUMMARY_PROMPT_MODE`, `ANALYSIS_CACHE_ENABLED`,
    /// and `ANALYSIS_CACHE_SIZE`.
    ///
    /// Unrecognized strategy or prompt names are configuration errors.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        let payment_strategy = match std::env::var("PAYMENT_STRATEGY") {
            Ok(v) if !v.trim().is_empty() => v.parse()?,
            _ => defaults.payment_strategy,
        };
        let prompt_mode = match std::env::var("SUMMARY_PROMPT_MODE") {
            Ok(v) if !v.trim().is_empty() => v.parse()?,
            _ => defaults.prompt_mode,
        };
        Ok(Self {
            payment_strategy,
            prompt_mode,
            cache_enabled: std::env::var("ANALYSIS_CACHE_ENABLED")
                .map(|v| !matches!(v.to_lowercase().as_str(), "false" | "0" | "no" | "off"))
                .unwrap_or(defaults.cache_enabled),
            cache_size: std::env::var("ANALYSIS_CACHE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.cache_size),
        })
    }
}

// =============================================================================
// PURE FINDINGS
// =============================================================================

/// Everything derived from the resolved text without external calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextFindings {
    pub clauses: ClauseFindings,
    pub milestones: Vec<MilestoneFinding>,
    pub payments: Vec<PaymentFinding>,
    pub risks: RiskAssessment,
}

/// Run every extractor and the risk flagger over `text`.
pub fn extract_findings(text: &str, strategy: PaymentStrategy) -> TextFindings {
    TextFindings {
        clauses: extract_clauses(text),
        milestones: extract_milestones(text),
        payments: extract_payments(text, strategy),
        risks: RiskAssessment::from_flags(flag_risks(text)),
    }
}

// =============================================================================
// ANALYZER
// =============================================================================

/// Runs the full pipeline and memoizes reports by document content.
pub struct Analyzer {
    resolver: TextResolver,
    summarizer: SummaryRequester,
    reports: Option<ContentCache<Arc<AnalysisReport>>>,
    default_strategy: PaymentStrategy,
}

impl Analyzer {
    pub fn new(
        resolver: TextResolver,
        backend: Arc<dyn SummarizationBackend>,
        config: AnalyzerConfig,
    ) -> Self {
        let mut summarizer = SummaryRequester::new(backend, config.prompt_mode);
        let reports = if config.cache_enabled {
            summarizer = summarizer.with_cache(SUMMARY_CACHE_SIZE);
            Some(ContentCache::new(config.cache_size))
        } else {
            None
        };

        info!(
            subsystem = "analysis",
            payment_strategy = config.payment_strategy.as_str(),
            prompt_mode = ?config.prompt_mode,
            cache_enabled = config.cache_enabled,
            cache_size = config.cache_size,
            model = summarizer.model_name(),
            "Analyzer initialized"
        );

        Self {
            resolver,
            summarizer,
            reports,
            default_strategy: config.payment_strategy,
        }
    }

    pub fn resolver(&self) -> &TextResolver {
        &self.resolver
    }

    pub fn summarizer(&self) -> &SummaryRequester {
        &self.summarizer
    }

    pub fn default_strategy(&self) -> PaymentStrategy {
        self.default_strategy
    }

    /// Report cache counters, when caching is enabled.
    pub async fn cache_stats(&self) -> Option<CacheStats> {
        match &self.reports {
            Some(cache) => Some(cache.stats().await),
            None => None,
        }
    }

    /// Analyze one document.
    ///
    /// Fails only when the document cannot be read or its text cannot be
    /// resolved; a failed summary is part of a successful report.
    pub async fn analyze(
        &self,
        data: &[u8],
        filename: &str,
        strategy: Option<PaymentStrategy>,
    ) -> Result<Arc<AnalysisReport>> {
        let start = Instant::now();
        let strategy = strategy.unwrap_or(self.default_strategy);
        let content_hash = content_hash(data);
        let cache_key = format!("{}:{}", content_hash, strategy.as_str());

        if let Some(cache) = &self.reports {
            if let Some(report) = cache.get(&cache_key).await {
                debug!(
                    component = "pipeline",
                    content_hash = %content_hash,
                    "Report cache hit"
                );
                let mut served = (*report).clone();
                served.filename = filename.to_string();
                served.generated_at = Utc::now();
                return Ok(Arc::new(served));
            }
        }

        let resolved = self.resolver.resolve(data).await?;

        let excerpt = normalize(&resolved.text);
        let input = summary_input(&resolved.text, &excerpt);
        let findings = extract_findings(&resolved.text, strategy);
        let summary = self.summarizer.summarize(input.as_deref()).await;

        let report = Arc::new(AnalysisReport {
            filename: filename.to_string(),
            content_hash: content_hash.clone(),
            text_source: resolved.source,
            page_count: resolved.page_count,
            notice: resolved.notice,
            excerpt,
            summary_input: input,
            clause_table: findings.clauses.rows(),
            clauses: findings.clauses,
            milestones: findings.milestones,
            payment_strategy: strategy,
            payments: findings.payments,
            risks: findings.risks,
            summary,
            generated_at: Utc::now(),
        });

        info!(
            subsystem = "analysis",
            component = "pipeline",
            op = "analyze",
            content_hash = %content_hash,
            text_source = ?report.text_source,
            pages = report.page_count,
            risk_count = report.risks.flags().len(),
            summarized = report.summary.text().is_some(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Analysis complete"
        );

        if let Some(cache) = &self.reports {
            if report.summary.text().is_some() {
                cache.insert(cache_key, report.clone()).await;
            }
        }

        Ok(report)
    }
}
