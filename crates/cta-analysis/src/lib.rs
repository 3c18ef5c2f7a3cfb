//! # cta-analysis
//!
//! Turns resolved agreement text into a review report.
//!
//! This crate provides:
//! - The text normalizer that builds the summarization excerpt
//! - Clause, milestone, and payment-term extractors
//! - The risk flagger
//! - Summary requests with recorded failures and prompt templates
//! - A content-addressed cache and the [`Analyzer`] pipeline
//! - Summary text and clause spreadsheet artifacts
//!
//! Every extractor is a pure function of the resolved text.

pub mod cache;
pub mod clauses;
pub mod export;
pub mod milestones;
pub mod normalize;
pub mod payments;
pub mod pipeline;
pub mod prompt;
pub mod risks;
pub mod summary;

pub use cache::{content_hash, CacheStats, ContentCache};
pub use clauses::extract_clauses;
pub use export::{clause_workbook, summary_artifact};
pub use milestones::extract_milestones;
pub use normalize::{normalize, summary_input};
pub use payments::extract_payments;
pub use pipeline::{extract_findings, Analyzer, AnalyzerConfig, TextFindings};
pub use prompt::build_payload;
pub use risks::flag_risks;
pub use summary::SummaryRequester;
