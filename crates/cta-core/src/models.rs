//! Data structures produced and consumed during one analysis pass.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::defaults::{EXAMPLE_SEPARATOR, NONE_FOUND, NO_RISKS_DETECTED};
use crate::error::{Error, SummarizationError};

// =============================================================================
// TEXT RESOLUTION
// =============================================================================

/// Where the resolved text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextSource {
    /// Embedded text layer (pdftotext)
    TextLayer,
    /// Optical recognition over rendered pages
    Ocr,
}

/// Document text after the text-layer/OCR decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedText {
    pub text: String,
    pub source: TextSource,
    /// Pages seen by the path that produced `text`.
    pub page_count: usize,
    /// User-visible notice, set when the OCR fallback was taken.
    pub notice: Option<String>,
}

/// A single rendered page handed to the OCR engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageImage {
    /// 1-based page number.
    pub page_number: usize,
    /// Encoded image bytes (PNG).
    pub data: Vec<u8>,
}

// =============================================================================
// CLAUSES
// =============================================================================

/// Value of a clause-table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClauseValue {
    /// Pattern-searched label: matched segments in order of appearance.
    Matches(Vec<String>),
    /// Presence-checked label.
    Present(bool),
}

impl fmt::Display for ClauseValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClauseValue::Matches(values) if values.is_empty() => f.write_str(NONE_FOUND),
            ClauseValue::Matches(values) => f.write_str(&values.join(EXAMPLE_SEPARATOR)),
            ClauseValue::Present(true) => f.write_str("Yes"),
            ClauseValue::Present(false) => f.write_str("No"),
        }
    }
}

/// One labeled clause entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseFinding {
    pub clause: String,
    pub value: ClauseValue,
}

/// Flattened clause-table row, as rendered in the report and the spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseRow {
    pub clause: String,
    pub extracted_info: String,
}

/// Ordered clause label → value mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClauseFindings {
    pub entries: Vec<ClauseFinding>,
}

impl ClauseFindings {
    /// Look up a clause by label.
    pub fn get(&self, clause: &str) -> Option<&ClauseValue> {
        self.entries
            .iter()
            .find(|e| e.clause == clause)
            .map(|e| &e.value)
    }

    /// Matched segments for a pattern-searched label (empty for booleans or unknown labels).
    pub fn matches(&self, clause: &str) -> &[String] {
        match self.get(clause) {
            Some(ClauseValue::Matches(values)) => values,
            _ => &[],
        }
    }

    /// Presence flag for a presence-checked label.
    pub fn is_present(&self, clause: &str) -> Option<bool> {
        match self.get(clause) {
            Some(ClauseValue::Present(flag)) => Some(*flag),
            _ => None,
        }
    }

    /// Render the table with fixed columns {Clause, Extracted Info}.
    pub fn rows(&self) -> Vec<ClauseRow> {
        self.entries
            .iter()
            .map(|e| ClauseRow {
                clause: e.clause.clone(),
                extracted_info: e.value.to_string(),
            })
            .collect()
    }
}

// =============================================================================
// MILESTONES AND PAYMENTS
// =============================================================================

/// Presence of one fixed milestone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MilestoneFinding {
    pub label: String,
    pub mentioned: bool,
    /// First matched literal, empty when not mentioned.
    pub example: String,
}

/// Presence of one payment category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentFinding {
    pub label: String,
    pub mentioned: bool,
    /// Example matches joined by "; " or a rule's descriptive detail.
    pub detail: String,
}

/// Which payment-term extractor to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStrategy {
    /// Keyword-near-amount regex table.
    #[default]
    Generic,
    /// Trigger-phrase rule list for a known document layout.
    DocumentSpecific,
    /// Generic rows followed by document-specific rows.
    Combined,
}

impl PaymentStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::DocumentSpecific => "document_specific",
            Self::Combined => "combined",
        }
    }
}

impl FromStr for PaymentStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "generic" => Ok(Self::Generic),
            "document_specific" | "specific" => Ok(Self::DocumentSpecific),
            "combined" | "both" => Ok(Self::Combined),
            other => Err(Error::Config(format!(
                "Unknown payment strategy '{}' (expected generic, document_specific, or combined)",
                other
            ))),
        }
    }
}

// =============================================================================
// RISKS
// =============================================================================

/// A fired risk flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFlag {
    /// Phrase whose presence triggered the flag.
    pub phrase: String,
    pub warning: String,
}

/// Risk section of a report. An empty flag list is a distinct affirmative state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RiskAssessment {
    Flagged { flags: Vec<RiskFlag> },
    NoneDetected { message: String },
}

impl RiskAssessment {
    pub fn from_flags(flags: Vec<RiskFlag>) -> Self {
        if flags.is_empty() {
            Self::NoneDetected {
                message: NO_RISKS_DETECTED.to_string(),
            }
        } else {
            Self::Flagged { flags }
        }
    }

    pub fn flags(&self) -> &[RiskFlag] {
        match self {
            Self::Flagged { flags } => flags,
            Self::NoneDetected { .. } => &[],
        }
    }
}

// =============================================================================
// SUMMARY
// =============================================================================

/// How the excerpt is presented to the summarization backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptMode {
    /// Send the excerpt as-is.
    #[default]
    Plain,
    /// Wrap the excerpt in the fixed instruction template.
    Instructed,
}

impl FromStr for PromptMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "plain" => Ok(Self::Plain),
            "instructed" | "prompt" => Ok(Self::Instructed),
            other => Err(Error::Config(format!(
                "Unknown prompt mode '{}' (expected plain or instructed)",
                other
            ))),
        }
    }
}

/// Outcome of the summary stage. Failure is recorded, never propagated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SummaryOutcome {
    Generated { text: String, model: String },
    Failed { error: String },
}

impl SummaryOutcome {
    pub fn failed(err: &SummarizationError) -> Self {
        Self::Failed {
            error: format!("Summarization failed: {}", err),
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Generated { text, .. } => Some(text),
            Self::Failed { .. } => None,
        }
    }
}

// =============================================================================
// REPORT
// =============================================================================

/// Everything produced for one uploaded document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub filename: String,
    /// SHA-256 of the uploaded bytes (hex).
    pub content_hash: String,
    pub text_source: TextSource,
    pub page_count: usize,
    pub notice: Option<String>,
    /// Normalized excerpt, possibly the "No usable text found." sentinel.
    pub excerpt: String,
    /// Exact text sent to the summarizer; `None` when there was nothing to send.
    pub summary_input: Option<String>,
    pub clauses: ClauseFindings,
    pub clause_table: Vec<ClauseRow>,
    pub milestones: Vec<MilestoneFinding>,
    pub payment_strategy: PaymentStrategy,
    pub payments: Vec<PaymentFinding>,
    pub risks: RiskAssessment,
    pub summary: SummaryOutcome,
    pub generated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_clauses() -> ClauseFindings {
        ClauseFindings {
            entries: vec![
                ClauseFinding {
                    clause: "Sponsor".into(),
                    value: ClauseValue::Matches(vec!["Sponsor: Acme Pharma".into()]),
                },
                ClauseFinding {
                    clause: "Investigator".into(),
                    value: ClauseValue::Matches(vec![]),
                },
                ClauseFinding {
                    clause: "Budget Amounts".into(),
                    value: ClauseValue::Matches(vec!["$1,000".into(), "$2,500.00".into()]),
                },
                ClauseFinding {
                    clause: "Termination Rights".into(),
                    value: ClauseValue::Present(true),
                },
                ClauseFinding {
                    clause: "Includes Indemnification".into(),
                    value: ClauseValue::Present(false),
                },
            ],
        }
    }

    #[test]
    fn test_clause_rows_render_explicit_states() {
        let rows = sample_clauses().rows();
        assert_eq!(rows[0].extracted_info, "Sponsor: Acme Pharma");
        assert_eq!(rows[1].extracted_info, "None found");
        assert_eq!(rows[2].extracted_info, "$1,000; $2,500.00");
        assert_eq!(rows[3].extracted_info, "Yes");
        assert_eq!(rows[4].extracted_info, "No");
    }

    #[test]
    fn test_clause_lookup_helpers() {
        let clauses = sample_clauses();
        assert_eq!(
            clauses.matches("Sponsor").to_vec(),
            vec!["Sponsor: Acme Pharma".to_string()]
        );
        assert!(clauses.matches("Termination Rights").is_empty());
        assert_eq!(clauses.is_present("Termination Rights"), Some(true));
        assert_eq!(clauses.is_present("Sponsor"), None);
        assert!(clauses.get("Unknown").is_none());
    }

    #[test]
    fn test_clause_value_serializes_untagged() {
        let json = serde_json::to_value(ClauseValue::Present(true)).unwrap();
        assert_eq!(json, serde_json::json!(true));
        let json = serde_json::to_value(ClauseValue::Matches(vec!["$5".into()])).unwrap();
        assert_eq!(json, serde_json::json!(["$5"]));
    }

    #[test]
    fn test_payment_strategy_parsing() {
        assert_eq!(
            "generic".parse::<PaymentStrategy>().unwrap(),
            PaymentStrategy::Generic
        );
        assert_eq!(
            "Document-Specific".parse::<PaymentStrategy>().unwrap(),
            PaymentStrategy::DocumentSpecific
        );
        assert_eq!(
            "both".parse::<PaymentStrategy>().unwrap(),
            PaymentStrategy::Combined
        );
        assert!("weekly".parse::<PaymentStrategy>().is_err());
        assert_eq!(PaymentStrategy::default(), PaymentStrategy::Generic);
    }

    #[test]
    fn test_prompt_mode_parsing() {
        assert_eq!("plain".parse::<PromptMode>().unwrap(), PromptMode::Plain);
        assert_eq!(
            " Instructed ".parse::<PromptMode>().unwrap(),
            PromptMode::Instructed
        );
        assert!("verbose".parse::<PromptMode>().is_err());
    }

    #[test]
    fn test_risk_assessment_none_detected_is_explicit() {
        let assessment = RiskAssessment::from_flags(vec![]);
        assert!(assessment.flags().is_empty());
        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["status"], "none_detected");
        assert_eq!(json["message"], "No major risks detected.");
    }

    #[test]
    fn test_risk_assessment_flagged() {
        let assessment = RiskAssessment::from_flags(vec![RiskFlag {
            phrase: "sole discretion".into(),
            warning: "One-sided decision-making clause".into(),
        }]);
        assert_eq!(assessment.flags().len(), 1);
        let json = serde_json::to_value(&assessment).unwrap();
        assert_eq!(json["status"], "flagged");
    }

    #[test]
    fn test_summary_outcome_failed_message() {
        let outcome = SummaryOutcome::failed(&SummarizationError::EmptyInput);
        assert!(outcome.text().is_none());
        match outcome {
            SummaryOutcome::Failed { error } => {
                assert!(error.starts_with("Summarization failed:"));
            }
            _ => panic!("Expected failure"),
        }
    }

    #[test]
    fn test_text_source_serialization() {
        assert_eq!(
            serde_json::to_value(TextSource::TextLayer).unwrap(),
            serde_json::json!("text_layer")
        );
        assert_eq!(
            serde_json::to_value(TextSource::Ocr).unwrap(),
            serde_json::json!("ocr")
        );
    }
}
