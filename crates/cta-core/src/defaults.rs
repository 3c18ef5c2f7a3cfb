//! Centralized default constants for the CTA analyzer.
//!
//! **This module is the single source of truth** for shared default values.
//! Organized by domain area.

// =============================================================================
// TEXT RESOLUTION
// =============================================================================

/// Trimmed text-layer length at or below which the OCR fallback runs.
pub const MIN_TEXT_LAYER_CHARS: usize = 100;

/// Rendering resolution for OCR page images.
pub const OCR_DPI: u32 = 300;

/// Tesseract language pack.
pub const OCR_LANGUAGE: &str = "eng";

/// Timeout for a single external command (pdftotext, tesseract) in seconds.
pub const EXTRACTION_CMD_TIMEOUT_SECS: u64 = 60;

/// Multiplier applied to the command timeout for whole-document rendering.
pub const RENDER_TIMEOUT_MULTIPLIER: u64 = 3;

/// Notice surfaced to the user when the OCR fallback is taken.
pub const OCR_FALLBACK_NOTICE: &str = "Detected a scanned or image-based PDF. Running OCR...";

// =============================================================================
// NORMALIZATION
// =============================================================================

/// Maximum number of qualifying lines kept in the excerpt.
pub const EXCERPT_MAX_LINES: usize = 30;

/// A line must be strictly longer than this (after trimming) to qualify.
pub const EXCERPT_MIN_LINE_CHARS: usize = 10;

/// Sentinel excerpt returned when no line qualifies.
pub const NO_USABLE_TEXT: &str = "No usable text found.";

/// Characters of resolved text used when the excerpt is the sentinel.
pub const SUMMARY_FALLBACK_CHARS: usize = 1000;

// =============================================================================
// PATTERN EXTRACTION
// =============================================================================

/// Leading characters searched for party clauses (Sponsor, Institution, Investigator).
pub const CLAUSE_HEADER_WINDOW_CHARS: usize = 2000;

/// Maximum examples reported per generic payment label.
pub const PAYMENT_MAX_EXAMPLES: usize = 2;

/// Separator between reported examples.
pub const EXAMPLE_SEPARATOR: &str = "; ";

/// Clause table cell for an empty match list.
pub const NONE_FOUND: &str = "None found";

/// Message rendered when no risk flag fires.
pub const NO_RISKS_DETECTED: &str = "No major risks detected.";

// =============================================================================
// SUMMARIZATION
// =============================================================================

/// Default Hugging Face Inference API base URL.
pub const HF_API_URL: &str = "https://api-inference.huggingface.co/models";

/// Default Hugging Face summarization model.
pub const HF_SUMMARY_MODEL: &str = "facebook/bart-large-cnn";

/// Environment variable holding the summarization credential.
pub const HF_API_KEY_VAR: &str = "HF_API_KEY";

/// Timeout for summarization requests in seconds.
pub const SUMMARY_TIMEOUT_SECS: u64 = 60;

// =============================================================================
// SERVER
// =============================================================================

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Maximum upload size in bytes (50 MB).
pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

/// Default CORS max-age in seconds (1 hour).
pub const CORS_MAX_AGE_SECS: u64 = 3600;

/// Entries kept in the per-document analysis cache.
pub const ANALYSIS_CACHE_SIZE: usize = 32;

/// Entries kept in the summary cache.
pub const SUMMARY_CACHE_SIZE: usize = 64;

// =============================================================================
// ARTIFACTS
// =============================================================================

/// File name of the summary download.
pub const SUMMARY_FILE_NAME: &str = "cta_summary.txt";

/// File name of the clause report download.
pub const CLAUSE_REPORT_FILE_NAME: &str = "cta_clauses.xlsx";

/// Column headers of the clause report.
pub const CLAUSE_REPORT_COLUMNS: [&str; 2] = ["Clause", "Extracted Info"];
