//! Text normalization into a compact summarization excerpt.
//!
//! A line qualifies when, after trimming, it is longer than
//! [`EXCERPT_MIN_LINE_CHARS`] characters, is not purely numeric, does not
//! start with "whereas", and does not mention "confidential" (both checks
//! case-insensitive). At most [`EXCERPT_MAX_LINES`] qualifying lines are kept
//! in order and joined by single spaces.

use cta_core::defaults::{
    EXCERPT_MAX_LINES, EXCERPT_MIN_LINE_CHARS, NO_USABLE_TEXT, SUMMARY_FALLBACK_CHARS,
};

/// Normalize resolved text into an excerpt.
///
/// Returns the [`NO_USABLE_TEXT`] sentinel when no line qualifies, never an
/// empty string.
pub fn normalize(text: &str) -> String {
    let kept: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| qualifies(line))
        .take(EXCERPT_MAX_LINES)
        .collect();

    if kept.is_empty() {
        NO_USABLE_TEXT.to_string()
    } else {
        kept.join(" ")
    }
}

/// Whether `excerpt` is the no-usable-text sentinel.
pub fn is_sentinel(excerpt: &str) -> bool {
    excerpt == NO_USABLE_TEXT
}

/// Text to hand to the summarizer for this excerpt.
///
/// The sentinel is replaced by the first [`SUMMARY_FALLBACK_CHARS`]
/// characters of the trimmed resolved text. `None` means there is nothing
/// to summarize.
pub fn summary_input(resolved: &str, excerpt: &str) -> Option<String> {
    if !is_sentinel(excerpt) {
        return Some(excerpt.to_string());
    }
    let fallback: String = resolved
        .trim()
        .chars()
        .take(SUMMARY_FALLBACK_CHARS)
        .collect();
    if fallback.is_empty() {
        None
    } else {
        Some(fallback)
    }
}

fn qualifies(line: &str) -> bool {
    if line.chars().count() <= EXCERPT_MIN_LINE_CHARS {
        return false;
    }
    if line.chars().all(|c| c.is_ascii_digit()) {
        return false;
    }
    let lower = line.to_lowercase();
    !lower.starts_with("whereas") && !lower.contains("confidential")
}
