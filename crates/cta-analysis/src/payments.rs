//! Payment-term detection.
//!
//! Two strategies produce the same row shape:
//!
//! - **generic**: keyword-near-amount patterns, reporting up to
//!   [`PAYMENT_MAX_EXAMPLES`] matches per label.
//! - **document specific**: trigger phrases for a known agreement layout.
//!   A fired rule reports its description plus the dollar amounts found on
//!   the line holding the trigger, so the figures always come from the
//!   document under review. Rules that do not fire still get a row, with
//!   `mentioned = false` and no detail.

use once_cell::sync::Lazy;
use regex::Regex;

use cta_core::defaults::{EXAMPLE_SEPARATOR, PAYMENT_MAX_EXAMPLES};
use cta_core::{PaymentFinding, PaymentStrategy};

use crate::clauses::dollar_amounts;

// =============================================================================
// GENERIC STRATEGY
// =============================================================================

/// Payment labels and their patterns, in report order.
///
/// Patterns with a capture group report group 1; the others report the whole
/// match.
const GENERIC_RULES: &[(&str, &str)] = &[
    (
        "Start-up Fee",
        r"(?i)\b(?:study\s+)?(?:start-?up|site\s+activation)\s+fees?\b[^$]{0,80}?(\$[0-9][0-9,]*(?:\.[0-9]{2})?)",
    ),
    (
        "Per-Subject Payment",
        r"(?i)\bper[\s-](?:subject|patient|participant)\b[^$]{0,80}?(\$[0-9][0-9,]*(?:\.[0-9]{2})?)",
    ),
    (
        "Screen Failure Reimbursement",
        r"(?i)\bscreen(?:ing)?[\s-]fail(?:ure)?s?\b[^$]{0,80}?(\$[0-9][0-9,]*(?:\.[0-9]{2})?)",
    ),
    (
        "IRB / Ethics Fees",
        r"(?i)\b(?:irb|iec|ethics\s+committee)\b[^$]{0,80}?(\$[0-9][0-9,]*(?:\.[0-9]{2})?)",
    ),
    (
        "Close-Out Fee",
        r"(?i)\bclose-?out\b[^$]{0,80}?(\$[0-9][0-9,]*(?:\.[0-9]{2})?)",
    ),
    (
        "Invoiceable Items",
        r"(?i)\b(?:invoiceable|pass[\s-]through)\b[^$]{0,80}?(\$[0-9][0-9,]*(?:\.[0-9]{2})?)",
    ),
    (
        "Overhead / Indirect Costs",
        r"(?i)\b(?:overhead|indirect\s+costs?|f&a)[^%]{0,60}?([0-9]{1,3}(?:\.[0-9]+)?\s?%)",
    ),
    (
        "Holdback",
        r"(?i)\b(?:holdback|withh(?:e|o)ld(?:ing)?|retain(?:ed)?)\b[^%]{0,60}?([0-9]{1,3}(?:\.[0-9]+)?\s?%)",
    ),
    (
        "Payment Schedule",
        r"(?i)\b(?:quarterly|monthly|within\s+[0-9]+\s+days|net\s+[0-9]+)\b",
    ),
];

static GENERIC_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    GENERIC_RULES
        .iter()
        .map(|(label, pattern)| {
            (*label, Regex::new(pattern).expect("payment pattern is valid"))
        })
        .collect()
});

/// One row per generic payment label, in declaration order.
pub fn extract_generic(text: &str) -> Vec<PaymentFinding> {
    GENERIC_PATTERNS
        .iter()
        .map(|(label, re)| {
            let examples = collect_matches(re, text);
            PaymentFinding {
                label: label.to_string(),
                mentioned: !examples.is_empty(),
                detail: examples
                    .into_iter()
                    .take(PAYMENT_MAX_EXAMPLES)
                    .collect::<Vec<_>>()
                    .join(EXAMPLE_SEPARATOR),
            }
        })
        .collect()
}

fn collect_matches(re: &Regex, text: &str) -> Vec<String> {
    if re.captures_len() > 1 {
        re.captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
            .collect()
    } else {
        re.find_iter(text).map(|m| m.as_str().to_string()).collect()
    }
}

// =============================================================================
// DOCUMENT-SPECIFIC STRATEGY
// =============================================================================

/// A trigger-phrase rule for a known agreement layout.
#[derive(Debug, Clone, Copy)]
pub struct DocumentRule {
    /// Case-sensitive literals; any one fires the rule.
    pub triggers: &'static [&'static str],
    pub label: &'static str,
    pub mentioned: bool,
    pub description: &'static str,
}

pub const DOCUMENT_RULES: &[DocumentRule] = &[
    DocumentRule {
        triggers: &["Study Start-Up Fee", "Start-up Fee", "Startup Fee"],
        label: "Start-up Fee",
        mentioned: true,
        description: "Non-refundable fee invoiced at study activation",
    },
    DocumentRule {
        triggers: &["Per Trial Participant", "per Trial Participant", "Per Patient"],
        label: "Per-Participant Payment",
        mentioned: true,
        description: "Paid per participant according to completed visits",
    },
    DocumentRule {
        triggers: &["Screen Failure", "screen failure"],
        label: "Screen Failure Reimbursement",
        mentioned: true,
        description: "Reimbursed per screen-failed participant",
    },
    DocumentRule {
        triggers: &["Withholding", "withhold", "Holdback"],
        label: "Holdback",
        mentioned: true,
        description: "Portion of payments withheld until study close-out",
    },
    DocumentRule {
        triggers: &["Invoiceable", "invoiceable"],
        label: "Invoiceable Items",
        mentioned: true,
        description: "Invoiced separately against actual costs",
    },
    DocumentRule {
        triggers: &["Trial Participant Injury"],
        label: "Subject Injury Costs",
        mentioned: true,
        description: "Sponsor reimburses treatment of study-related injury",
    },
    DocumentRule {
        triggers: &["no obligation to pay", "No obligation to pay"],
        label: "Guaranteed Payment",
        mentioned: false,
        description: "Sponsor may decline payment for some completed work",
    },
];

/// One row per document rule, in declaration order.
pub fn extract_document_specific(text: &str) -> Vec<PaymentFinding> {
    DOCUMENT_RULES
        .iter()
        .map(|rule| match rule.triggers.iter().filter_map(|t| text.find(t)).min() {
            Some(at) => PaymentFinding {
                label: rule.label.to_string(),
                mentioned: rule.mentioned,
                detail: describe(rule, line_at(text, at)),
            },
            None => PaymentFinding {
                label: rule.label.to_string(),
                mentioned: false,
                detail: String::new(),
            },
        })
        .collect()
}

fn describe(rule: &DocumentRule, line: &str) -> String {
    let observed: Vec<String> = dollar_amounts(line)
        .into_iter()
        .take(PAYMENT_MAX_EXAMPLES)
        .collect();
    if observed.is_empty() {
        rule.description.to_string()
    } else {
        format!(
            "{} (observed: {})",
            rule.description,
            observed.join(EXAMPLE_SEPARATOR)
        )
    }
}

/// The full line of `text` containing byte offset `at`.
fn line_at(text: &str, at: usize) -> &str {
    let start = text[..at].rfind('\n').map_or(0, |i| i + 1);
    let end = text[at..].find('\n').map_or(text.len(), |i| at + i);
    &text[start..end]
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Run the payment extractor(s) selected by `strategy`.
pub fn extract_payments(text: &str, strategy: PaymentStrategy) -> Vec<PaymentFinding> {
    match strategy {
        PaymentStrategy::Generic => extract_generic(text),
        PaymentStrategy::DocumentSpecific => extract_document_specific(text),
        PaymentStrategy::Combined => {
            let mut rows = extract_generic(text);
            rows.extend(extract_document_specific(text));
            rows
        }
    }
}
