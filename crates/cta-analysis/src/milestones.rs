//! Milestone detection over the full resolved text.

use once_cell::sync::Lazy;
use regex::Regex;

use cta_core::MilestoneFinding;

/// Milestone labels and their alternations, in report order.
const MILESTONE_RULES: &[(&str, &str)] = &[
    (
        "Contract Execution",
        r"contract execution|execution of (?:this|the) agreement|fully executed",
    ),
    (
        "Site Initiation Visit (SIV)",
        r"site initiation visit|site initiation|siv",
    ),
    (
        "First Subject In (FSI)",
        r"first subject in|first patient in|first subject enrolled|first patient enrolled|fsi|fpi",
    ),
    (
        "Last Subject In (LSI)",
        r"last subject in|last patient in|last subject enrolled|lsi|lpi",
    ),
    (
        "Last Subject Out (LSO)",
        r"last subject out|last patient out|last subject last visit|lso|lpo|lslv",
    ),
    ("Database Lock", r"database lock(?:ed)?|db lock|dbl"),
    (
        "Site Close-Out",
        r"site close-?out(?: visit)?|close-?out visit|study close-?out",
    ),
    (
        "Final Study Report",
        r"final study report|clinical study report|final report|csr",
    ),
];

static MILESTONE_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    MILESTONE_RULES
        .iter()
        .map(|(label, alternation)| {
            let pattern = format!(r"(?i)\b(?:{})\b", alternation);
            (*label, Regex::new(&pattern).expect("milestone pattern is valid"))
        })
        .collect()
});

/// One row per milestone, in declaration order, with the first match literal.
pub fn extract_milestones(text: &str) -> Vec<MilestoneFinding> {
    MILESTONE_PATTERNS
        .iter()
        .map(|(label, re)| match re.find(text) {
            Some(m) => MilestoneFinding {
                label: label.to_string(),
                mentioned: true,
                example: m.as_str().to_string(),
            },
            None => MilestoneFinding {
                label: label.to_string(),
                mentioned: false,
                example: String::new(),
            },
        })
        .collect()
}
