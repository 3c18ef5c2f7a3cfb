//! Clause extraction.
//!
//! Party clauses are searched in the document header only; budget amounts and
//! the presence checks run over the whole text.

use once_cell::sync::Lazy;
use regex::Regex;

use cta_core::defaults::CLAUSE_HEADER_WINDOW_CHARS;
use cta_core::{ClauseFinding, ClauseFindings, ClauseValue};

pub const SPONSOR: &str = "Sponsor";
pub const INSTITUTION: &str = "Institution";
pub const INVESTIGATOR: &str = "Investigator";
pub const BUDGET_AMOUNTS: &str = "Budget Amounts";
pub const INDEMNIFICATION: &str = "Includes Indemnification";
pub const INJURY_CLAUSE: &str = "Includes Injury Clause";
pub const TERMINATION_RIGHTS: &str = "Termination Rights";

/// Party labels and their rest-of-line patterns, in report order.
static PARTY_PATTERNS: Lazy<Vec<(&'static str, Regex)>> = Lazy::new(|| {
    [SPONSOR, INSTITUTION, INVESTIGATOR]
        .into_iter()
        .map(|label| {
            let pattern = format!("{}.*", regex::escape(label));
            (label, Regex::new(&pattern).expect("party pattern is valid"))
        })
        .collect()
});

/// `$` + 1-3 digits, comma-grouped thousands, optional cents.
pub(crate) static DOLLAR_AMOUNT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$[0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]{2})?").expect("amount pattern is valid")
});

/// Extract the fixed clause table from resolved text.
pub fn extract_clauses(text: &str) -> ClauseFindings {
    let header = header_window(text);
    let mut entries: Vec<ClauseFinding> = PARTY_PATTERNS
        .iter()
        .map(|(label, re)| ClauseFinding {
            clause: label.to_string(),
            value: ClauseValue::Matches(
                re.find_iter(header).map(|m| m.as_str().to_string()).collect(),
            ),
        })
        .collect();

    entries.push(ClauseFinding {
        clause: BUDGET_AMOUNTS.to_string(),
        value: ClauseValue::Matches(dollar_amounts(text)),
    });

    let lower = text.to_lowercase();
    for (label, present) in [
        (INDEMNIFICATION, text.contains("Indemnification")),
        (INJURY_CLAUSE, text.contains("Trial Participant Injury")),
        (TERMINATION_RIGHTS, lower.contains("terminate")),
    ] {
        entries.push(ClauseFinding {
            clause: label.to_string(),
            value: ClauseValue::Present(present),
        });
    }

    ClauseFindings { entries }
}

/// All dollar amounts in `text`, in order, duplicates kept.
pub fn dollar_amounts(text: &str) -> Vec<String> {
    DOLLAR_AMOUNT
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Leading [`CLAUSE_HEADER_WINDOW_CHARS`] characters, cut on a char boundary.
fn header_window(text: &str) -> &str {
    match text.char_indices().nth(CLAUSE_HEADER_WINDOW_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scenario_parties_and_budget() {
        let text = "Sponsor: Acme Pharma\nInstitution: Metro Hospital\n\
                    The total cost of the study is $41,254.93 payable in installments.";
        let clauses = extract_clauses(text);

        assert_eq!(clauses.matches(SPONSOR).to_vec(), vec!["Sponsor: Acme Pharma"]);
        assert_eq!(
            clauses.matches(INSTITUTION).to_vec(),
            vec!["Institution: Metro Hospital"]
        );
        assert!(clauses.matches(INVESTIGATOR).is_empty());
        assert_eq!(clauses.matches(BUDGET_AMOUNTS).to_vec(), vec!["$41,254.93"]);
    }

    #[test]
    fn test_table_order_is_fixed() {
        let labels: Vec<String> = extract_clauses("")
            .entries
            .into_iter()
            .map(|e| e.clause)
            .collect();
        assert_eq!(
            labels,
            vec![
                SPONSOR,
                INSTITUTION,
                INVESTIGATOR,
                BUDGET_AMOUNTS,
                INDEMNIFICATION,
                INJURY_CLAUSE,
                TERMINATION_RIGHTS
            ]
        );
    }

    #[test]
    fn test_party_matches_limited_to_header_window() {
        let text = format!("{}\nSponsor: Late Corp", "x".repeat(2100));
        assert!(extract_clauses(&text).matches(SPONSOR).is_empty());

        let text = format!("{}Sponsor: Near Corp", "é".repeat(1990));
        assert_eq!(
            extract_clauses(&text).matches(SPONSOR).to_vec(),
            vec!["Sponsor: N"]
        );
    }

    #[test]
    fn test_multiple_party_matches_in_order() {
        let text = "Sponsor: Acme\nThe Sponsor shall pay.\nPrincipal Investigator: Dr. Lee";
        let clauses = extract_clauses(text);
        assert_eq!(
            clauses.matches(SPONSOR).to_vec(),
            vec!["Sponsor: Acme", "Sponsor shall pay."]
        );
        assert_eq!(
            clauses.matches(INVESTIGATOR).to_vec(),
            vec!["Investigator: Dr. Lee"]
        );
    }

    #[test]
    fn test_budget_amounts_keep_duplicates_and_grammar() {
        let text = "Fees: $1,000 and $1,000; overhead $250.50; bad $1,00 and $12345.678; $.99";
        let amounts = dollar_amounts(text);
        assert_eq!(
            amounts,
            vec!["$1,000", "$1,000", "$250.50", "$1", "$123"]
        );

        let grammar = Regex::new(r"^\$[0-9]{1,3}(?:,[0-9]{3})*(?:\.[0-9]{2})?$").unwrap();
        for amount in &amounts {
            assert!(grammar.is_match(amount), "{} fails the amount grammar", amount);
        }
    }

    #[test]
    fn test_presence_checks_case_rules() {
        let clauses = extract_clauses("indemnification applies. TERMINATE upon notice.");
        assert_eq!(clauses.is_present(INDEMNIFICATION), Some(false));
        assert_eq!(clauses.is_present(TERMINATION_RIGHTS), Some(true));
        assert_eq!(clauses.is_present(INJURY_CLAUSE), Some(false));

        let clauses = extract_clauses("Section 9. Indemnification. Trial Participant Injury.");
        assert_eq!(clauses.is_present(INDEMNIFICATION), Some(true));
        assert_eq!(clauses.is_present(INJURY_CLAUSE), Some(true));
        assert_eq!(clauses.is_present(TERMINATION_RIGHTS), Some(false));
    }
}
