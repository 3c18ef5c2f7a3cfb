//! Heuristic risk flags.

use cta_core::RiskFlag;

/// (phrase, warning) pairs, tested in order against lower-cased text.
pub const RISK_RULES: &[(&str, &str)] = &[
    ("termination for convenience", "Termination may favor sponsor"),
    ("sole discretion", "One-sided decision-making clause"),
    ("no obligation to pay", "Payment obligation is unclear"),
];

/// Flags for every rule phrase present in `text`, in rule order.
pub fn flag_risks(text: &str) -> Vec<RiskFlag> {
    let lower = text.to_lowercase();
    RISK_RULES
        .iter()
        .filter(|(phrase, _)| lower.contains(phrase))
        .map(|(phrase, warning)| RiskFlag {
            phrase: phrase.to_string(),
            warning: warning.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_flags_in_declared_order() {
        let text = "Sponsor has No Obligation To Pay for data. \
                    Decisions are at Sponsor's SOLE DISCRETION.";
        let flags = flag_risks(text);
        let warnings: Vec<&str> = flags.iter().map(|f| f.warning.as_str()).collect();
        assert_eq!(
            warnings,
            vec![
                "One-sided decision-making clause",
                "Payment obligation is unclear"
            ]
        );
    }

    #[test]
    fn test_all_flags() {
        let text = "termination for convenience; sole discretion; no obligation to pay";
        assert_eq!(flag_risks(text).len(), 3);
        assert_eq!(flag_risks(text)[0].phrase, "termination for convenience");
    }

    #[test]
    fn test_no_flags() {
        assert!(flag_risks("Either party may terminate on 30 days notice.").is_empty());
    }
}
