//! Summarization payload construction.

use cta_core::PromptMode;

/// Instruction wrapped around the excerpt in [`PromptMode::Instructed`].
const INSTRUCTION_TEMPLATE: &str = "\
Summarize the following Clinical Trial Agreement for a contract reviewer.
Cover each of these points, writing \"not stated\" when the text is silent:
- Sponsor and site (institution and investigator) identity
- Trial objective and phase
- Study duration
- Key milestones
- Payment terms
- Reimbursement for participant injury
- Termination rights
- Confidentiality obligations

Agreement text:
";

/// Build the text sent to the summarization backend.
pub fn build_payload(text: &str, mode: PromptMode) -> String {
    match mode {
        PromptMode::Plain => text.to_string(),
        PromptMode::Instructed => format!("{}{}", INSTRUCTION_TEMPLATE, text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_passes_text_through() {
        assert_eq!(build_payload("Excerpt", PromptMode::Plain), "Excerpt");
    }

    #[test]
    fn test_instructed_enumerates_categories() {
        let payload = build_payload("Excerpt", PromptMode::Instructed);
        for topic in [
            "Sponsor and site",
            "objective and phase",
            "duration",
            "milestones",
            "Payment terms",
            "participant injury",
            "Termination",
            "Confidentiality",
        ] {
            assert!(payload.contains(topic), "missing {}", topic);
        }
        assert!(payload.ends_with("Agreement text:\nExcerpt"));
    }
}
