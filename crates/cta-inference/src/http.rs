//! Response handling shared by the HTTP summarization backends.

use cta_core::SummarizationError;

/// Longest backend error body carried into a diagnostic.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Map a reqwest send failure to a transport error.
pub(crate) fn transport_error(err: reqwest::Error, timeout_secs: u64) -> SummarizationError {
    if err.is_timeout() {
        SummarizationError::Transport(format!("timed out after {}s", timeout_secs))
    } else {
        SummarizationError::Transport(err.to_string())
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"error": "..."}` and `{"error": {"message": "..."}}`; any
/// other body is returned verbatim (truncated).
pub(crate) fn error_message(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let error = &value["error"];
        if let Some(msg) = error.as_str() {
            return msg.to_string();
        }
        if let Some(msg) = error["message"].as_str() {
            return msg.to_string();
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
}
