//! Wire types for the `/chat/completions` endpoint, reduced to what a
//! single-turn summary needs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct SummaryRequest<'a> {
    pub model: &'a str,
    pub messages: [PromptMessage<'a>; 2],
    pub temperature: f32,
    pub stream: bool,
}

#[derive(Debug, Serialize)]
pub struct PromptMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CompletionBody {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub message: AssistantReply,
}

/// `content` is null when the model refuses or only calls tools.
#[derive(Debug, Deserialize)]
pub struct AssistantReply {
    pub content: Option<String>,
}
