//! OpenAI-compatible summarization backend.
//!
//! Works with OpenAI, OpenRouter, and local servers that expose
//! `/chat/completions`.

mod backend;
pub mod types;

pub use backend::{OpenAIBackend, OpenAIConfig, DEFAULT_GEN_MODEL, DEFAULT_OPENAI_URL};
