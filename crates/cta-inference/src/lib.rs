//! # cta-inference
//!
//! Summarization backends for the CTA analyzer.
//!
//! This crate provides:
//! - Hugging Face Inference API backend (default)
//! - OpenAI-compatible backend (optional, feature `openai`)
//! - Backend selection from `SUMMARY_BACKEND`
//! - A mock backend for deterministic tests
//!
//! # Example
//!
//! ```rust,no_run
//! use cta_inference::HuggingFaceBackend;
//! use cta_core::SummarizationBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = HuggingFaceBackend::from_env().unwrap();
//!     let summary = backend.summarize("This Agreement is made between...").await;
//!     println!("{:?}", summary);
//! }
//! ```

mod http;
pub mod huggingface;
pub mod mock;
pub mod provider;

#[cfg(feature = "openai")]
pub mod openai;

pub use huggingface::{HuggingFaceBackend, HuggingFaceConfig};
pub use provider::{backend_from_env, SummaryBackendKind};

#[cfg(feature = "openai")]
pub use openai::{OpenAIBackend, OpenAIConfig};
