//! # cta-core
//!
//! Core types, traits, and abstractions for the CTA analyzer.
//!
//! This crate provides the data model of one analysis pass, the shared error
//! type, default constants, and the collaborator traits that the extraction
//! and inference crates implement.

pub mod defaults;
pub mod error;
pub mod models;
pub mod traits;

// Re-export commonly used types at crate root
pub use error::{Error, Result, SummarizationError};
pub use models::*;
pub use traits::*;
