//! Error types for the CTA analyzer.

use thiserror::Error;

/// Result type alias using the analyzer's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for analyzer operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Uploaded document is empty, not a PDF, or otherwise unreadable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Text-layer extraction, page rendering, or OCR failed
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Summarization backend failed (recoverable at the pipeline level)
    #[error("Summarization failed: {0}")]
    Summarization(#[from] SummarizationError),

    /// Artifact generation (TXT/XLSX) failed
    #[error("Export error: {0}")]
    Export(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failure modes of a summarization request.
///
/// Each variant is a distinct "summarization failed" condition. None of them
/// abort the rest of an analysis pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SummarizationError {
    /// No credential was supplied for the backend.
    #[error("missing API credential ({0} is not set)")]
    MissingCredential(String),

    /// The backend rejected the credential.
    #[error("API credential rejected (HTTP {status}): {message}")]
    InvalidCredential { status: u16, message: String },

    /// The backend answered with a non-success status.
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// The backend answered 2xx but the payload could not be interpreted.
    #[error("malformed response: {0}")]
    MalformedResponse(String),

    /// Network failure or timeout before a response arrived.
    #[error("request failed: {0}")]
    Transport(String),

    /// Nothing to summarize.
    #[error("the extracted PDF text is too short or empty")]
    EmptyInput,
}

impl SummarizationError {
    /// Classify a non-success HTTP status into a credential or status error.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        match status {
            401 | 403 => Self::InvalidCredential { status, message },
            _ => Self::Status { status, message },
        }
    }

    /// HTTP status reported by the backend, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::InvalidCredential { status, .. } | Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
