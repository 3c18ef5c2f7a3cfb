//! Collaborator traits for the analysis pipeline.
//!
//! Each external capability (text layer, rasterizer, OCR, summarizer) sits
//! behind a trait so concrete tools can be swapped and tests can inject fakes.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::PageImage;

// =============================================================================
// DOCUMENT TEXT TRAITS
// =============================================================================

/// Extracts the embedded text layer of a document, one string per page.
#[async_trait]
pub trait TextLayerExtractor: Send + Sync {
    /// Extract per-page text. Pages without a text layer yield an empty string.
    async fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>>;

    /// Check if the extractor's external dependencies are available.
    async fn health_check(&self) -> Result<bool>;

    /// Human-readable name of this extractor.
    fn name(&self) -> &str;
}

/// Renders every page of a document to an image.
#[async_trait]
pub trait PageRasterizer: Send + Sync {
    /// Render all pages, in page order.
    async fn render_pages(&self, data: &[u8]) -> Result<Vec<PageImage>>;

    /// Check if the rasterizer's external dependencies are available.
    async fn health_check(&self) -> Result<bool>;

    /// Human-readable name of this rasterizer.
    fn name(&self) -> &str;
}

/// Recognizes text in a single page image.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Recognize text in one rendered page.
    async fn recognize(&self, page: &PageImage) -> Result<String>;

    /// Check if the engine is available.
    async fn health_check(&self) -> Result<bool>;

    /// Human-readable name of this engine.
    fn name(&self) -> &str;
}

// =============================================================================
// SUMMARIZATION TRAITS
// =============================================================================

/// Backend producing a prose summary from a plain text or instruction payload.
///
/// Failures are reported as `Error::Summarization` so callers can recover.
#[async_trait]
pub trait SummarizationBackend: Send + Sync {
    /// Summarize the payload.
    async fn summarize(&self, payload: &str) -> Result<String>;

    /// Get the model name being used.
    fn model_name(&self) -> &str;
}
