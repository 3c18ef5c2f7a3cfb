//! Text source resolution: text layer first, OCR when the layer is too sparse.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info, warn};

use cta_core::defaults::{
    EXTRACTION_CMD_TIMEOUT_SECS, MIN_TEXT_LAYER_CHARS, OCR_DPI, OCR_FALLBACK_NOTICE, OCR_LANGUAGE,
};
use cta_core::{
    OcrEngine, PageRasterizer, ResolvedText, Result, TextLayerExtractor, TextSource,
};

use crate::adapters::{validate_pdf, PdfTextExtractor, PdftoppmRasterizer, TesseractOcr};

/// Resolves the text of one document.
///
/// The OCR path is taken only when the trimmed text layer has at most
/// `min_text_chars` characters, and it has no further fallback: whatever the
/// OCR engine returns (even nothing) is the resolved text.
pub struct TextResolver {
    text_layer: Arc<dyn TextLayerExtractor>,
    rasterizer: Arc<dyn PageRasterizer>,
    ocr: Arc<dyn OcrEngine>,
    min_text_chars: usize,
}

impl TextResolver {
    pub fn new(
        text_layer: Arc<dyn TextLayerExtractor>,
        rasterizer: Arc<dyn PageRasterizer>,
        ocr: Arc<dyn OcrEngine>,
    ) -> Self {
        Self {
            text_layer,
            rasterizer,
            ocr,
            min_text_chars: MIN_TEXT_LAYER_CHARS,
        }
    }

    /// Override the sparse-text threshold (default: 100).
    pub fn with_min_text_chars(mut self, min_text_chars: usize) -> Self {
        self.min_text_chars = min_text_chars;
        self
    }

    /// Build the poppler/tesseract resolver from environment variables.
    ///
    /// Reads `OCR_DPI`, `OCR_LANGUAGE`, `EXTRACTION_CMD_TIMEOUT_SECS`, and
    /// `MIN_TEXT_LAYER_CHARS`, falling back to `cta_core::defaults`.
    pub fn from_env() -> Self {
        let timeout_secs = env_parse("EXTRACTION_CMD_TIMEOUT_SECS", EXTRACTION_CMD_TIMEOUT_SECS);
        let dpi = env_parse("OCR_DPI", OCR_DPI);
        let language = std::env::var("OCR_LANGUAGE").unwrap_or_else(|_| OCR_LANGUAGE.to_string());
        let min_text_chars = env_parse("MIN_TEXT_LAYER_CHARS", MIN_TEXT_LAYER_CHARS);

        Self::new(
            Arc::new(PdfTextExtractor::new(timeout_secs)),
            Arc::new(PdftoppmRasterizer::new(dpi, timeout_secs)),
            Arc::new(TesseractOcr::new(language, timeout_secs)),
        )
        .with_min_text_chars(min_text_chars)
    }

    pub fn min_text_chars(&self) -> usize {
        self.min_text_chars
    }

    /// Resolve document text, falling back to OCR for sparse text layers.
    pub async fn resolve(&self, data: &[u8]) -> Result<ResolvedText> {
        validate_pdf(data)?;

        let pages = self.text_layer.extract_pages(data).await?;
        let text = pages.join("\n");
        let trimmed_chars = text.trim().chars().count();

        if trimmed_chars > self.min_text_chars {
            debug!(
                pages = pages.len(),
                char_count = trimmed_chars,
                "Using embedded text layer"
            );
            return Ok(ResolvedText {
                text,
                source: TextSource::TextLayer,
                page_count: pages.len(),
                notice: None,
            });
        }

        warn!(
            char_count = trimmed_chars,
            threshold = self.min_text_chars,
            "{}",
            OCR_FALLBACK_NOTICE
        );

        let images = self.rasterizer.render_pages(data).await?;
        let mut ocr_text = String::new();
        for image in &images {
            let page_text = self.ocr.recognize(image).await?;
            ocr_text.push_str(&page_text);
        }

        info!(
            pages = images.len(),
            char_count = ocr_text.len(),
            "OCR fallback complete"
        );

        Ok(ResolvedText {
            text: ocr_text,
            source: TextSource::Ocr,
            page_count: images.len(),
            notice: Some(OCR_FALLBACK_NOTICE.to_string()),
        })
    }

    /// Run health checks on every collaborator, keyed by tool name.
    pub async fn health_check_all(&self) -> BTreeMap<String, bool> {
        let mut results = BTreeMap::new();
        results.insert(
            self.text_layer.name().to_string(),
            self.text_layer.health_check().await.unwrap_or(false),
        );
        results.insert(
            self.rasterizer.name().to_string(),
            self.rasterizer.health_check().await.unwrap_or(false),
        );
        results.insert(
            self.ocr.name().to_string(),
            self.ocr.health_check().await.unwrap_or(false),
        );
        results
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
