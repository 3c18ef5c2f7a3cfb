//! Tesseract OCR engine: recognizes text in one rendered page image.

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use cta_core::defaults::{EXTRACTION_CMD_TIMEOUT_SECS, OCR_LANGUAGE};
use cta_core::{Error, OcrEngine, PageImage, Result};

use super::command::{binary_available, run_cmd_with_timeout, write_temp_file};

/// OCR engine backed by the `tesseract` CLI.
pub struct TesseractOcr {
    language: String,
    timeout_secs: u64,
}

impl TesseractOcr {
    pub fn new(language: impl Into<String>, timeout_secs: u64) -> Self {
        Self {
            language: language.into(),
            timeout_secs,
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new(OCR_LANGUAGE, EXTRACTION_CMD_TIMEOUT_SECS)
    }
}

#[async_trait]
impl OcrEngine for TesseractOcr {
    async fn recognize(&self, page: &PageImage) -> Result<String> {
        if page.data.is_empty() {
            return Err(Error::Extraction(format!(
                "Page {} rendered to an empty image",
                page.page_number
            )));
        }

        let image = write_temp_file(&page.data, ".png")?;
        let image_path = image.path().to_string_lossy().to_string();

        // tesseract INPUT stdout -l LANG writes the recognized text to stdout
        let text = run_cmd_with_timeout(
            Command::new("tesseract")
                .arg(&image_path)
                .arg("stdout")
                .arg("-l")
                .arg(&self.language),
            self.timeout_secs,
        )
        .await
        .map_err(|e| Error::Extraction(format!("OCR failed for page {}: {}", page.page_number, e)))?;

        debug!(
            page = page.page_number,
            char_count = text.len(),
            "OCR page complete"
        );
        Ok(text)
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(binary_available("tesseract", "--version").await)
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}
