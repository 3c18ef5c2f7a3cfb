//! PdfText extractor: reads the embedded text layer using `pdftotext` (poppler-utils).

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use cta_core::defaults::EXTRACTION_CMD_TIMEOUT_SECS;
use cta_core::{Result, TextLayerExtractor};

use super::command::{binary_available, run_cmd_with_timeout, validate_pdf, write_temp_file};

/// Page separator emitted by `pdftotext`.
const FORM_FEED: char = '\u{000C}';

/// Text-layer extractor backed by `pdftotext`.
///
/// A single invocation covers the whole document; pages are recovered by
/// splitting on the form feed `pdftotext` writes after every page.
pub struct PdfTextExtractor {
    timeout_secs: u64,
}

impl PdfTextExtractor {
    pub fn new(timeout_secs: u64) -> Self {
        Self { timeout_secs }
    }
}

impl Default for PdfTextExtractor {
    fn default() -> Self {
        Self::new(EXTRACTION_CMD_TIMEOUT_SECS)
    }
}

/// Split `pdftotext` output into per-page strings.
fn split_pages(output: &str) -> Vec<String> {
    if output.is_empty() {
        return Vec::new();
    }
    let mut pages: Vec<String> = output.split(FORM_FEED).map(str::to_string).collect();
    // Every page is terminated by a form feed, leaving one empty tail segment.
    if output.ends_with(FORM_FEED) {
        pages.pop();
    }
    pages
}

#[async_trait]
impl TextLayerExtractor for PdfTextExtractor {
    async fn extract_pages(&self, data: &[u8]) -> Result<Vec<String>> {
        validate_pdf(data)?;

        let tmpfile = write_temp_file(data, ".pdf")?;
        let tmp_path = tmpfile.path().to_string_lossy().to_string();

        let output = run_cmd_with_timeout(
            Command::new("pdftotext")
                .arg("-enc")
                .arg("UTF-8")
                .arg(&tmp_path)
                .arg("-"),
            self.timeout_secs,
        )
        .await?;

        let pages = split_pages(&output);
        debug!(
            pages = pages.len(),
            char_count = output.len(),
            "pdftotext extraction complete"
        );
        Ok(pages)
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(binary_available("pdftotext", "-v").await)
    }

    fn name(&self) -> &str {
        "pdftotext"
    }
}
