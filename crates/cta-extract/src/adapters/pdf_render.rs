//! PdfRender rasterizer: renders every PDF page to PNG using `pdftoppm`.

use std::fs;

use async_trait::async_trait;
use tempfile::TempDir;
use tokio::process::Command;
use tracing::debug;

use cta_core::defaults::{EXTRACTION_CMD_TIMEOUT_SECS, OCR_DPI, RENDER_TIMEOUT_MULTIPLIER};
use cta_core::{Error, PageImage, PageRasterizer, Result};

use super::command::{binary_available, run_cmd_with_timeout, validate_pdf, write_temp_file};

/// Page rasterizer backed by `pdftoppm`.
pub struct PdftoppmRasterizer {
    dpi: u32,
    timeout_secs: u64,
}

impl PdftoppmRasterizer {
    pub fn new(dpi: u32, timeout_secs: u64) -> Self {
        Self { dpi, timeout_secs }
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }
}

impl Default for PdftoppmRasterizer {
    fn default() -> Self {
        Self::new(OCR_DPI, EXTRACTION_CMD_TIMEOUT_SECS)
    }
}

#[async_trait]
impl PageRasterizer for PdftoppmRasterizer {
    async fn render_pages(&self, data: &[u8]) -> Result<Vec<PageImage>> {
        validate_pdf(data)?;

        let tmpfile = write_temp_file(data, ".pdf")?;
        let pdf_path = tmpfile.path().to_string_lossy().to_string();

        // Create temp dir for rendered page images
        let img_dir = TempDir::new()
            .map_err(|e| Error::Internal(format!("Failed to create temp dir: {}", e)))?;
        let img_prefix = img_dir.path().join("page").to_string_lossy().to_string();

        debug!(dpi = self.dpi, "Rendering PDF pages for OCR");

        run_cmd_with_timeout(
            Command::new("pdftoppm")
                .arg("-png")
                .arg("-r")
                .arg(self.dpi.to_string())
                .arg(&pdf_path)
                .arg(&img_prefix),
            self.timeout_secs * RENDER_TIMEOUT_MULTIPLIER,
        )
        .await?;

        // pdftoppm zero-pads page numbers, so name order is page order
        let mut paths = Vec::new();
        let entries = fs::read_dir(img_dir.path())
            .map_err(|e| Error::Internal(format!("Failed to read temp dir: {}", e)))?;
        for entry in entries {
            let entry =
                entry.map_err(|e| Error::Internal(format!("Failed to read dir entry: {}", e)))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("png") {
                paths.push(path);
            }
        }
        paths.sort();

        let mut pages = Vec::with_capacity(paths.len());
        for (index, path) in paths.iter().enumerate() {
            let data = fs::read(path)?;
            pages.push(PageImage {
                page_number: index + 1,
                data,
            });
        }

        debug!(pages = pages.len(), "Rendered PDF pages");
        Ok(pages)
    }

    async fn health_check(&self) -> Result<bool> {
        Ok(binary_available("pdftoppm", "-v").await)
    }

    fn name(&self) -> &str {
        "pdftoppm"
    }
}
