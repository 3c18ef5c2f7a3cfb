//! # cta-extract
//!
//! Document text acquisition for the CTA analyzer.
//!
//! This crate provides:
//! - `pdftotext` text-layer extraction
//! - `pdftoppm` page rendering and `tesseract` OCR
//! - The text source resolver that picks between them

pub mod adapters;
pub mod resolver;

pub use adapters::{validate_pdf, PdfTextExtractor, PdftoppmRasterizer, TesseractOcr};
pub use resolver::TextResolver;
