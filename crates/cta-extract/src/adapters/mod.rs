//! External-tool adapter implementations.

pub mod command;
pub mod pdf_render;
pub mod pdf_text;
pub mod tesseract;

pub use command::validate_pdf;
pub use pdf_render::PdftoppmRasterizer;
pub use pdf_text::PdfTextExtractor;
pub use tesseract::TesseractOcr;
