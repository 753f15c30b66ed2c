//! PDF text loading module.
//!
//! Only embedded text is read. Scanned pages are detected so callers can
//! refuse them; there is no OCR fallback.

mod extractor;

pub use extractor::PdfExtractor;

use tracing::debug;

use crate::error::PdfError;

/// Type of PDF content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfType {
    /// Contains extractable text.
    Text,
    /// Contains page images but no usable text.
    Scanned,
    /// Empty or unreadable.
    Empty,
}

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF processing implementations.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Analyze the PDF to determine its type.
    fn analyze(&self) -> PdfType;

    /// Extract text from the entire PDF.
    fn extract_text(&self) -> Result<String>;
}

/// Text of an in-memory PDF. Scanned and empty documents are refused.
pub fn read_text(data: &[u8], min_text_length: usize) -> Result<String> {
    let mut extractor = PdfExtractor::new().with_min_text_length(min_text_length);
    extractor.load(data)?;
    debug!("PDF has {} pages", extractor.page_count());

    match extractor.analyze() {
        PdfType::Text => extractor.extract_text(),
        PdfType::Scanned => Err(PdfError::Scanned),
        PdfType::Empty => Err(PdfError::Empty),
    }
}
