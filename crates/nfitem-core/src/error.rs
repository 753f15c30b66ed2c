//! Error types for the nfitem-core library.

use thiserror::Error;

/// Errors raised while reading a document from disk.
#[derive(Error, Debug)]
pub enum NfitemError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document holds no text at all.
    #[error("no text could be extracted from {0}")]
    NoText(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Only page images, no embedded text.
    #[error("PDF is a scanned image without embedded text; OCR is not supported")]
    Scanned,

    /// Neither text nor images.
    #[error("PDF appears to be empty")]
    Empty,
}

/// Errors raised while building the extraction engine.
///
/// Malformed document text never produces one of these; only a bad
/// configuration does.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A unit token is empty or contains non-alphanumeric characters.
    #[error("invalid unit token: {0:?}")]
    InvalidUnitToken(String),

    /// The unit token list is empty.
    #[error("no unit tokens configured")]
    NoUnitTokens,

    /// A target description is empty.
    #[error("target description at position {0} is empty")]
    EmptyTarget(usize),

    /// A configured anchor could not be compiled into a pattern.
    #[error("invalid pattern for {field}: {reason}")]
    InvalidPattern { field: String, reason: String },
}

/// Result type for the nfitem library.
pub type Result<T> = std::result::Result<T, NfitemError>;
