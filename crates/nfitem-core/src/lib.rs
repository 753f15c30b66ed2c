//! Core library for Brazilian fiscal note item extraction.
//!
//! This crate provides:
//! - Line item recovery from DANFE text (unit, unit price, quantity, total)
//!   for a configured list of known products and for every product line
//! - Text rules for Brazilian amounts, unit tokens and header fields
//! - Report assembly with target and remaining item totals
//! - Document loading from PDF (embedded text) or plain text files

pub mod error;
pub mod input;
pub mod invoice;
pub mod models;
pub mod pdf;
pub mod report;

pub use error::{ExtractionError, NfitemError, PdfError, Result};
pub use input::read_document_text;
pub use invoice::{ExtractionResult, InvoiceParser, NotaFiscalParser};
pub use models::config::{ExtractionConfig, NfitemConfig, ReportConfig};
pub use models::item::{DocumentHeader, ExtractedItem};
pub use pdf::{PdfExtractor, PdfProcessor, PdfType};
pub use report::{Report, ReportAssembler};
