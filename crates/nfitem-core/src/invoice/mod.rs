//! Fiscal note item extraction module.

mod bulk;
mod document;
mod parser;
pub mod rules;
mod targeted;

pub use bulk::{BulkExtractor, SectionBounds};
pub use document::{Document, split_lines};
pub use parser::{ExtractionResult, InvoiceParser, NotaFiscalParser};
pub use targeted::TargetedExtractor;

use crate::error::ExtractionError;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;
