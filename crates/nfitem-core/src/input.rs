//! Reading a fiscal note from disk.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{NfitemError, Result};
use crate::models::config::PdfConfig;
use crate::pdf;

/// Document text from a `.pdf` file (embedded text only) or from any other
/// file read as UTF-8.
pub fn read_document_text(path: &Path, pdf_config: &PdfConfig) -> Result<String> {
    let is_pdf = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"));

    let text = if is_pdf {
        debug!("Reading PDF {}", path.display());
        pdf::read_text(&fs::read(path)?, pdf_config.min_text_length)?
    } else {
        debug!("Reading text file {}", path.display());
        fs::read_to_string(path)?
    };

    if text.trim().is_empty() {
        return Err(NfitemError::NoText(path.display().to_string()));
    }
    Ok(text)
}
