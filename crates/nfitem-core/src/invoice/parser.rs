//! Fiscal note parser combining header rules, targeted and bulk extraction.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::item::{DocumentHeader, ExtractedItem};

use super::bulk::{BulkExtractor, SectionBounds};
use super::document::Document;
use super::rules::header::extract_header;
use super::rules::units::UnitLocator;
use super::targeted::TargetedExtractor;
use super::Result;

/// Result of parsing one document.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Note number, branch and freight.
    pub header: DocumentHeader,
    /// Targets found with a known quantity, in configured order.
    pub targets: Vec<ExtractedItem>,
    /// Every item line of the product section, in line order.
    pub items: Vec<ExtractedItem>,
    /// Extraction warnings.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Trait for fiscal note parsing.
pub trait InvoiceParser {
    /// Parse a document from its extracted text.
    fn parse(&self, text: &str) -> Result<ExtractionResult>;
}

/// Parser for DANFE text built from an [`ExtractionConfig`].
#[derive(Debug, Clone)]
pub struct NotaFiscalParser {
    targets: Vec<String>,
    targeted: TargetedExtractor,
    bulk: BulkExtractor,
    section: SectionBounds,
}

impl NotaFiscalParser {
    /// Build the parser, validating tokens, targets and section anchors.
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        config.validate()?;
        let locator = UnitLocator::new(&config.unit_tokens)?;

        Ok(Self {
            targets: config.targets.clone(),
            targeted: TargetedExtractor::new(locator.clone(), config.target_lookback_chars),
            bulk: BulkExtractor::new(locator, config.bulk_lookback_chars),
            section: SectionBounds::new(&config.section_start, &config.section_end)?,
        })
    }

    /// Configured target descriptions.
    pub fn targets(&self) -> &[String] {
        &self.targets
    }

    /// Targeted items with a quantity, plus the targets that were skipped.
    fn extract_targets(&self, doc: &Document, warnings: &mut Vec<String>) -> Vec<ExtractedItem> {
        let mut found = Vec::new();

        for target in &self.targets {
            match self.targeted.extract_by_description(target, doc.lines()) {
                Some(item) if item.quantity.is_some() => found.push(item),
                Some(_) => {
                    debug!("Target {:?} found without quantity", target);
                    warnings.push(format!("No quantity for target: {}", target));
                }
                None => {
                    debug!("Target {:?} not found", target);
                    warnings.push(format!("Target not found: {}", target));
                }
            }
        }

        found
    }
}

impl InvoiceParser for NotaFiscalParser {
    fn parse(&self, text: &str) -> Result<ExtractionResult> {
        let start = Instant::now();
        let mut warnings = Vec::new();

        info!("Parsing fiscal note from {} characters of text", text.len());

        let doc = Document::new(text);

        let header = extract_header(doc.flat(), doc.raw());
        if header.invoice_number.is_none() {
            warnings.push("Could not extract invoice number".to_string());
        }
        if header.branch.is_none() {
            warnings.push("Could not extract branch".to_string());
        }
        if header.freight.is_none() {
            warnings.push("Could not extract freight, assuming zero".to_string());
        }

        let targets = self.extract_targets(&doc, &mut warnings);

        let items = match self.section.find(doc.raw()) {
            Some(section) => {
                debug!("Product section has {} characters", section.len());
                self.bulk.extract_all_items(section)
            }
            None => {
                warnings.push("Could not locate product section".to_string());
                Vec::new()
            }
        };

        debug!(
            "Extracted {} targets and {} section items",
            targets.len(),
            items.len()
        );

        Ok(ExtractionResult {
            header,
            targets,
            items,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}
