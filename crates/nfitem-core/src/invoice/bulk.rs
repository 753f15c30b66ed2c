//! Extraction of every item line in the product section.

use regex::Regex;
use tracing::debug;

use crate::error::ExtractionError;
use crate::models::item::ExtractedItem;

use super::document::split_lines;
use super::rules::normalize::normalize;
use super::rules::patterns::{AMOUNT_PATTERN, STANDALONE_DIGITS, section_pattern};
use super::rules::units::{PriceQuantity, UnitLocator, UnitMatch, amounts_before, line_total};

/// Reads one item per product line without knowing the descriptions.
#[derive(Debug, Clone)]
pub struct BulkExtractor {
    locator: UnitLocator,
    lookback_chars: usize,
}

impl BulkExtractor {
    pub fn new(locator: UnitLocator, lookback_chars: usize) -> Self {
        Self {
            locator,
            lookback_chars,
        }
    }

    /// Extract items from the product section, in line order. Lines without
    /// a unit token produce nothing. Items whose description ends up empty
    /// are still returned.
    pub fn extract_all_items(&self, section: &str) -> Vec<ExtractedItem> {
        split_lines(section)
            .into_iter()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .filter_map(|l| self.extract_line(l))
            .collect()
    }

    /// Extract a single product line.
    pub fn extract_line(&self, line: &str) -> Option<ExtractedItem> {
        let Some(m) = self.locator.find_rightmost_unit(line) else {
            debug!("Skipping line without unit token: {:?}", line);
            return None;
        };

        let pq = PriceQuantity::from_amounts(&amounts_before(line, m.start, self.lookback_chars));
        let total = line_total(&pq, line);
        let description = derive_description(line, &m);

        Some(ExtractedItem {
            normalized_description: normalize(&description),
            description,
            unit: Some(m.token),
            unit_price: pq.unit_price,
            quantity: pq.quantity,
            total,
        })
    }
}

/// What is left of the line without the anchor unit, amounts and digit runs.
/// Other occurrences of the unit token stay in the description.
fn derive_description(line: &str, unit: &UnitMatch) -> String {
    let text = format!("{} {}", &line[..unit.start], &line[unit.end..]);
    let text = AMOUNT_PATTERN.replace_all(&text, "");
    let text = STANDALONE_DIGITS.replace_all(&text, "");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Locates the product section between two headers.
#[derive(Debug, Clone)]
pub struct SectionBounds {
    pattern: Regex,
}

impl SectionBounds {
    pub fn new(start: &str, end: &str) -> Result<Self, ExtractionError> {
        let pattern = section_pattern(start, end).map_err(|e| ExtractionError::InvalidPattern {
            field: "product section".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { pattern })
    }

    /// Text between the first start header and the last end header.
    pub fn find<'a>(&self, text: &'a str) -> Option<&'a str> {
        self.pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    }
}
