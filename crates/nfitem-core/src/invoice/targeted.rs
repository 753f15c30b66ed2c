//! Extraction of known product descriptions.

use tracing::{debug, trace};

use crate::models::item::ExtractedItem;

use super::rules::normalize::normalize;
use super::rules::units::{PriceQuantity, UnitLocator, all_amounts, amounts_before, line_total};

/// Finds a known description in the document lines and reads the unit,
/// unit price, quantity and total printed before it.
#[derive(Debug, Clone)]
pub struct TargetedExtractor {
    locator: UnitLocator,
    lookback_chars: usize,
}

impl TargetedExtractor {
    pub fn new(locator: UnitLocator, lookback_chars: usize) -> Self {
        Self {
            locator,
            lookback_chars,
        }
    }

    /// Extract the item for `target` from the first line that contains it
    /// literally. Later lines containing it are never looked at.
    pub fn extract_by_description<S: AsRef<str>>(
        &self,
        target: &str,
        lines: &[S],
    ) -> Option<ExtractedItem> {
        let (index, line, pos) = lines.iter().enumerate().find_map(|(i, l)| {
            let l = l.as_ref();
            l.find(target).map(|pos| (i, l, pos))
        })?;

        let prefix = &line[..pos];
        let mut unit = None;
        let mut pq = PriceQuantity::default();

        if let Some(m) = self.locator.find_rightmost_unit(prefix) {
            pq = PriceQuantity::from_amounts(&amounts_before(prefix, m.start, self.lookback_chars));
            unit = Some(m.token);
        }

        // Fall back to the line above, only filling what is still missing.
        if pq.is_incomplete() && index > 0 {
            let prev = lines[index - 1].as_ref();
            let prev_amounts = all_amounts(prev);
            if prev_amounts.len() >= 2 {
                pq.fill_missing(PriceQuantity::from_amounts(&prev_amounts));
            }
            if unit.is_none() {
                unit = self.locator.find_first_listed_unit(prev).map(|m| m.token);
            }
            trace!("Used previous line for {:?}: {:?}", target, prev);
        }

        let total = line_total(&pq, line);

        debug!(
            "Target {:?} on line {}: unit={:?} price={:?} qty={:?} total={:?}",
            target, index, unit, pq.unit_price, pq.quantity, total
        );

        Some(ExtractedItem {
            description: target.to_string(),
            normalized_description: normalize(target),
            unit,
            unit_price: pq.unit_price,
            quantity: pq.quantity,
            total,
        })
    }
}
