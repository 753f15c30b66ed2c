//! Extracted line item and document header models.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// A line item recovered from fiscal note text.
///
/// Items are built once per extraction call and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedItem {
    /// Description as found in the document (targeted path) or what is
    /// left of the line once numbers and the unit are removed (bulk path).
    pub description: String,

    /// Accent-free, uppercased, punctuation-collapsed description.
    pub normalized_description: String,

    /// Unit token (UN, KG, ...), always one of the configured tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,

    /// Unit price.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_price: Option<Decimal>,

    /// Quantity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Decimal>,

    /// Line total.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<Decimal>,
}

impl ExtractedItem {
    /// Unit price used for ranking: the extracted one, else `total / quantity`,
    /// else zero. Overflow counts as zero.
    pub fn effective_unit_price(&self) -> Decimal {
        if let Some(price) = self.unit_price {
            return price;
        }
        match (self.total, self.quantity) {
            (Some(total), Some(qty)) if !total.is_zero() && !qty.is_zero() => total
                .checked_div(qty)
                .map(round_money)
                .unwrap_or(Decimal::ZERO),
            _ => Decimal::ZERO,
        }
    }

    /// Total used for sums: the extracted one, else `unit_price * quantity`,
    /// else zero. Overflow counts as zero.
    pub fn effective_total(&self) -> Decimal {
        if let Some(total) = self.total {
            return total;
        }
        match (self.unit_price, self.quantity) {
            (Some(price), Some(qty)) if !price.is_zero() && !qty.is_zero() => price
                .checked_mul(qty)
                .map(round_money)
                .unwrap_or(Decimal::ZERO),
            _ => Decimal::ZERO,
        }
    }

    /// Whether the description has any text left.
    pub fn has_description(&self) -> bool {
        !self.description.trim().is_empty()
    }
}

/// Header fields read from the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentHeader {
    /// Fiscal note number without thousands dots.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_number: Option<String>,

    /// Branch code in `FL<n>` form.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    /// Freight amount (VALOR DO FRETE).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freight: Option<Decimal>,
}

impl DocumentHeader {
    /// Invoice number for display, `?` when unknown.
    pub fn invoice_number_or_unknown(&self) -> &str {
        self.invoice_number.as_deref().unwrap_or("?")
    }

    /// Branch for display, `FL?` when unknown.
    pub fn branch_or_unknown(&self) -> &str {
        self.branch.as_deref().unwrap_or("FL?")
    }
}

/// Round a money amount to 2 places, midpoint away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounded sum of money amounts. Saturates at `Decimal::MAX`/`MIN`.
pub fn sum_money<I: IntoIterator<Item = Decimal>>(values: I) -> Decimal {
    round_money(
        values
            .into_iter()
            .fold(Decimal::ZERO, |acc, v| acc.saturating_add(v)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn item() -> ExtractedItem {
        ExtractedItem {
            description: "DETERGENTE".to_string(),
            normalized_description: "DETERGENTE".to_string(),
            unit: Some("UN".to_string()),
            unit_price: None,
            quantity: None,
            total: None,
        }
    }

    #[test]
    fn test_effective_unit_price() {
        let mut it = item();
        assert_eq!(it.effective_unit_price(), Decimal::ZERO);

        it.total = Some(dec("10.00"));
        it.quantity = Some(dec("3"));
        assert_eq!(it.effective_unit_price(), dec("3.33"));

        it.unit_price = Some(dec("4.50"));
        assert_eq!(it.effective_unit_price(), dec("4.50"));
    }

    #[test]
    fn test_effective_total() {
        let mut it = item();
        assert_eq!(it.effective_total(), Decimal::ZERO);

        it.unit_price = Some(dec("2.345"));
        it.quantity = Some(dec("1"));
        assert_eq!(it.effective_total(), dec("2.35"));

        it.total = Some(dec("7.00"));
        assert_eq!(it.effective_total(), dec("7.00"));
    }

    #[test]
    fn test_effective_values_on_overflow() {
        let mut it = item();
        it.unit_price = Some(Decimal::MAX);
        it.quantity = Some(dec("2"));
        assert_eq!(it.effective_total(), Decimal::ZERO);

        it.unit_price = None;
        it.total = Some(Decimal::MAX);
        it.quantity = Some(dec("0.01"));
        assert_eq!(it.effective_unit_price(), Decimal::ZERO);
    }

    #[test]
    fn test_sum_money_saturates() {
        assert_eq!(sum_money([dec("1.005"), dec("2")]), dec("3.01"));
        assert_eq!(sum_money([Decimal::MAX, dec("15.00")]), Decimal::MAX);
        assert_eq!(sum_money(Vec::<Decimal>::new()), Decimal::ZERO);
    }

    #[test]
    fn test_round_money_midpoint() {
        assert_eq!(round_money(dec("0.125")), dec("0.13"));
        assert_eq!(round_money(dec("52.5")), dec("52.50"));
    }

    #[test]
    fn test_header_defaults() {
        let header = DocumentHeader::default();
        assert_eq!(header.invoice_number_or_unknown(), "?");
        assert_eq!(header.branch_or_unknown(), "FL?");
    }
}
