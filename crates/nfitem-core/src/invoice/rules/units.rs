//! Unit token and price/quantity location.
//!
//! Every extraction path relies on the same layout assumption: the unit price
//! and the quantity are the last two amounts printed before the unit token.

use regex::Regex;
use rust_decimal::Decimal;
use tracing::trace;

use crate::error::ExtractionError;
use crate::models::item::round_money;

use super::amounts::parse_br_amount;
use super::patterns::{AMOUNT_PATTERN, unit_token_pattern};

/// A unit token occurrence inside a text window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitMatch {
    /// The configured token that matched.
    pub token: String,
    /// Byte offset where the token starts.
    pub start: usize,
    /// Byte offset just past the token.
    pub end: usize,
}

/// Unit price and quantity recovered before a unit anchor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriceQuantity {
    pub unit_price: Option<Decimal>,
    pub quantity: Option<Decimal>,
}

impl PriceQuantity {
    /// Pick price and quantity from amounts in left-to-right order: with two
    /// or more, the second-to-last is the price and the last the quantity;
    /// with one, it is the quantity.
    pub fn from_amounts(amounts: &[Decimal]) -> Self {
        match amounts {
            [.., price, qty] => Self {
                unit_price: Some(*price),
                quantity: Some(*qty),
            },
            [qty] => Self {
                unit_price: None,
                quantity: Some(*qty),
            },
            [] => Self::default(),
        }
    }

    /// Whether either field is still unknown.
    pub fn is_incomplete(&self) -> bool {
        self.unit_price.is_none() || self.quantity.is_none()
    }

    /// Fill only the fields that are still unknown from `other`.
    pub fn fill_missing(&mut self, other: PriceQuantity) {
        self.unit_price = self.unit_price.or(other.unit_price);
        self.quantity = self.quantity.or(other.quantity);
    }
}

/// Finds unit tokens and the amounts around them.
#[derive(Debug, Clone)]
pub struct UnitLocator {
    tokens: Vec<(String, Regex)>,
}

impl UnitLocator {
    /// Compile one whole-word matcher per token, keeping the scan order.
    pub fn new<S: AsRef<str>>(tokens: &[S]) -> Result<Self, ExtractionError> {
        if tokens.is_empty() {
            return Err(ExtractionError::NoUnitTokens);
        }

        let tokens = tokens
            .iter()
            .map(|t| {
                let t = t.as_ref();
                if t.is_empty() {
                    return Err(ExtractionError::InvalidUnitToken(t.to_string()));
                }
                let re = unit_token_pattern(t).map_err(|e| ExtractionError::InvalidPattern {
                    field: format!("unit token {t}"),
                    reason: e.to_string(),
                })?;
                Ok((t.to_string(), re))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { tokens })
    }

    /// The unit token occurrence that starts furthest right, across all
    /// tokens.
    pub fn find_rightmost_unit(&self, text: &str) -> Option<UnitMatch> {
        let mut best: Option<UnitMatch> = None;

        for (token, re) in &self.tokens {
            for m in re.find_iter(text) {
                if best.as_ref().is_none_or(|b| m.start() > b.start) {
                    best = Some(UnitMatch {
                        token: token.clone(),
                        start: m.start(),
                        end: m.end(),
                    });
                }
            }
        }

        best
    }

    /// The first token, in configured order, that occurs anywhere in `text`.
    pub fn find_first_listed_unit(&self, text: &str) -> Option<UnitMatch> {
        self.tokens.iter().find_map(|(token, re)| {
            re.find(text).map(|m| UnitMatch {
                token: token.clone(),
                start: m.start(),
                end: m.end(),
            })
        })
    }
}

/// The slice of `text` that ends at byte `anchor` and holds at most
/// `lookback_chars` characters.
pub fn lookback_window(text: &str, anchor: usize, lookback_chars: usize) -> &str {
    let head = &text[..anchor];
    if lookback_chars == 0 {
        return &head[head.len()..];
    }
    let start = head
        .char_indices()
        .rev()
        .nth(lookback_chars - 1)
        .map(|(i, _)| i)
        .unwrap_or(0);
    &head[start..]
}

/// Amounts found in the lookback window before `anchor`, left to right.
pub fn amounts_before(text: &str, anchor: usize, lookback_chars: usize) -> Vec<Decimal> {
    let window = lookback_window(text, anchor, lookback_chars);
    trace!("Searching amounts in window {:?}", window);
    all_amounts(window)
}

/// Every amount in `text`, left to right.
pub fn all_amounts(text: &str) -> Vec<Decimal> {
    AMOUNT_PATTERN
        .find_iter(text)
        .filter_map(|m| parse_br_amount(m.as_str()))
        .collect()
}

/// Line total: `round(price * qty, 2)` when both are known and non-zero,
/// else the last amount on the line. A product that overflows `Decimal`
/// also falls back to the last amount.
pub fn line_total(pq: &PriceQuantity, line: &str) -> Option<Decimal> {
    let product = match (pq.unit_price, pq.quantity) {
        (Some(price), Some(qty)) if !price.is_zero() && !qty.is_zero() => price.checked_mul(qty),
        _ => None,
    };
    product
        .map(round_money)
        .or_else(|| all_amounts(line).last().copied())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn locator() -> UnitLocator {
        UnitLocator::new(&["UN", "PT", "PC", "FD", "KG", "LT"]).unwrap()
    }

    #[test]
    fn test_rightmost_unit_across_tokens() {
        let loc = locator();
        let m = loc.find_rightmost_unit("KG 1 UN 2 PT 3 UN").unwrap();
        assert_eq!(m.token, "UN");
        assert_eq!(m.start, 15);

        let m = loc.find_rightmost_unit("UN 10,00 5,00 KG").unwrap();
        assert_eq!(m.token, "KG");
    }

    #[test]
    fn test_unit_is_whole_word() {
        let loc = locator();
        assert_eq!(loc.find_rightmost_unit("UNIDADE 5KG PACOTE"), None);
        assert_eq!(loc.find_rightmost_unit(""), None);
    }

    #[test]
    fn test_first_listed_unit_ignores_position() {
        let loc = locator();
        let m = loc.find_first_listed_unit("KG 1 PT 2 UN").unwrap();
        assert_eq!(m.token, "UN");
        assert_eq!(m.start, 10);
    }

    #[test]
    fn test_all_amounts() {
        assert_eq!(
            all_amounts("ITEM 10,00 5,00 UN 1.050,00"),
            vec![dec("10.00"), dec("5.00"), dec("1050.00")]
        );
        assert!(all_amounts("CODIGO 7891234 NCM 3402").is_empty());
    }

    #[test]
    fn test_amounts_before_window() {
        let line = "PRODUTO 9,99 10,00 5,00 UN 50,00";
        let anchor = line.find(" UN").unwrap() + 1;
        assert_eq!(
            amounts_before(line, anchor, 120),
            vec![dec("9.99"), dec("10.00"), dec("5.00")]
        );
        // A 10-char window cuts "10,00" down to "0,00".
        assert_eq!(amounts_before(line, anchor, 10), vec![dec("0.00"), dec("5.00")]);
        assert!(amounts_before(line, anchor, 0).is_empty());
    }

    #[test]
    fn test_lookback_window_counts_chars() {
        let text = "ÇÃO 1,00 UN";
        let anchor = text.find("UN").unwrap();
        assert_eq!(lookback_window(text, anchor, 6), " 1,00 ");
        assert_eq!(lookback_window(text, anchor, 8), "ÃO 1,00 ");
        assert_eq!(lookback_window(text, anchor, 100), "ÇÃO 1,00 ");
    }

    #[test]
    fn test_disambiguation() {
        let pq = PriceQuantity::from_amounts(&[dec("1"), dec("10.00"), dec("5.00")]);
        assert_eq!(pq.unit_price, Some(dec("10.00")));
        assert_eq!(pq.quantity, Some(dec("5.00")));

        let pq = PriceQuantity::from_amounts(&[dec("5.00")]);
        assert_eq!(pq.unit_price, None);
        assert_eq!(pq.quantity, Some(dec("5.00")));

        assert_eq!(PriceQuantity::from_amounts(&[]), PriceQuantity::default());
    }

    #[test]
    fn test_fill_missing_keeps_known_values() {
        let mut pq = PriceQuantity {
            unit_price: None,
            quantity: Some(dec("2")),
        };
        pq.fill_missing(PriceQuantity {
            unit_price: Some(dec("3.10")),
            quantity: Some(dec("9")),
        });
        assert_eq!(pq.unit_price, Some(dec("3.10")));
        assert_eq!(pq.quantity, Some(dec("2")));
        assert!(!pq.is_incomplete());
    }

    #[test]
    fn test_line_total() {
        let pq = PriceQuantity {
            unit_price: Some(dec("10.50")),
            quantity: Some(dec("2.5")),
        };
        assert_eq!(line_total(&pq, "whatever"), Some(dec("26.25")));

        let pq = PriceQuantity {
            unit_price: None,
            quantity: Some(dec("2")),
        };
        assert_eq!(line_total(&pq, "X 2,00 UN 7,00 14,00"), Some(dec("14.00")));
        assert_eq!(line_total(&pq, "no amounts"), None);

        let zero_price = PriceQuantity {
            unit_price: Some(Decimal::ZERO),
            quantity: Some(dec("2")),
        };
        assert_eq!(line_total(&zero_price, "0,00 2,00 UN 3,00"), Some(dec("3.00")));
    }

    #[test]
    fn test_line_total_overflow_uses_last_amount() {
        let huge = dec("999999999999999.99");
        let pq = PriceQuantity {
            unit_price: Some(huge),
            quantity: Some(huge),
        };
        assert_eq!(
            line_total(&pq, "X 999.999.999.999.999,99 999.999.999.999.999,99 UN 1,00"),
            Some(dec("1.00"))
        );
    }

    #[test]
    fn test_rejects_empty_tokens() {
        assert!(matches!(
            UnitLocator::new::<&str>(&[]),
            Err(ExtractionError::NoUnitTokens)
        ));
        assert!(matches!(
            UnitLocator::new(&["UN", ""]),
            Err(ExtractionError::InvalidUnitToken(_))
        ));
    }
}
