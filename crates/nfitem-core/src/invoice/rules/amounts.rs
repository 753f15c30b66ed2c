//! Amount parsing and formatting for Brazilian documents.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a Brazilian-formatted amount: `.` groups thousands, `,` is the
/// decimal separator. Returns `None` for anything that does not parse.
pub fn parse_br_amount(s: &str) -> Option<Decimal> {
    let normalized = s.trim().replace('.', "").replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    Decimal::from_str(&normalized).ok()
}

/// Render a quantity compactly: `?` when unknown, no decimal point when the
/// value is within 1e-6 of its nearest integer.
pub fn format_quantity(quantity: Option<Decimal>) -> String {
    let Some(q) = quantity else {
        return "?".to_string();
    };

    let whole = q.round();
    if (q - whole).abs() < Decimal::new(1, 6) {
        whole.normalize().to_string()
    } else {
        q.normalize().to_string()
    }
}

/// Format amount in Brazilian report style (1234,50).
pub fn format_brl(amount: Decimal) -> String {
    format!("{:.2}", amount).replace('.', ",")
}
