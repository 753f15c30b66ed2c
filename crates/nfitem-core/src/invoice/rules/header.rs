//! Document-level fields used by the report: note number, branch, freight.

use rust_decimal::Decimal;

use crate::models::item::DocumentHeader;

use super::amounts::parse_br_amount;
use super::patterns::{BRANCH, FREIGHT, INVOICE_NUMBER};

/// Fiscal note number with thousands dots removed.
pub fn extract_invoice_number(text: &str) -> Option<String> {
    INVOICE_NUMBER
        .captures(text)
        .map(|caps| caps[1].replace('.', ""))
}

/// Branch code as `FL<n>`.
pub fn extract_branch(text: &str) -> Option<String> {
    BRANCH.captures(text).map(|caps| format!("FL{}", &caps[1]))
}

/// Freight amount from the transport block.
pub fn extract_freight(text: &str) -> Option<Decimal> {
    FREIGHT
        .captures(text)
        .and_then(|caps| parse_br_amount(&caps[1]))
}

/// Read all header fields. Number and branch come from the flattened text,
/// freight from the raw text.
pub fn extract_header(flat_text: &str, raw_text: &str) -> DocumentHeader {
    DocumentHeader {
        invoice_number: extract_invoice_number(flat_text),
        branch: extract_branch(flat_text),
        freight: extract_freight(raw_text),
    }
}
