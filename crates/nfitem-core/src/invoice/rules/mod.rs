//! Rule-based field extractors for Brazilian fiscal notes.

pub mod amounts;
pub mod header;
pub mod normalize;
pub mod patterns;
pub mod units;

pub use amounts::{format_brl, format_quantity, parse_br_amount};
pub use header::{extract_branch, extract_freight, extract_header, extract_invoice_number};
pub use normalize::normalize;
pub use units::{PriceQuantity, UnitLocator, UnitMatch, all_amounts};
