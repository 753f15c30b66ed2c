//! Reference period labels (`Dezembro/2025`).

use chrono::{Datelike, NaiveDate};

const MONTHS_PT: [&str; 12] = [
    "Janeiro",
    "Fevereiro",
    "Março",
    "Abril",
    "Maio",
    "Junho",
    "Julho",
    "Agosto",
    "Setembro",
    "Outubro",
    "Novembro",
    "Dezembro",
];

/// Portuguese month name and year for `date`.
pub fn reference_period(date: NaiveDate) -> String {
    format!("{}/{}", MONTHS_PT[date.month0() as usize], date.year())
}
