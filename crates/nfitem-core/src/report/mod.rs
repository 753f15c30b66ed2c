//! Report assembly from extracted items.
//!
//! Targets and remaining items are reported in separate paragraphs, each
//! followed by its totals.

mod period;

pub use period::reference_period;

use std::collections::HashSet;
use std::fmt;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::invoice::ExtractionResult;
use crate::invoice::rules::amounts::{format_brl, format_quantity};
use crate::models::config::ReportConfig;
use crate::models::item::{ExtractedItem, sum_money};

/// Final report for one document.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Note number, `?` when unknown.
    pub invoice_number: String,
    /// Branch, `FL?` when unknown.
    pub branch: String,
    /// Reference period such as `Dezembro/2025`.
    pub reference_period: String,
    /// Supplier name.
    pub supplier: String,
    /// Purpose of the target paragraph.
    pub target_purpose: String,
    /// Purpose of the remaining paragraph.
    pub remaining_purpose: String,
    /// Targets found with a quantity.
    pub targets: Vec<ExtractedItem>,
    /// Highest unit price remaining items.
    pub top_remaining: Vec<ExtractedItem>,
    /// Number of remaining items that went into the remaining total.
    pub remaining_count: usize,
    /// Sum of target totals.
    pub target_total: Decimal,
    /// Sum of remaining totals, without freight.
    pub remaining_total: Decimal,
    /// Freight amount.
    pub freight: Decimal,
    /// Remaining total plus freight.
    pub remaining_total_with_freight: Decimal,
}

/// Builds a [`Report`] from an [`ExtractionResult`].
#[derive(Debug, Clone)]
pub struct ReportAssembler {
    config: ReportConfig,
    target_descriptions: HashSet<String>,
}

impl ReportAssembler {
    pub fn new<S: AsRef<str>>(config: ReportConfig, targets: &[S]) -> Self {
        Self {
            config,
            target_descriptions: targets.iter().map(|t| t.as_ref().to_string()).collect(),
        }
    }

    /// Section items that are not exact targets and still have a description.
    pub fn remaining_items<'a>(&self, items: &'a [ExtractedItem]) -> Vec<&'a ExtractedItem> {
        items
            .iter()
            .filter(|it| !self.target_descriptions.contains(it.description.trim()))
            .filter(|it| it.has_description())
            .collect()
    }

    /// Assemble the report. `reference_period` overrides the configured one.
    pub fn assemble(&self, result: &ExtractionResult, reference_period: Option<&str>) -> Report {
        let target_total = sum_money(
            result
                .targets
                .iter()
                .map(|it| it.total.unwrap_or(Decimal::ZERO)),
        );

        let remaining = self.remaining_items(&result.items);
        let remaining_total = sum_money(remaining.iter().map(|it| it.effective_total()));
        let freight = result.header.freight.unwrap_or(Decimal::ZERO);
        let remaining_total_with_freight = sum_money([remaining_total, freight]);

        // Stable sort keeps line order between equal prices.
        let mut ranked = remaining.clone();
        ranked.sort_by(|a, b| b.effective_unit_price().cmp(&a.effective_unit_price()));
        let top_remaining: Vec<ExtractedItem> = ranked
            .into_iter()
            .take(self.config.top_n)
            .cloned()
            .collect();

        debug!(
            "Report: {} targets, {} remaining, top {}",
            result.targets.len(),
            remaining.len(),
            top_remaining.len()
        );

        Report {
            invoice_number: result.header.invoice_number_or_unknown().to_string(),
            branch: result.header.branch_or_unknown().to_string(),
            reference_period: reference_period
                .map(str::to_string)
                .or_else(|| self.config.reference_period.clone())
                .unwrap_or_else(|| "?".to_string()),
            supplier: self.config.supplier.clone(),
            target_purpose: self.config.target_purpose.clone(),
            remaining_purpose: self.config.remaining_purpose.clone(),
            targets: result.targets.clone(),
            top_remaining,
            remaining_count: remaining.len(),
            target_total,
            remaining_total,
            freight,
            remaining_total_with_freight,
        }
    }
}

impl Report {
    fn paragraph(&self, items: &[ExtractedItem], purpose: &str) -> String {
        let listed: Vec<String> = items
            .iter()
            .map(|it| format!("{} {}", format_quantity(it.quantity), it.description))
            .collect();
        format!(
            "{}, alocados direto na {}, para atender demandas de {}, referente a {} - NF{} Fornecedor {}.",
            listed.join(", "),
            self.branch,
            purpose,
            self.reference_period,
            self.invoice_number,
            self.supplier
        )
    }

    /// Render the report text.
    pub fn render(&self) -> String {
        format!(
            "{}\n\nTOTAL ALVOS: R$ {}\n\n{}\n\nTOTAL LIMPEZA (sem frete): R$ {}\nFRETE: R$ {}\nTOTAL LIMPEZA + FRETE: R$ {}",
            self.paragraph(&self.targets, &self.target_purpose),
            format_brl(self.target_total),
            self.paragraph(&self.top_remaining, &self.remaining_purpose),
            format_brl(self.remaining_total),
            format_brl(self.freight),
            format_brl(self.remaining_total_with_freight),
        )
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
