//! Process command - extract items from a single fiscal note and report them.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, info};

use nfitem_core::input::read_document_text;
use nfitem_core::invoice::{ExtractionResult, InvoiceParser, NotaFiscalParser};
use nfitem_core::models::config::NfitemConfig;
use nfitem_core::models::item::ExtractedItem;
use nfitem_core::report::{Report, ReportAssembler, reference_period};

use super::config::default_config_path;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or already extracted text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Reference period printed in the report (e.g. "Dezembro/2025")
    #[arg(short, long)]
    period: Option<String>,

    /// Number of remaining items listed in the report
    #[arg(long)]
    top: Option<usize>,

    /// Print extraction warnings
    #[arg(long)]
    show_warnings: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// Report text
    Text,
    /// Report and all extracted items as JSON
    Json,
    /// One CSV row per product section item
    Csv,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    report: &'a Report,
    items: &'a [ExtractedItem],
    warnings: &'a [String],
    processing_time_ms: u64,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if let Some(top) = args.top {
        config.report.top_n = top;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Reading document...");
    pb.set_position(20);

    let text = read_document_text(&args.input, &config.pdf)?;

    pb.set_message("Extracting items...");
    pb.set_position(60);

    let parser = NotaFiscalParser::new(&config.extraction)?;
    let result = parser.parse(&text)?;

    pb.set_message("Building report...");
    pb.set_position(90);

    let period = args
        .period
        .clone()
        .or_else(|| config.report.reference_period.clone())
        .unwrap_or_else(|| reference_period(chrono::Local::now().date_naive()));
    let report = ReportAssembler::new(config.report.clone(), parser.targets())
        .assemble(&result, Some(period.as_str()));

    pb.finish_and_clear();

    if args.show_warnings && !result.warnings.is_empty() {
        eprintln!("{}", style("Extraction warnings:").yellow());
        for warning in &result.warnings {
            eprintln!("  - {}", warning);
        }
    }

    let output = format_output(&report, &result, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Explicit config file, else the default one if it exists, else defaults.
fn load_config(config_path: Option<&str>) -> anyhow::Result<NfitemConfig> {
    if let Some(path) = config_path {
        return Ok(NfitemConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config file {}", default_path.display());
        return Ok(NfitemConfig::from_file(&default_path)?);
    }

    Ok(NfitemConfig::default())
}

fn format_output(
    report: &Report,
    result: &ExtractionResult,
    format: OutputFormat,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Text => Ok(report.render()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&JsonOutput {
            report,
            items: &result.items,
            warnings: &result.warnings,
            processing_time_ms: result.processing_time_ms,
        })?),
        OutputFormat::Csv => format_csv(&result.items),
    }
}

fn format_csv(items: &[ExtractedItem]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "description",
        "normalized_description",
        "unit",
        "unit_price",
        "quantity",
        "total",
    ])?;

    for item in items {
        wtr.write_record([
            item.description.as_str(),
            item.normalized_description.as_str(),
            item.unit.as_deref().unwrap_or(""),
            cell(item.unit_price).as_str(),
            cell(item.quantity).as_str(),
            cell(item.total).as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn cell<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
