//! Index command implementation.
//!
//! Lists the constituents of one index with their risk metrics.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use imab_portfolio::{calculate_index_metrics, BondMetrics, BondSource, IndexSelection};
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{Context, OutputFormat};
use crate::commands::load_source;
use crate::config::CliConfig;
use crate::output::{
    format_dv01, format_percent, print_csv, print_header, print_json, print_output, KeyValue,
};

/// Arguments for the index command.
#[derive(Args, Debug)]
pub struct IndexArgs {
    /// Bond data file (CSV or JSON)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Index: imab5, imab or imab5+ (display names such as "IMA-B 5+" also work)
    #[arg(short, long, default_value = "imab")]
    pub index: IndexSelection,
}

#[derive(Serialize, Tabled)]
struct BondRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Mod. Duration")]
    modified_duration: String,
    #[tabled(rename = "Convexity")]
    convexity: String,
    #[tabled(rename = "Rate")]
    rate: String,
    #[tabled(rename = "DV01")]
    dv01: String,
    #[tabled(rename = "Weight")]
    weight: String,
}

impl BondRow {
    fn new(bond: &BondMetrics, precision: usize) -> Self {
        Self {
            ticker: bond.ticker.clone(),
            price: format!("{:.2}", bond.price),
            duration: format!("{:.0}", bond.duration),
            modified_duration: format!("{:.prec$}", bond.modified_duration, prec = precision),
            convexity: format!("{:.prec$}", bond.convexity, prec = precision),
            rate: format_percent(bond.rate, 2),
            dv01: format!("{:.prec$}", bond.index_dv01, prec = precision),
            weight: format_percent(bond.index_weight, 2),
        }
    }
}

/// Execute the index command.
pub fn execute(args: IndexArgs, ctx: Context, config: &CliConfig) -> Result<()> {
    let source = load_source(&args.data, &config.optimizer)?;
    let records = source.records()?;
    let index = calculate_index_metrics(&records, args.index, &config.optimizer);

    match ctx.format {
        OutputFormat::Table => {
            let precision = config.output.precision;
            let rows: Vec<BondRow> = index
                .bonds
                .iter()
                .map(|b| BondRow::new(b, precision))
                .collect();

            if !ctx.quiet {
                print_header(&format!("{} constituents", index.selection));
            }
            print_output(&rows, ctx.format)?;

            let summary = vec![
                KeyValue::new("Bonds", index.bonds.len().to_string()),
                KeyValue::new("Yield", format_percent(index.index_yield, 4)),
                KeyValue::new("DV01", format_dv01(index.total_dv01)),
                KeyValue::new("Duration", format!("{:.2}", index.duration())),
                KeyValue::new("Weight sum", format_percent(index.weight_sum, 4)),
            ];
            if !ctx.quiet {
                print_header("Summary");
            }
            print_output(&summary, ctx.format)?;
        }
        OutputFormat::Json => print_json(&index)?,
        OutputFormat::Csv => print_csv(&index.bonds)?,
    }

    Ok(())
}
