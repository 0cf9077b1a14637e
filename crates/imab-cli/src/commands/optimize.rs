//! Optimize command implementation.
//!
//! Compares the current portfolio with the selected index and the
//! four-bucket replicating portfolio.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use imab_ext_file::load_holdings_csv;
use imab_portfolio::{
    compute, BucketKind, ComparisonResult, Dv01Point, Holdings, IndexSelection,
    OptimizationRequest, Series, WeightShare, YieldDurationPoint,
};
use serde::Serialize;
use tabled::Tabled;
use tracing::info;

use crate::cli::{Context, OutputFormat};
use crate::commands::{load_source, parse_investment};
use crate::config::CliConfig;
use crate::output::{
    format_dv01, format_money, format_optional, format_percent, print_csv, print_header,
    print_info, print_json, print_output, print_warning,
};

/// Arguments for the optimize command.
#[derive(Args, Debug)]
pub struct OptimizeArgs {
    /// Bond data file (CSV or JSON)
    #[arg(short, long)]
    pub data: PathBuf,

    /// Index: imab5, imab or imab5+ (display names such as "IMA-B 5+" also work)
    #[arg(short, long, default_value = "imab")]
    pub index: IndexSelection,

    /// Current holdings file (CSV with ticker,invested_value)
    #[arg(short, long)]
    pub portfolio: Option<PathBuf>,

    /// Invested value of one bond, TICKER=VALUE (repeatable, overrides the holdings file)
    #[arg(long = "invest", value_name = "TICKER=VALUE")]
    pub investments: Vec<String>,
}

#[derive(Serialize, Tabled)]
struct RiskRow {
    #[tabled(rename = "Portfolio")]
    portfolio: String,
    #[tabled(rename = "DV01")]
    dv01: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Yield")]
    yield_value: String,
}

#[derive(Serialize, Tabled)]
struct AllocationRow {
    #[tabled(rename = "Bucket")]
    bucket: &'static str,
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "New Weight")]
    weight: String,
    #[tabled(rename = "New Allocation")]
    allocation: String,
}

#[derive(Serialize, Tabled)]
struct ScatterRow {
    #[tabled(rename = "Portfolio")]
    portfolio: String,
    #[tabled(rename = "Duration")]
    duration: String,
    #[tabled(rename = "Yield")]
    yield_value: String,
}

#[derive(Serialize, Tabled)]
struct VertexRow {
    #[tabled(rename = "Ticker")]
    ticker: String,
    #[tabled(rename = "Index DV01")]
    index: String,
    #[tabled(rename = "Current DV01")]
    current: String,
    #[tabled(rename = "Optimized DV01")]
    optimized: String,
}

/// Everything the optimize command reports, for JSON output.
#[derive(Serialize)]
struct OptimizeReport<'a> {
    result: &'a ComparisonResult,
    yield_vs_duration: Vec<YieldDurationPoint>,
    index_shares: Vec<WeightShare>,
    holding_shares: Vec<WeightShare>,
    optimized_shares: Vec<WeightShare>,
    dv01_by_vertex: Vec<Dv01Point>,
}

fn bucket_name(bucket: BucketKind) -> &'static str {
    match bucket {
        BucketKind::Short => "Short",
        BucketKind::Mid => "Mid",
        BucketKind::LongFirst => "Long 1",
        BucketKind::LongSecond => "Long 2",
    }
}

fn build_holdings(args: &OptimizeArgs) -> Result<Holdings> {
    let mut holdings = match &args.portfolio {
        Some(path) => load_holdings_csv(path)?,
        None => Holdings::new(),
    };
    for entry in &args.investments {
        let (ticker, value) = parse_investment(entry)?;
        holdings.insert(ticker, value)?;
    }
    Ok(holdings)
}

/// Execute the optimize command.
pub fn execute(args: OptimizeArgs, ctx: Context, config: &CliConfig) -> Result<()> {
    let source = load_source(&args.data, &config.optimizer)?;
    let holdings = build_holdings(&args)?;
    let request = OptimizationRequest::new(args.index).with_holdings(holdings);

    let result = compute(&source, &request, &config.optimizer)?;
    info!(
        index = %result.selection,
        buckets = result.optimized.positions.len(),
        invested_total = %result.invested_total(),
        "replication computed"
    );

    if !ctx.quiet {
        warn_about_labels(&result);
    }

    match ctx.format {
        OutputFormat::Table => print_tables(&result, ctx, config.output.precision)?,
        OutputFormat::Json => print_json(&OptimizeReport {
            yield_vs_duration: result.yield_vs_duration(),
            index_shares: result.index_shares(),
            holding_shares: result.holding_shares(),
            optimized_shares: result.optimized_shares(),
            dv01_by_vertex: result.dv01_by_vertex(),
            result: &result,
        })?,
        OutputFormat::Csv => print_csv(&result.optimized.positions)?,
    }

    Ok(())
}

fn warn_about_labels(result: &ComparisonResult) {
    for ticker in &result.unmatched_tickers {
        print_warning(&format!(
            "{ticker} matches no {} bond; it is left out of the optimized DV01 and yield",
            result.selection
        ));
    }
    if !result.optimized.label_matches_boundary {
        if let Some(mid) = result.optimized.get(BucketKind::Mid) {
            print_warning(&format!(
                "mid bucket is labelled {} but holds bonds maturing from the mid boundary on",
                mid.ticker
            ));
        }
    }
}

fn print_tables(result: &ComparisonResult, ctx: Context, precision: usize) -> Result<()> {
    let format = ctx.format;

    if result.has_investment() {
        print_info(&format!("PL: {}", format_money(result.invested_total())));

        let rows: Vec<RiskRow> = Series::all()
            .iter()
            .map(|s| RiskRow {
                portfolio: s.label(result.selection).to_string(),
                dv01: format_dv01(result.dv01.get(*s)),
                duration: format!("{:.2}", result.duration.get(*s)),
                yield_value: format_percent(result.yield_comparison.get(*s), 2),
            })
            .collect();
        if !ctx.quiet {
            print_header("Risk comparison");
        }
        print_output(&rows, format)?;
    } else if !ctx.quiet {
        print_info("No invested value entered; showing replication weights only.");
    }

    let allocations: Vec<AllocationRow> = result
        .optimized
        .positions
        .iter()
        .map(|p| AllocationRow {
            bucket: bucket_name(p.bucket),
            ticker: p.ticker.clone(),
            weight: format_percent(p.new_weight, 2),
            allocation: format_money(p.new_allocation),
        })
        .collect();
    if !ctx.quiet {
        print_header("New allocations");
    }
    print_output(&allocations, format)?;

    if !result.has_investment() {
        return Ok(());
    }

    let vertices: Vec<VertexRow> = result
        .dv01_by_ticker
        .iter()
        .map(|row| VertexRow {
            ticker: row.ticker.clone(),
            index: format_optional(row.index_dv01, precision),
            current: format_optional(row.portfolio_dv01, precision),
            optimized: format_optional(row.optimized_dv01, precision),
        })
        .collect();
    if !ctx.quiet {
        print_header("DV01 by vertex");
    }
    print_output(&vertices, format)?;

    let scatter: Vec<ScatterRow> = result
        .yield_vs_duration()
        .into_iter()
        .map(|p| ScatterRow {
            portfolio: p.label,
            duration: format!("{:.prec$}", p.duration, prec = precision),
            yield_value: format_percent(p.yield_value, 2),
        })
        .collect();
    if !ctx.quiet {
        print_header("Yield vs duration");
    }
    print_output(&scatter, format)?;

    Ok(())
}
