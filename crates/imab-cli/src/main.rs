//! IMA-B CLI - Index risk metrics and four-bucket replication.
//!
//! # Usage
//!
//! ```bash
//! # List the IMA-B 5+ constituents
//! imab index --data bonds.csv --index imab5+
//!
//! # Compare a portfolio with IMA-B and its replication
//! imab optimize --data bonds.csv --index imab --invest "NTN-B 2035-05=1000000"
//!
//! # Same, with holdings from a file, as JSON
//! imab -f json optimize --data bonds.csv --portfolio holdings.csv
//!
//! # Write a default configuration file
//! imab config init
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod config;
mod error;
mod output;

use cli::{Cli, Commands, Context};
use config::CliConfig;

fn init_tracing(cli: &Cli) {
    let default_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // stdout carries the report; logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let config = CliConfig::load(cli.config.as_deref())?;
    if !config.output.color {
        colored::control::set_override(false);
    }

    let ctx = Context {
        format: cli.format,
        quiet: cli.quiet,
    };

    match cli.command {
        Commands::Index(args) => commands::index::execute(args, ctx, &config)?,
        Commands::Optimize(args) => commands::optimize::execute(args, ctx, &config)?,
        Commands::Config(args) => commands::config::execute(args, ctx, &config)?,
    }

    Ok(())
}
