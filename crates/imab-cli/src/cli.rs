//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{ConfigArgs, IndexArgs, OptimizeArgs};

/// IMA-B - Inflation-linked index risk metrics and bucket replication
#[derive(Parser)]
#[command(name = "imab")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Configuration file (TOML)
    #[arg(short, long, global = true, env = "IMAB_CONFIG")]
    pub config: Option<PathBuf>,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the constituents of an index with their risk metrics
    Index(IndexArgs),

    /// Compare the current portfolio with the index and its replication
    Optimize(OptimizeArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

/// Options shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct Context {
    /// Output format.
    pub format: OutputFormat,
    /// Suppress headers, notes and warnings.
    pub quiet: bool,
}
