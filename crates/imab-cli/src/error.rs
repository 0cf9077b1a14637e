//! CLI error types.

use std::path::PathBuf;

use imab_ext_file::FileSourceError;
use imab_portfolio::PortfolioError;
use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Malformed `--invest` entry.
    #[error("Invalid investment '{0}'. Use TICKER=VALUE, e.g. \"NTN-B 2035-05=100000\".")]
    InvalidInvestment(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Refusing to overwrite an existing file.
    #[error("{} already exists (use --force to overwrite)", .0.display())]
    FileExists(PathBuf),

    /// Calculation error.
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    /// Data file error.
    #[error(transparent)]
    Source(#[from] FileSourceError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
