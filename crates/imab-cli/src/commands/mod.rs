//! CLI command implementations.

pub mod config;
pub mod index;
pub mod optimize;

// Re-export submodules for convenience
pub use config::ConfigArgs;
pub use index::IndexArgs;
pub use optimize::OptimizeArgs;

use std::path::Path;

use imab_ext_file::open_bond_source;
use imab_portfolio::{BondSource, OptimizerConfig};
use rust_decimal::Decimal;

use crate::error::{CliError, CliResult};

/// Opens the bond data file, CSV or JSON by extension.
pub fn load_source(path: &Path, config: &OptimizerConfig) -> CliResult<Box<dyn BondSource>> {
    Ok(open_bond_source(path, &config.issue_type)?)
}

/// Parses a `TICKER=VALUE` investment.
pub fn parse_investment(s: &str) -> CliResult<(String, Decimal)> {
    let (ticker, value) = s
        .split_once('=')
        .ok_or_else(|| CliError::InvalidInvestment(s.to_string()))?;

    let ticker = ticker.trim();
    let value: Decimal = value
        .trim()
        .replace(',', "")
        .parse()
        .map_err(|_| CliError::InvalidInvestment(s.to_string()))?;

    if ticker.is_empty() {
        return Err(CliError::InvalidInvestment(s.to_string()));
    }
    Ok((ticker.to_string(), value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_investment() {
        let (ticker, value) = parse_investment("NTN-B 2035-05=1,000,000.50").unwrap();
        assert_eq!(ticker, "NTN-B 2035-05");
        assert_eq!(value, Decimal::new(100_000_050, 2));
    }

    #[test]
    fn test_parse_investment_rejects_malformed() {
        assert!(parse_investment("NTN-B 2035-05").is_err());
        assert!(parse_investment("=100").is_err());
        assert!(parse_investment("NTN-B 2035-05=abc").is_err());
    }
}
