//! CSV loader for current portfolio holdings.

use std::path::Path;

use imab_portfolio::Holdings;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::error::FileSourceError;

#[derive(Debug, Deserialize)]
struct HoldingRow {
    ticker: String,
    invested_value: String,
}

/// Loads invested values from a `ticker,invested_value` CSV.
///
/// Values are parsed as decimals from their text, so amounts are kept
/// exactly. A ticker listed more than once accumulates its values.
pub fn load_holdings_csv(path: impl AsRef<Path>) -> Result<Holdings, FileSourceError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(FileSourceError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut holdings = Holdings::new();
    for (i, result) in reader.deserialize().enumerate() {
        let row: HoldingRow = result?;
        let row_no = i + 1;
        let value: Decimal = row.invested_value.replace(',', "").parse().map_err(|_| {
            let reason = format!("bad invested value '{}'", row.invested_value);
            FileSourceError::invalid_record(row_no, reason)
        })?;

        holdings
            .add(row.ticker, value)
            .map_err(|e| FileSourceError::invalid_record(row_no, e.to_string()))?;
    }

    debug!(path = %path.display(), holdings = holdings.len(), "loaded holdings");
    Ok(holdings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    fn temp_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_holdings() {
        let file = temp_csv(
            "ticker,invested_value\nNTN-B 2035-05,600000.50\nNTN-B 2050-08,\"400,000\"\n",
        );
        let holdings = load_holdings_csv(file.path()).unwrap();

        assert_eq!(holdings.len(), 2);
        assert_eq!(holdings.invested_value("NTN-B 2035-05"), dec!(600000.50));
        assert_eq!(holdings.total(), dec!(1000000.50));
    }

    #[test]
    fn test_repeated_ticker_accumulates() {
        let file = temp_csv("ticker,invested_value\nNTN-B 2030-08,100\nNTN-B 2030-08,50\n");
        let holdings = load_holdings_csv(file.path()).unwrap();
        assert_eq!(holdings.invested_value("NTN-B 2030-08"), dec!(150));
    }

    #[test]
    fn test_negative_value_rejected() {
        let file = temp_csv("ticker,invested_value\nNTN-B 2030-08,-5\n");
        let err = load_holdings_csv(file.path()).unwrap_err();
        assert!(matches!(err, FileSourceError::InvalidRecord { row: 1, .. }));
    }

    #[test]
    fn test_negative_row_after_positive_rejected() {
        let file = temp_csv("ticker,invested_value\nNTN-B 2030-08,100\nNTN-B 2030-08,-40\n");
        let err = load_holdings_csv(file.path()).unwrap_err();
        assert!(matches!(err, FileSourceError::InvalidRecord { row: 2, .. }));
    }

    #[test]
    fn test_overflowing_total_rejected() {
        let file = temp_csv(
            "ticker,invested_value\nNTN-B 2030-08,79228162514264337593543950335\nNTN-B 2030-08,1\n",
        );
        let err = load_holdings_csv(file.path()).unwrap_err();
        assert!(matches!(err, FileSourceError::InvalidRecord { row: 2, .. }));
        assert!(err.to_string().contains("overflows"));
    }

    #[test]
    fn test_unparseable_value() {
        let file = temp_csv("ticker,invested_value\nNTN-B 2030-08,lots\n");
        let err = load_holdings_csv(file.path()).unwrap_err();
        assert!(err.to_string().contains("bad invested value"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_holdings_csv("/nonexistent/holdings.csv").unwrap_err();
        assert!(matches!(err, FileSourceError::NotFound { .. }));
    }
}
