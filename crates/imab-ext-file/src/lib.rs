//! # IMA-B Ext File
//!
//! File-based bond data and holdings for the IMA-B replicator.
//!
//! This crate provides [`BondSource`] implementations for static data loads:
//! - CSV-based bond source
//! - JSON-based bond source
//! - CSV-based holdings loader
//!
//! Parquet files are not read; convert them to CSV first.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bonds;
mod error;
mod holdings;

pub use bonds::*;
pub use error::FileSourceError;
pub use holdings::*;

use std::path::Path;

use imab_portfolio::BondSource;

/// Create a bond source for a file, picking the format from its extension.
///
/// `issue_type` labels rows that carry none.
pub fn open_bond_source(
    path: impl AsRef<Path>,
    issue_type: &str,
) -> Result<Box<dyn BondSource>, FileSourceError> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "csv" => Ok(Box::new(CsvBondSource::new(path).with_issue_type(issue_type))),
        "json" => Ok(Box::new(JsonBondSource::new(path).with_issue_type(issue_type))),
        _ => Err(FileSourceError::UnsupportedFormat { extension }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_by_extension() {
        assert!(open_bond_source("bonds.csv", "NTN-B").is_ok());
        assert!(open_bond_source("bonds.JSON", "NTN-B").is_ok());

        let err = open_bond_source("bonds.parquet", "NTN-B").err().unwrap();
        assert!(matches!(
            err,
            FileSourceError::UnsupportedFormat { ref extension } if extension == "parquet"
        ));
    }
}
