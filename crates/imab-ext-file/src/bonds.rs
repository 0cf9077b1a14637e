//! File-based bond sources.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use imab_portfolio::{BondRecord, BondSource, IndexSelection, PortfolioResult, DEFAULT_ISSUE_TYPE};
use serde::Deserialize;
use tracing::debug;

use crate::error::FileSourceError;

/// Raw row shared by the CSV and JSON formats.
///
/// The provider's `bond_ticker` column (e.g. `NTNB_2035-05-15`) is ignored;
/// tickers are always derived from the maturity.
#[derive(Debug, Deserialize)]
struct RawBondRecord {
    index_name: String,
    maturity: String,
    #[serde(default)]
    price: f64,
    duration: f64,
    #[serde(default)]
    convexity: f64,
    rate: f64,
    weight: f64,
    #[serde(default)]
    issue_type: Option<String>,
}

impl RawBondRecord {
    fn into_record(
        self,
        row: usize,
        default_issue_type: &str,
    ) -> Result<BondRecord, FileSourceError> {
        let selection = self
            .index_name
            .parse::<IndexSelection>()
            .map_err(|e| FileSourceError::invalid_record(row, e.to_string()))?;
        let maturity = parse_maturity(&self.maturity).ok_or_else(|| {
            FileSourceError::invalid_record(row, format!("bad maturity '{}'", self.maturity))
        })?;

        let issue_type = self
            .issue_type
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| default_issue_type.to_string());

        BondRecord::builder()
            .issue_type(issue_type)
            .index(selection)
            .maturity(maturity)
            .price(self.price)
            .duration(self.duration)
            .convexity(self.convexity)
            .rate(self.rate)
            .index_weight(self.weight)
            .build()
            .map_err(|e| FileSourceError::invalid_record(row, e.to_string()))
    }
}

/// Parses `YYYY-MM-DD`, ignoring any time part that follows.
fn parse_maturity(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    let date = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

fn ensure_exists(path: &Path) -> Result<(), FileSourceError> {
    if path.exists() {
        Ok(())
    } else {
        Err(FileSourceError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

// =============================================================================
// CSV BOND SOURCE
// =============================================================================

/// CSV-based bond source.
///
/// Expected header:
/// `index_name,bond_ticker,maturity,price,duration,convexity,rate,weight`
/// with an optional `issue_type` column. The file is read on every call.
#[derive(Debug, Clone)]
pub struct CsvBondSource {
    file_path: PathBuf,
    issue_type: String,
}

impl CsvBondSource {
    /// Create a new CSV bond source.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            issue_type: DEFAULT_ISSUE_TYPE.to_string(),
        }
    }

    /// Sets the issue type used when a row has none.
    #[must_use]
    pub fn with_issue_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue_type = issue_type.into();
        self
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Load all records from the file.
    pub fn load(&self) -> Result<Vec<BondRecord>, FileSourceError> {
        ensure_exists(&self.file_path)?;

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(&self.file_path)?;

        let mut records = Vec::new();
        for (i, result) in reader.deserialize().enumerate() {
            let raw: RawBondRecord = result?;
            records.push(raw.into_record(i + 1, &self.issue_type)?);
        }

        debug!(path = %self.file_path.display(), records = records.len(), "loaded CSV bonds");
        Ok(records)
    }
}

impl BondSource for CsvBondSource {
    fn records(&self) -> PortfolioResult<Vec<BondRecord>> {
        Ok(self.load()?)
    }
}

// =============================================================================
// JSON BOND SOURCE
// =============================================================================

/// JSON-based bond source.
///
/// The file holds an array of objects with the same fields as the CSV rows.
#[derive(Debug, Clone)]
pub struct JsonBondSource {
    file_path: PathBuf,
    issue_type: String,
}

impl JsonBondSource {
    /// Create a new JSON bond source.
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
            issue_type: DEFAULT_ISSUE_TYPE.to_string(),
        }
    }

    /// Sets the issue type used when a row has none.
    #[must_use]
    pub fn with_issue_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue_type = issue_type.into();
        self
    }

    /// Path of the underlying file.
    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Load all records from the file.
    pub fn load(&self) -> Result<Vec<BondRecord>, FileSourceError> {
        ensure_exists(&self.file_path)?;

        let content =
            std::fs::read_to_string(&self.file_path).map_err(|source| FileSourceError::Io {
                path: self.file_path.clone(),
                source,
            })?;
        let raw: Vec<RawBondRecord> = serde_json::from_str(&content)?;

        let records = raw
            .into_iter()
            .enumerate()
            .map(|(i, r)| r.into_record(i + 1, &self.issue_type))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(path = %self.file_path.display(), records = records.len(), "loaded JSON bonds");
        Ok(records)
    }
}

impl BondSource for JsonBondSource {
    fn records(&self) -> PortfolioResult<Vec<BondRecord>> {
        Ok(self.load()?)
    }
}
