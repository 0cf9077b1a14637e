//! Error types for file-backed sources.

use std::path::PathBuf;

use imab_portfolio::PortfolioError;
use thiserror::Error;

/// Errors raised while reading bond or holdings files.
#[derive(Debug, Error)]
pub enum FileSourceError {
    /// The file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// IO error
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// CSV parse error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON parse error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A row parsed but its values are not usable.
    #[error("invalid record at row {row}: {reason}")]
    InvalidRecord {
        /// One-based data row (header excluded).
        row: usize,
        /// What is wrong with it.
        reason: String,
    },

    /// File extension is not a supported format.
    #[error("unsupported file format '{extension}' (expected csv or json)")]
    UnsupportedFormat {
        /// The extension found.
        extension: String,
    },
}

impl FileSourceError {
    /// Create an invalid record error.
    #[must_use]
    pub fn invalid_record(row: usize, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            row,
            reason: reason.into(),
        }
    }
}

impl From<FileSourceError> for PortfolioError {
    fn from(err: FileSourceError) -> Self {
        PortfolioError::source(err.to_string())
    }
}
