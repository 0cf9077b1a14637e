//! Error types for index analytics and replication.
//!
//! Degenerate inputs (an empty index view, a zero invested total, a bucket
//! ticker with no matching bond) are not errors: they produce zero-valued or
//! missing results. Only an indeterminate long-bucket split aborts a
//! computation.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type for portfolio operations.
pub type PortfolioResult<T> = Result<T, PortfolioError>;

/// Errors that can occur during portfolio operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    /// Neither long-bucket anchor bond is present while the long partition
    /// carries weight, so the duration split is indeterminate.
    #[error("Missing anchor bonds {anchors:?}: cannot split long bucket weight {long_weight}")]
    MissingAnchorBond {
        /// The anchor maturities that were looked up.
        anchors: Vec<NaiveDate>,
        /// Total index weight of the long partition.
        long_weight: f64,
    },

    /// Division by zero in aggregation.
    #[error("Division by zero in {operation}")]
    DivisionByZero {
        /// The operation that failed.
        operation: String,
    },

    /// Invalid holding data.
    #[error("Invalid holding '{id}': {reason}")]
    InvalidHolding {
        /// The holding ticker.
        id: String,
        /// The reason the holding is invalid.
        reason: String,
    },

    /// Invalid weight (negative or NaN).
    #[error("Invalid weight for '{id}': {value}")]
    InvalidWeight {
        /// The bond ticker.
        id: String,
        /// The invalid weight value.
        value: String,
    },

    /// Invalid bond reference data.
    #[error("Invalid bond record '{id}': {reason}")]
    InvalidBond {
        /// The bond ticker, or the raw identifier when no ticker could be built.
        id: String,
        /// The reason the record is invalid.
        reason: String,
    },

    /// Missing required field during construction.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: String,
    },

    /// Index name that is not part of the IMA-B family.
    #[error("Unknown index '{name}': expected one of IMA-B 5, IMA-B, IMA-B 5+")]
    UnknownIndex {
        /// The unrecognised name.
        name: String,
    },

    /// Invalid optimizer configuration.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// The reason the configuration is invalid.
        reason: String,
    },

    /// The bond data source failed.
    #[error("Bond source error: {reason}")]
    Source {
        /// The underlying failure.
        reason: String,
    },
}

impl PortfolioError {
    /// Create a missing anchor bond error.
    #[must_use]
    pub fn missing_anchor(anchors: &[NaiveDate], long_weight: f64) -> Self {
        Self::MissingAnchorBond {
            anchors: anchors.to_vec(),
            long_weight,
        }
    }

    /// Create a division by zero error.
    #[must_use]
    pub fn division_by_zero(operation: impl Into<String>) -> Self {
        Self::DivisionByZero {
            operation: operation.into(),
        }
    }

    /// Create an invalid holding error.
    #[must_use]
    pub fn invalid_holding(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidHolding {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid bond record error.
    #[must_use]
    pub fn invalid_bond(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidBond {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a missing field error.
    #[must_use]
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create a source error.
    #[must_use]
    pub fn source(reason: impl Into<String>) -> Self {
        Self::Source {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortfolioError::invalid_holding("NTN-B 2035-05", "negative invested value");
        assert!(err.to_string().contains("NTN-B 2035-05"));
        assert!(err.to_string().contains("negative invested value"));

        let err = PortfolioError::missing_field("maturity");
        assert!(err.to_string().contains("maturity"));

        let err = PortfolioError::UnknownIndex {
            name: "IDKA".into(),
        };
        assert!(err.to_string().contains("IDKA"));
    }

    #[test]
    fn test_missing_anchor_display() {
        let anchors = [
            NaiveDate::from_ymd_opt(2035, 5, 15).unwrap(),
            NaiveDate::from_ymd_opt(2050, 8, 15).unwrap(),
        ];
        let err = PortfolioError::missing_anchor(&anchors, 0.4);
        let msg = err.to_string();
        assert!(msg.contains("2035-05-15"));
        assert!(msg.contains("2050-08-15"));
        assert!(msg.contains("0.4"));
    }

    #[test]
    fn test_error_clone() {
        let err = PortfolioError::division_by_zero("long split");
        assert_eq!(err.clone(), err);
    }
}
