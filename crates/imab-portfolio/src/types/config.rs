//! Configuration for index analytics and replication.

use super::{
    BucketDefinition, BucketScheme, IndexSelection, LongBucketDefinition, MaturityRange,
    DEFAULT_ISSUE_TYPE,
};
use crate::error::{PortfolioError, PortfolioResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Configuration for the replication pipeline.
///
/// Holds the partition boundaries and anchor maturities the optimizer uses.
/// The defaults reproduce the NTN-B bucket layout: short up to 2028, mid up
/// to 2035, long split over the 2035-05 and 2050-08 bonds.
///
/// Every field has a default, so a partial TOML/JSON table deserializes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Issue type used to label bucket tickers.
    pub issue_type: String,

    /// First maturity of the mid partition.
    pub mid_boundary: NaiveDate,

    /// First maturity of the long partition.
    pub long_boundary: NaiveDate,

    /// Label anchor of the short bucket.
    pub short_anchor: NaiveDate,

    /// Label anchor of the mid bucket for IMA-B 5.
    pub imab5_mid_anchor: NaiveDate,

    /// Label anchor of the mid bucket for every other selection.
    pub mid_anchor: NaiveDate,

    /// Anchor maturities of the long bucket split.
    pub long_anchors: [NaiveDate; 2],

    /// Allowed deviation of index weights from 1.0 before a warning is logged.
    pub weight_tolerance: f64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            issue_type: DEFAULT_ISSUE_TYPE.to_string(),
            mid_boundary: ymd(2028, 1, 1),
            long_boundary: ymd(2035, 1, 1),
            short_anchor: ymd(2026, 8, 15),
            imab5_mid_anchor: ymd(2028, 8, 15),
            mid_anchor: ymd(2030, 8, 15),
            long_anchors: [ymd(2035, 5, 15), ymd(2050, 8, 15)],
            weight_tolerance: 1e-6,
        }
    }
}

impl OptimizerConfig {
    /// Creates a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the issue type used for bucket labels.
    #[must_use]
    pub fn with_issue_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue_type = issue_type.into();
        self
    }

    /// Sets the mid and long partition boundaries.
    #[must_use]
    pub fn with_boundaries(mut self, mid: NaiveDate, long: NaiveDate) -> Self {
        self.mid_boundary = mid;
        self.long_boundary = long;
        self
    }

    /// Sets the long bucket anchor maturities.
    #[must_use]
    pub fn with_long_anchors(mut self, first: NaiveDate, second: NaiveDate) -> Self {
        self.long_anchors = [first, second];
        self
    }

    /// Sets the weight tolerance.
    #[must_use]
    pub fn with_weight_tolerance(mut self, tolerance: f64) -> Self {
        self.weight_tolerance = tolerance;
        self
    }

    /// Returns the bucket scheme for an index selection.
    ///
    /// Only the mid label depends on the selection; the partition boundaries
    /// are shared by all of them.
    #[must_use]
    pub fn scheme(&self, selection: IndexSelection) -> BucketScheme {
        let mid_label = match selection {
            IndexSelection::Imab5 => self.imab5_mid_anchor,
            IndexSelection::Imab | IndexSelection::Imab5Plus => self.mid_anchor,
        };

        BucketScheme {
            short: BucketDefinition {
                boundary: MaturityRange::before(self.mid_boundary),
                label_anchor: self.short_anchor,
            },
            mid: BucketDefinition {
                boundary: MaturityRange::between(self.mid_boundary, self.long_boundary),
                label_anchor: mid_label,
            },
            long: LongBucketDefinition {
                boundary: MaturityRange::starting(self.long_boundary),
                anchors: self.long_anchors,
            },
        }
    }

    /// Checks the configuration for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidConfig`] if the boundaries are out of
    /// order, the anchors coincide, the tolerance is negative, or the issue
    /// type is blank.
    pub fn validate(&self) -> PortfolioResult<()> {
        if self.mid_boundary >= self.long_boundary {
            return Err(PortfolioError::invalid_config(format!(
                "mid boundary {} must precede long boundary {}",
                self.mid_boundary, self.long_boundary
            )));
        }
        if self.long_anchors[0] == self.long_anchors[1] {
            return Err(PortfolioError::invalid_config(format!(
                "long anchors must differ, both are {}",
                self.long_anchors[0]
            )));
        }
        if !self.weight_tolerance.is_finite() || self.weight_tolerance < 0.0 {
            return Err(PortfolioError::invalid_config(format!(
                "weight tolerance must be non-negative, got {}",
                self.weight_tolerance
            )));
        }
        if self.issue_type.trim().is_empty() {
            return Err(PortfolioError::invalid_config("issue type is empty"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Partition;

    #[test]
    fn test_default() {
        let config = OptimizerConfig::default();
        assert_eq!(config.issue_type, "NTN-B");
        assert_eq!(config.mid_boundary, ymd(2028, 1, 1));
        assert_eq!(config.long_boundary, ymd(2035, 1, 1));
        assert_eq!(config.long_anchors, [ymd(2035, 5, 15), ymd(2050, 8, 15)]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mid_label_depends_on_selection() {
        let config = OptimizerConfig::default();
        assert_eq!(config.scheme(IndexSelection::Imab5).mid.label_anchor, ymd(2028, 8, 15));
        assert_eq!(config.scheme(IndexSelection::Imab).mid.label_anchor, ymd(2030, 8, 15));
        assert_eq!(config.scheme(IndexSelection::Imab5Plus).mid.label_anchor, ymd(2030, 8, 15));
    }

    #[test]
    fn test_boundaries_do_not_depend_on_selection() {
        let config = OptimizerConfig::default();
        for selection in IndexSelection::all() {
            let scheme = config.scheme(*selection);
            assert_eq!(scheme.classify(ymd(2027, 12, 31)), Partition::Short);
            assert_eq!(scheme.classify(ymd(2028, 1, 1)), Partition::Mid);
            assert_eq!(scheme.classify(ymd(2035, 1, 1)), Partition::Long);
        }
    }

    #[test]
    fn test_label_discrepancy_flagged() {
        let config = OptimizerConfig::default();
        assert!(config.scheme(IndexSelection::Imab5).label_matches_boundary());
        assert!(!config.scheme(IndexSelection::Imab).label_matches_boundary());
    }

    #[test]
    fn test_builder_pattern() {
        let config = OptimizerConfig::new()
            .with_issue_type("NTN-C")
            .with_boundaries(ymd(2029, 1, 1), ymd(2036, 1, 1))
            .with_long_anchors(ymd(2040, 8, 15), ymd(2055, 5, 15))
            .with_weight_tolerance(1e-3);

        assert_eq!(config.issue_type, "NTN-C");
        assert_eq!(config.mid_boundary, ymd(2029, 1, 1));
        assert_eq!(config.long_anchors[1], ymd(2055, 5, 15));
        assert_eq!(config.weight_tolerance, 1e-3);
    }

    #[test]
    fn test_validate_rejects_inverted_boundaries() {
        let config = OptimizerConfig::new().with_boundaries(ymd(2035, 1, 1), ymd(2028, 1, 1));
        assert!(matches!(config.validate(), Err(PortfolioError::InvalidConfig { .. })));
    }

    #[test]
    fn test_validate_rejects_equal_anchors() {
        let config = OptimizerConfig::new().with_long_anchors(ymd(2035, 5, 15), ymd(2035, 5, 15));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize() {
        let config: OptimizerConfig =
            serde_json::from_str(r#"{"long_anchors": ["2040-08-15", "2060-08-15"]}"#).unwrap();
        assert_eq!(config.long_anchors, [ymd(2040, 8, 15), ymd(2060, 8, 15)]);
        assert_eq!(config.mid_boundary, ymd(2028, 1, 1));
    }
}
