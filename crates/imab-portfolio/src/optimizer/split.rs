//! Long bucket split policy.
//!
//! Kept apart from the partition logic so the policy can change without
//! touching how weights are gathered.

use crate::analytics::BondMetrics;
use crate::error::{PortfolioError, PortfolioResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fractions of the long partition weight given to each anchor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LongSplit {
    /// Share of the first anchor.
    pub first: f64,
    /// Share of the second anchor.
    pub second: f64,
}

impl LongSplit {
    /// Applies the split to a long partition weight.
    #[must_use]
    pub fn apply(&self, long_weight: f64) -> (f64, f64) {
        (long_weight * self.first, long_weight * self.second)
    }
}

/// Splits by modified duration: `d1/(d1+d2)` and `d2/(d1+d2)`.
///
/// An absent anchor contributes zero duration, so the whole weight goes to
/// the other one.
///
/// # Errors
///
/// Returns [`PortfolioError::InvalidBond`] when either duration is negative
/// and [`PortfolioError::DivisionByZero`] when `d1 + d2` is not positive.
pub fn long_split_ratio(d1: f64, d2: f64) -> PortfolioResult<LongSplit> {
    if d1 < 0.0 || d2 < 0.0 {
        return Err(PortfolioError::invalid_bond(
            "long bucket anchors",
            format!("negative anchor duration ({d1}, {d2})"),
        ));
    }
    let sum = d1 + d2;
    if sum.is_nan() || sum <= 0.0 {
        return Err(PortfolioError::division_by_zero(format!(
            "long bucket split (anchor durations {d1} + {d2})"
        )));
    }
    Ok(LongSplit {
        first: d1 / sum,
        second: d2 / sum,
    })
}

/// Sum of modified durations of the bonds maturing on `anchor`.
///
/// Returns `None` when no bond in the view matures on that date.
#[must_use]
pub fn anchor_duration(bonds: &[BondMetrics], anchor: NaiveDate) -> Option<f64> {
    let mut matched = bonds.iter().filter(|b| b.maturity == anchor).peekable();
    matched.peek()?;
    Some(matched.map(|b| b.modified_duration).sum())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::derive_metrics;
    use crate::types::{BondRecord, IndexSelection};
    use approx::assert_relative_eq;

    #[test]
    fn test_split_by_duration() {
        let split = long_split_ratio(7.0, 14.0).unwrap();
        assert_relative_eq!(split.first, 1.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(split.second, 2.0 / 3.0, epsilon = 1e-12);
        assert_relative_eq!(split.first / split.second, 7.0 / 14.0, epsilon = 1e-12);
    }

    #[test]
    fn test_single_anchor_takes_all() {
        let split = long_split_ratio(7.0, 0.0).unwrap();
        assert_eq!(split.first, 1.0);
        assert_eq!(split.second, 0.0);
    }

    #[test]
    fn test_zero_durations_fail() {
        let err = long_split_ratio(0.0, 0.0).unwrap_err();
        assert!(matches!(err, PortfolioError::DivisionByZero { .. }));
        assert!(long_split_ratio(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_negative_duration_fails() {
        let err = long_split_ratio(5.0, -1.0).unwrap_err();
        assert!(matches!(err, PortfolioError::InvalidBond { .. }));
        assert!(long_split_ratio(-1.0, 5.0).is_err());
    }

    #[test]
    fn test_apply() {
        let (a, b) = long_split_ratio(1.0, 3.0).unwrap().apply(0.4);
        assert_relative_eq!(a, 0.1, epsilon = 1e-12);
        assert_relative_eq!(b, 0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_anchor_duration() {
        let anchor = NaiveDate::from_ymd_opt(2035, 5, 15).unwrap();
        let bonds = vec![derive_metrics(
            &BondRecord::builder()
                .index(IndexSelection::Imab)
                .maturity(anchor)
                .duration(1_764.0)
                .build()
                .unwrap(),
        )];

        assert_eq!(anchor_duration(&bonds, anchor), Some(7.0));
        assert_eq!(
            anchor_duration(&bonds, NaiveDate::from_ymd_opt(2050, 8, 15).unwrap()),
            None
        );
    }
}
