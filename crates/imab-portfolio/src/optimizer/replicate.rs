//! Four-bucket replicating portfolio.

use super::split::{anchor_duration, long_split_ratio, LongSplit};
use crate::analytics::IndexMetrics;
use crate::bucketing::{bucket_by_maturity, PartitionWeights};
use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{bond_ticker, BucketKind, IndexSelection, OptimizerConfig};
use chrono::NaiveDate;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One bucket position of the replicating portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedPosition {
    /// Which bucket this position fills.
    pub bucket: BucketKind,

    /// Ticker derived from the bucket's label anchor.
    pub ticker: String,

    /// Maturity the ticker is derived from.
    pub label_anchor: NaiveDate,

    /// Fraction of the portfolio held in this bucket.
    pub new_weight: f64,

    /// `invested_total · new_weight`.
    pub new_allocation: Decimal,
}

/// Replicating portfolio for one index view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedPortfolio {
    /// The index being replicated.
    pub selection: IndexSelection,

    /// Positions with positive weight, in bucket order.
    pub positions: Vec<OptimizedPosition>,

    /// Index weight of each maturity partition.
    pub partition_weights: PartitionWeights,

    /// Invested total the allocations are scaled by.
    pub invested_total: Decimal,

    /// Long bucket split, when the long partition carries weight.
    pub long_split: Option<LongSplit>,

    /// False when the mid bucket label falls outside the first year of its
    /// maturity range.
    pub label_matches_boundary: bool,
}

impl OptimizedPortfolio {
    /// Sum of bucket weights.
    #[must_use]
    pub fn total_weight(&self) -> f64 {
        self.positions.iter().map(|p| p.new_weight).sum()
    }

    /// Sum of bucket allocations.
    #[must_use]
    pub fn total_allocation(&self) -> Decimal {
        self.positions.iter().map(|p| p.new_allocation).sum()
    }

    /// Returns the position of a bucket, if it was emitted.
    #[must_use]
    pub fn get(&self, bucket: BucketKind) -> Option<&OptimizedPosition> {
        self.positions.iter().find(|p| p.bucket == bucket)
    }

    /// Finds a position by ticker.
    #[must_use]
    pub fn find(&self, ticker: &str) -> Option<&OptimizedPosition> {
        self.positions.iter().find(|p| p.ticker == ticker)
    }

    /// Returns true if no bucket carries weight.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// Builds the replicating portfolio of an index view.
///
/// ## Algorithm
///
/// ```text
/// W_short = Σ w_i  (maturity < mid boundary)
/// W_mid   = Σ w_i  (mid boundary ≤ maturity < long boundary)
/// W_long  = Σ w_i  (maturity ≥ long boundary)
///
/// W_long_1 = W_long × d1 / (d1 + d2)
/// W_long_2 = W_long × d2 / (d1 + d2)
///
/// allocation_k = invested_total × W_k
/// ```
///
/// `d1`, `d2` are the modified durations of the bonds maturing on the two
/// long anchors. Buckets with zero weight are omitted. A zero invested total
/// gives zero allocations with unchanged weights.
///
/// # Errors
///
/// - [`PortfolioError::MissingAnchorBond`] if the long partition carries
///   weight and neither anchor bond is in the view.
/// - [`PortfolioError::DivisionByZero`] if the anchors are present but their
///   durations sum to zero.
pub fn optimize_portfolio(
    index: &IndexMetrics,
    invested_total: Decimal,
    config: &OptimizerConfig,
) -> PortfolioResult<OptimizedPortfolio> {
    let scheme = config.scheme(index.selection);
    let weights = bucket_by_maturity(&index.bonds, &scheme).weights();

    let long_split = if weights.long > 0.0 {
        Some(split_long_bucket(index, &scheme.long.anchors, weights.long)?)
    } else {
        None
    };
    let (long_first, long_second) = long_split.map_or((0.0, 0.0), |s| s.apply(weights.long));

    let candidates = [
        (BucketKind::Short, weights.short),
        (BucketKind::Mid, weights.mid),
        (BucketKind::LongFirst, long_first),
        (BucketKind::LongSecond, long_second),
    ];

    let mut positions = Vec::with_capacity(candidates.len());
    for (bucket, new_weight) in candidates {
        if new_weight <= 0.0 {
            continue;
        }
        let label_anchor = scheme.label_anchor(bucket);
        let ticker = bond_ticker(&config.issue_type, label_anchor);
        let new_allocation = allocation(invested_total, new_weight, &ticker)?;

        positions.push(OptimizedPosition {
            bucket,
            ticker,
            label_anchor,
            new_weight,
            new_allocation,
        });
    }

    debug!(
        index = %index.selection,
        buckets = positions.len(),
        short = weights.short,
        mid = weights.mid,
        long = weights.long,
        "optimized portfolio"
    );

    Ok(OptimizedPortfolio {
        selection: index.selection,
        positions,
        partition_weights: weights,
        invested_total,
        long_split,
        label_matches_boundary: scheme.label_matches_boundary(),
    })
}

fn split_long_bucket(
    index: &IndexMetrics,
    anchors: &[NaiveDate; 2],
    long_weight: f64,
) -> PortfolioResult<LongSplit> {
    let d1 = anchor_duration(&index.bonds, anchors[0]);
    let d2 = anchor_duration(&index.bonds, anchors[1]);

    match (d1, d2) {
        (None, None) => Err(PortfolioError::missing_anchor(anchors, long_weight)),
        (Some(d1), Some(d2)) => long_split_ratio(d1, d2),
        (d1, d2) => {
            let missing = if d1.is_none() { anchors[0] } else { anchors[1] };
            warn!(
                index = %index.selection,
                %missing,
                "long anchor bond absent, routing long weight to the remaining anchor"
            );
            long_split_ratio(d1.unwrap_or(0.0), d2.unwrap_or(0.0))
        }
    }
}

fn allocation(invested_total: Decimal, weight: f64, ticker: &str) -> PortfolioResult<Decimal> {
    let weight_dec = Decimal::from_f64(weight).ok_or_else(|| PortfolioError::InvalidWeight {
        id: ticker.to_string(),
        value: weight.to_string(),
    })?;
    invested_total
        .checked_mul(weight_dec)
        .ok_or_else(|| PortfolioError::invalid_holding(ticker, "allocation overflows"))
}
