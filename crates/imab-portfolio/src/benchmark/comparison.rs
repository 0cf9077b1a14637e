//! Index / current / optimized comparison.
//!
//! Joins the three views of one computation by ticker and computes the
//! scalar comparisons (DV01, duration, yield) that a presenter renders as
//! tables and charts.

use crate::analytics::{IndexMetrics, PortfolioMetrics};
use crate::optimizer::OptimizedPortfolio;
use crate::types::IndexSelection;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

/// The three portfolios being compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Series {
    /// The selected index.
    Index,
    /// The user's current portfolio.
    Current,
    /// The replicating portfolio.
    Optimized,
}

impl Series {
    /// Returns the series label; the index series is named after the index.
    #[must_use]
    pub fn label(&self, selection: IndexSelection) -> &'static str {
        match self {
            Self::Index => selection.name(),
            Self::Current => "Current portfolio",
            Self::Optimized => "Optimized portfolio",
        }
    }

    /// Returns the column key of this series in the DV01 table.
    #[must_use]
    pub fn dv01_key(&self) -> &'static str {
        match self {
            Self::Index => "index_dv01",
            Self::Current => "portfolio_dv01",
            Self::Optimized => "optimized_dv01",
        }
    }

    /// Returns all series in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Index, Self::Current, Self::Optimized]
    }
}

/// A scalar metric for each of the three series.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricComparison {
    /// Index value.
    pub index: f64,
    /// Current portfolio value.
    pub current: f64,
    /// Optimized portfolio value.
    pub optimized: f64,
}

impl MetricComparison {
    /// Returns the value of a series.
    #[must_use]
    pub fn get(&self, series: Series) -> f64 {
        match series {
            Series::Index => self.index,
            Series::Current => self.current,
            Series::Optimized => self.optimized,
        }
    }

    /// Current minus index.
    #[must_use]
    pub fn current_gap(&self) -> f64 {
        self.current - self.index
    }

    /// Optimized minus index.
    #[must_use]
    pub fn optimized_gap(&self) -> f64 {
        self.optimized - self.index
    }
}

/// One row of the per-ticker DV01 comparison.
///
/// Index bonds come first, in index order; bucket tickers with no index bond
/// follow with every column missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dv01Row {
    /// Ticker.
    pub ticker: String,
    /// Index DV01, if the ticker is an index bond.
    pub index_dv01: Option<f64>,
    /// Current portfolio DV01, if the ticker is an index bond.
    pub portfolio_dv01: Option<f64>,
    /// `modified_duration · new_weight`, if the ticker is both an index bond
    /// and a bucket.
    pub optimized_dv01: Option<f64>,
    /// New weight of the bucket with this ticker, if any.
    pub new_weight: Option<f64>,
}

impl Dv01Row {
    /// Returns the value of a series.
    #[must_use]
    pub fn get(&self, series: Series) -> Option<f64> {
        match series {
            Series::Index => self.index_dv01,
            Series::Current => self.portfolio_dv01,
            Series::Optimized => self.optimized_dv01,
        }
    }
}

/// A long-form DV01 value, one per ticker and series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dv01Point {
    /// Ticker.
    pub ticker: String,
    /// Series the value belongs to.
    pub series: Series,
    /// DV01.
    pub value: f64,
}

/// A point of the yield versus duration scatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldDurationPoint {
    /// Series label.
    pub label: String,
    /// Series.
    pub series: Series,
    /// Weighted yield.
    pub yield_value: f64,
    /// Weighted modified duration.
    pub duration: f64,
}

/// A slice of a share chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightShare {
    /// Ticker.
    pub ticker: String,
    /// Slice value (percent of index, invested value, or bucket weight).
    pub value: f64,
}

/// Everything a presenter needs for one computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// The selected index.
    pub selection: IndexSelection,

    /// Index view metrics.
    pub index: IndexMetrics,

    /// Current portfolio metrics.
    pub portfolio: PortfolioMetrics,

    /// Replicating portfolio.
    pub optimized: OptimizedPortfolio,

    /// Per-ticker DV01 comparison.
    pub dv01_by_ticker: Vec<Dv01Row>,

    /// Bucket tickers with no index bond of the same ticker.
    pub unmatched_tickers: Vec<String>,

    /// Aggregate DV01 comparison.
    pub dv01: MetricComparison,

    /// Weighted duration comparison.
    pub duration: MetricComparison,

    /// Weighted yield comparison.
    pub yield_comparison: MetricComparison,
}

impl ComparisonResult {
    /// Returns true if the current portfolio has a positive invested total.
    #[must_use]
    pub fn has_investment(&self) -> bool {
        self.portfolio.has_investment()
    }

    /// Invested total of the current portfolio.
    #[must_use]
    pub fn invested_total(&self) -> Decimal {
        self.portfolio.invested_total
    }

    /// The three points of the yield versus duration scatter.
    #[must_use]
    pub fn yield_vs_duration(&self) -> Vec<YieldDurationPoint> {
        Series::all()
            .iter()
            .map(|s| YieldDurationPoint {
                label: s.label(self.selection).to_string(),
                series: *s,
                yield_value: self.yield_comparison.get(*s),
                duration: self.duration.get(*s),
            })
            .collect()
    }

    /// Index weight in percent per bond.
    #[must_use]
    pub fn index_shares(&self) -> Vec<WeightShare> {
        self.index
            .bonds
            .iter()
            .map(|b| WeightShare {
                ticker: b.ticker.clone(),
                value: b.index_weight_pct,
            })
            .collect()
    }

    /// Invested value per held bond; bonds not held are left out.
    #[must_use]
    pub fn holding_shares(&self) -> Vec<WeightShare> {
        self.portfolio
            .positions
            .iter()
            .filter(|p| p.invested_value > Decimal::ZERO)
            .map(|p| WeightShare {
                ticker: p.ticker.clone(),
                value: p.invested_value.to_f64().unwrap_or(0.0),
            })
            .collect()
    }

    /// New weight per bucket.
    #[must_use]
    pub fn optimized_shares(&self) -> Vec<WeightShare> {
        self.optimized
            .positions
            .iter()
            .map(|p| WeightShare {
                ticker: p.ticker.clone(),
                value: p.new_weight,
            })
            .collect()
    }

    /// DV01 table in long form; missing values are skipped.
    #[must_use]
    pub fn dv01_by_vertex(&self) -> Vec<Dv01Point> {
        self.dv01_by_ticker
            .iter()
            .flat_map(|row| {
                Series::all().iter().filter_map(move |s| {
                    row.get(*s).map(|value| Dv01Point {
                        ticker: row.ticker.clone(),
                        series: *s,
                        value,
                    })
                })
            })
            .collect()
    }
}

/// Joins index, current and optimized views into a [`ComparisonResult`].
///
/// Optimized DV01 and yield only count buckets whose ticker matches an index
/// bond, using that bond's modified duration and rate. Buckets without a
/// match are listed in `unmatched_tickers` and contribute nothing.
#[must_use]
pub fn compare(
    index: IndexMetrics,
    portfolio: PortfolioMetrics,
    optimized: OptimizedPortfolio,
) -> ComparisonResult {
    let mut dv01_by_ticker: Vec<Dv01Row> = index
        .bonds
        .iter()
        .map(|bond| {
            let bucket = optimized.find(&bond.ticker);
            Dv01Row {
                ticker: bond.ticker.clone(),
                index_dv01: Some(bond.index_dv01),
                portfolio_dv01: portfolio.find(&bond.ticker).map(|p| p.portfolio_dv01),
                optimized_dv01: bucket.map(|b| bond.modified_duration * b.new_weight),
                new_weight: bucket.map(|b| b.new_weight),
            }
        })
        .collect();

    let index_tickers: HashSet<&str> = index.bonds.iter().map(|b| b.ticker.as_str()).collect();
    let unmatched_tickers: Vec<String> = optimized
        .positions
        .iter()
        .filter(|p| !index_tickers.contains(p.ticker.as_str()))
        .map(|p| p.ticker.clone())
        .collect();

    for position in optimized
        .positions
        .iter()
        .filter(|p| unmatched_tickers.contains(&p.ticker))
    {
        dv01_by_ticker.push(Dv01Row {
            ticker: position.ticker.clone(),
            index_dv01: None,
            portfolio_dv01: None,
            optimized_dv01: None,
            new_weight: Some(position.new_weight),
        });
    }

    let (optimized_dv01, optimized_yield) = optimized
        .positions
        .iter()
        .filter_map(|p| index.find(&p.ticker).map(|b| (b, p.new_weight)))
        .fold((0.0, 0.0), |(dv01, yld), (bond, weight)| {
            (dv01 + bond.modified_duration * weight, yld + bond.rate * weight)
        });

    if !unmatched_tickers.is_empty() {
        debug!(
            index = %index.selection,
            unmatched = ?unmatched_tickers,
            "bucket tickers without a matching index bond"
        );
    }

    let dv01 = MetricComparison {
        index: index.total_dv01,
        current: portfolio.total_dv01,
        optimized: optimized_dv01,
    };

    let yield_comparison = MetricComparison {
        index: index.index_yield,
        current: portfolio.portfolio_yield,
        optimized: optimized_yield,
    };

    ComparisonResult {
        selection: index.selection,
        dv01_by_ticker,
        unmatched_tickers,
        dv01,
        duration: dv01,
        yield_comparison,
        index,
        portfolio,
        optimized,
    }
}
