//! Risk metrics for an index view and the current portfolio.
//!
//! Provides:
//! - Per-bond modified duration and index DV01
//! - Index yield and DV01 (`Σ rate·w`, `Σ D_mod·w`)
//! - Current portfolio weights, yield and DV01
//!
//! DV01 here is the weight-scaled modified duration, so the aggregate DV01 of
//! a view doubles as its weighted duration.

use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{BondRecord, Holdings, IndexSelection, OptimizerConfig};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, warn};

/// Derived metrics of one bond within an index view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondMetrics {
    /// Synthetic ticker.
    pub ticker: String,

    /// Maturity date.
    pub maturity: NaiveDate,

    /// Unit price.
    pub price: f64,

    /// Raw duration in business days.
    pub duration: f64,

    /// `duration / 252`.
    pub modified_duration: f64,

    /// Convexity.
    pub convexity: f64,

    /// Yield as a decimal fraction.
    pub rate: f64,

    /// Fraction of index market value.
    pub index_weight: f64,

    /// Index weight in percent, for share charts.
    pub index_weight_pct: f64,

    /// `modified_duration · index_weight`.
    pub index_dv01: f64,
}

/// Metrics of a whole index view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexMetrics {
    /// The selected index.
    pub selection: IndexSelection,

    /// Per-bond metrics, in source order.
    pub bonds: Vec<BondMetrics>,

    /// `Σ rate·index_weight`.
    pub index_yield: f64,

    /// `Σ index_dv01`.
    pub total_dv01: f64,

    /// `Σ index_weight` (1.0 for a well-formed, non-empty view).
    pub weight_sum: f64,
}

impl IndexMetrics {
    /// Returns true if no bond belongs to the selection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bonds.is_empty()
    }

    /// Weighted modified duration of the index (equal to its DV01).
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.total_dv01
    }

    /// Finds a bond by ticker.
    #[must_use]
    pub fn find(&self, ticker: &str) -> Option<&BondMetrics> {
        self.bonds.iter().find(|b| b.ticker == ticker)
    }
}

/// Metrics of one index bond within the current portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionMetrics {
    /// Synthetic ticker.
    pub ticker: String,

    /// Invested value (zero for bonds not held).
    pub invested_value: Decimal,

    /// `invested_value / invested_total`, zero when nothing is invested.
    pub portfolio_weight: f64,

    /// `modified_duration · portfolio_weight`.
    pub portfolio_dv01: f64,
}

/// Metrics of the current portfolio against an index view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioMetrics {
    /// One position per index bond, in index order.
    pub positions: Vec<PositionMetrics>,

    /// Sum of invested values.
    pub invested_total: Decimal,

    /// `Σ rate·portfolio_weight`.
    pub portfolio_yield: f64,

    /// `Σ portfolio_dv01`.
    pub total_dv01: f64,

    /// `Σ portfolio_weight` (1.0 when something is invested, else 0.0).
    pub weight_sum: f64,
}

impl PortfolioMetrics {
    /// Returns true if the invested total is positive.
    #[must_use]
    pub fn has_investment(&self) -> bool {
        self.invested_total > Decimal::ZERO
    }

    /// Weighted modified duration of the portfolio (equal to its DV01).
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.total_dv01
    }

    /// Finds a position by ticker.
    #[must_use]
    pub fn find(&self, ticker: &str) -> Option<&PositionMetrics> {
        self.positions.iter().find(|p| p.ticker == ticker)
    }
}

/// Returns the records belonging to the selected index.
#[must_use]
pub fn index_view(records: &[BondRecord], selection: IndexSelection) -> Vec<BondRecord> {
    records
        .iter()
        .filter(|r| r.is_member_of(selection))
        .cloned()
        .collect()
}

/// Derives the metrics of a single bond.
#[must_use]
pub fn derive_metrics(bond: &BondRecord) -> BondMetrics {
    let modified_duration = bond.modified_duration();

    BondMetrics {
        ticker: bond.ticker.clone(),
        maturity: bond.maturity,
        price: bond.price,
        duration: bond.duration,
        modified_duration,
        convexity: bond.convexity,
        rate: bond.rate,
        index_weight: bond.index_weight,
        index_weight_pct: bond.index_weight * 100.0,
        index_dv01: modified_duration * bond.index_weight,
    }
}

/// Calculates index metrics for the selected index.
///
/// Records of other indices are filtered out first. An empty view yields
/// zero aggregates rather than an error.
///
/// ## Formula
///
/// ```text
/// D_mod_i  = duration_i / 252
/// DV01_i   = D_mod_i × w_i
/// Yield    = Σ rate_i × w_i
/// DV01     = Σ DV01_i
/// ```
#[must_use]
pub fn calculate_index_metrics(
    records: &[BondRecord],
    selection: IndexSelection,
    config: &OptimizerConfig,
) -> IndexMetrics {
    let bonds: Vec<BondMetrics> = records
        .iter()
        .filter(|r| r.is_member_of(selection))
        .map(derive_metrics)
        .collect();

    let index_yield = bonds.iter().map(|b| b.rate * b.index_weight).sum();
    let total_dv01 = bonds.iter().map(|b| b.index_dv01).sum();
    let weight_sum: f64 = bonds.iter().map(|b| b.index_weight).sum();

    if bonds.is_empty() {
        debug!(index = %selection, "no bonds in index view");
    } else if (weight_sum - 1.0).abs() > config.weight_tolerance {
        warn!(
            index = %selection,
            weight_sum,
            tolerance = config.weight_tolerance,
            "index weights do not sum to one"
        );
    }

    debug!(
        index = %selection,
        bonds = bonds.len(),
        index_yield,
        total_dv01,
        "calculated index metrics"
    );

    IndexMetrics {
        selection,
        bonds,
        index_yield,
        total_dv01,
        weight_sum,
    }
}

/// Calculates the current portfolio metrics against an index view.
///
/// Every index bond gets a position; bonds without an invested value hold
/// zero. When the invested total is zero all weights, the yield and the DV01
/// are zero.
///
/// # Errors
///
/// Returns [`PortfolioError::InvalidHolding`] if a holding ticker is not part
/// of the index view.
pub fn calculate_portfolio_metrics(
    index: &IndexMetrics,
    holdings: &Holdings,
) -> PortfolioResult<PortfolioMetrics> {
    let known: HashSet<&str> = index.bonds.iter().map(|b| b.ticker.as_str()).collect();
    if let Some(unknown) = holdings.tickers().find(|t| !known.contains(t)) {
        return Err(PortfolioError::invalid_holding(
            unknown,
            format!("not a constituent of {}", index.selection),
        ));
    }

    let invested_total = holdings.total();

    let positions: Vec<PositionMetrics> = index
        .bonds
        .iter()
        .map(|bond| {
            let invested_value = holdings.invested_value(&bond.ticker);
            let portfolio_weight = portfolio_weight(invested_value, invested_total);
            PositionMetrics {
                ticker: bond.ticker.clone(),
                invested_value,
                portfolio_weight,
                portfolio_dv01: bond.modified_duration * portfolio_weight,
            }
        })
        .collect();

    let portfolio_yield = index
        .bonds
        .iter()
        .zip(&positions)
        .map(|(b, p)| b.rate * p.portfolio_weight)
        .sum();
    let total_dv01 = positions.iter().map(|p| p.portfolio_dv01).sum();
    let weight_sum = positions.iter().map(|p| p.portfolio_weight).sum();

    debug!(
        index = %index.selection,
        %invested_total,
        portfolio_yield,
        total_dv01,
        "calculated portfolio metrics"
    );

    Ok(PortfolioMetrics {
        positions,
        invested_total,
        portfolio_yield,
        total_dv01,
        weight_sum,
    })
}

/// Share of the invested total; zero when the total is not positive.
fn portfolio_weight(value: Decimal, total: Decimal) -> f64 {
    if total <= Decimal::ZERO {
        return 0.0;
    }
    value
        .checked_div(total)
        .and_then(|w| w.to_f64())
        .unwrap_or(0.0)
}
