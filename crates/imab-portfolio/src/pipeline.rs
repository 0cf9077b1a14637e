//! One computation cycle: records → metrics → optimization → comparison.

use crate::analytics::{calculate_index_metrics, calculate_portfolio_metrics};
use crate::benchmark::{compare, ComparisonResult};
use crate::error::PortfolioResult;
use crate::optimizer::optimize_portfolio;
use crate::source::BondSource;
use crate::types::{BondRecord, OptimizationRequest, OptimizerConfig};
use tracing::{debug, info_span};

/// Runs a request against the records of a source.
///
/// # Errors
///
/// Propagates source errors and everything
/// [`compute_from_records`] returns.
pub fn compute<S: BondSource + ?Sized>(
    source: &S,
    request: &OptimizationRequest,
    config: &OptimizerConfig,
) -> PortfolioResult<ComparisonResult> {
    let records = source.records()?;
    compute_from_records(&records, request, config)
}

/// Runs a request against records already loaded.
///
/// Nothing is cached between calls; the same inputs always give the same
/// result.
///
/// # Errors
///
/// - [`PortfolioError::InvalidConfig`](crate::PortfolioError::InvalidConfig)
///   for an inconsistent configuration.
/// - [`PortfolioError::InvalidHolding`](crate::PortfolioError::InvalidHolding)
///   for a holding outside the index view.
/// - [`PortfolioError::MissingAnchorBond`](crate::PortfolioError::MissingAnchorBond)
///   and [`PortfolioError::DivisionByZero`](crate::PortfolioError::DivisionByZero)
///   from the long bucket split.
pub fn compute_from_records(
    records: &[BondRecord],
    request: &OptimizationRequest,
    config: &OptimizerConfig,
) -> PortfolioResult<ComparisonResult> {
    config.validate()?;

    let selection = request.index_selection;
    let span = info_span!("compute", index = %selection, records = records.len());
    let _guard = span.enter();

    let index = calculate_index_metrics(records, selection, config);
    let portfolio = calculate_portfolio_metrics(&index, &request.invested_values)?;
    let optimized = optimize_portfolio(&index, portfolio.invested_total, config)?;

    debug!(
        bonds = index.bonds.len(),
        buckets = optimized.positions.len(),
        invested_total = %portfolio.invested_total,
        "computation complete"
    );

    Ok(compare(index, portfolio, optimized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PortfolioError;
    use crate::source::InMemoryBondSource;
    use crate::types::IndexSelection;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn bond(year: i32, month: u32, duration: f64, weight: f64) -> BondRecord {
        BondRecord::builder()
            .index(IndexSelection::Imab5Plus)
            .maturity(NaiveDate::from_ymd_opt(year, month, 15).unwrap())
            .duration(duration)
            .rate(0.06)
            .index_weight(weight)
            .build()
            .unwrap()
    }

    fn source() -> InMemoryBondSource {
        InMemoryBondSource::new(vec![
            bond(2035, 5, 1_764.0, 0.25),
            bond(2040, 8, 2_520.0, 0.5),
            bond(2050, 8, 1_764.0, 0.25),
        ])
    }

    #[test]
    fn test_compute_from_source() {
        let request = OptimizationRequest::new(IndexSelection::Imab5Plus)
            .with_investment("NTN-B 2040-08", dec!(500))
            .unwrap();

        let result = compute(&source(), &request, &OptimizerConfig::default()).unwrap();

        assert_eq!(result.selection, IndexSelection::Imab5Plus);
        assert_eq!(result.index.bonds.len(), 3);
        assert_eq!(result.optimized.positions.len(), 2);
        assert_eq!(result.optimized.total_allocation(), dec!(500));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = OptimizerConfig::new().with_weight_tolerance(-1.0);
        let request = OptimizationRequest::new(IndexSelection::Imab);

        let err = compute(&source(), &request, &config).unwrap_err();
        assert!(matches!(err, PortfolioError::InvalidConfig { .. }));
    }

    #[test]
    fn test_same_request_same_result() {
        let request = OptimizationRequest::new(IndexSelection::Imab5Plus);
        let config = OptimizerConfig::default();

        let first = compute(&source(), &request, &config).unwrap();
        let second = compute(&source(), &request, &config).unwrap();
        assert_eq!(first, second);
    }
}
