//! # IMA-B Portfolio
//!
//! Risk metrics and duration-matched replication for portfolios tracking the
//! IMA-B family of inflation-linked bond indices (IMA-B 5, IMA-B, IMA-B 5+).
//!
//! ## Design Philosophy
//!
//! - **Pure functions**: All calculations are stateless with explicit inputs
//! - **Recompute per request**: Every [`OptimizationRequest`] is evaluated from scratch
//! - **Decoupled labels**: Bucket boundaries and the maturities used for bucket
//!   tickers are configured separately
//!
//! ## Features
//!
//! - **Index Metrics**: Modified duration, DV01 and yield per bond and per index view
//! - **Portfolio Metrics**: Weights, DV01 and yield of the current portfolio
//! - **Replication**: Four-bucket portfolio with a duration-weighted long split
//! - **Comparison**: Index / current / optimized tables and chart series
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use imab_portfolio::prelude::*;
//!
//! let source = InMemoryBondSource::new(records);
//! let request = OptimizationRequest::new(IndexSelection::Imab)
//!     .with_investment("NTN-B 2035-05", dec!(1_000_000))?;
//!
//! let result = compute(&source, &request, &OptimizerConfig::default())?;
//! for position in &result.optimized.positions {
//!     println!("{} {}", position.ticker, position.new_allocation);
//! }
//! ```
//!
//! ## Module Overview
//!
//! - [`analytics`] - Index and portfolio risk metrics
//! - [`bucketing`] - Maturity partitioning
//! - [`optimizer`] - Four-bucket replicating portfolio
//! - [`benchmark`] - Index / current / optimized comparison
//! - [`source`] - Bond record sources
//! - [`pipeline`] - One computation cycle end to end
//! - [`types`] - Core types (BondRecord, Holdings, Config)

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::module_name_repetitions)]

// Module declarations
pub mod analytics;
pub mod benchmark;
pub mod bucketing;
pub mod error;
pub mod optimizer;
pub mod pipeline;
pub mod source;
pub mod types;

// Re-export error types at crate root
pub use error::{PortfolioError, PortfolioResult};

// Re-export main types
pub use types::{
    // Bond
    bond_ticker,
    BondRecord,
    BondRecordBuilder,
    // Maturity
    BucketDefinition,
    BucketKind,
    BucketScheme,
    // Holding
    Holdings,
    // Index
    IndexSelection,
    LongBucketDefinition,
    MaturityRange,
    // Request
    OptimizationRequest,
    // Config
    OptimizerConfig,
    Partition,
    BUSINESS_DAYS_PER_YEAR,
    DEFAULT_ISSUE_TYPE,
};

// Re-export analytics types and functions
pub use analytics::{
    calculate_index_metrics, calculate_portfolio_metrics, derive_metrics, index_view,
    BondMetrics, IndexMetrics, PortfolioMetrics, PositionMetrics,
};

// Re-export bucketing types and functions
pub use bucketing::{bucket_by_maturity, MaturityDistribution, PartitionMetrics, PartitionWeights};

// Re-export optimizer types and functions
pub use optimizer::{
    anchor_duration, long_split_ratio, optimize_portfolio, LongSplit, OptimizedPortfolio,
    OptimizedPosition,
};

// Re-export comparison types and functions
pub use benchmark::{
    compare, ComparisonResult, Dv01Point, Dv01Row, MetricComparison, Series, WeightShare,
    YieldDurationPoint,
};

// Re-export sources and the pipeline
pub use pipeline::{compute, compute_from_records};
pub use source::{BondSource, InMemoryBondSource};

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use imab_portfolio::prelude::*;
/// ```
pub mod prelude {
    // Error types
    pub use crate::error::{PortfolioError, PortfolioResult};

    // Core types
    pub use crate::types::{
        BondRecord, BucketKind, Holdings, IndexSelection, OptimizationRequest, OptimizerConfig,
        Partition,
    };

    // Analytics
    pub use crate::analytics::{
        calculate_index_metrics, calculate_portfolio_metrics, IndexMetrics, PortfolioMetrics,
    };

    // Optimization and comparison
    pub use crate::benchmark::{compare, ComparisonResult, Series};
    pub use crate::optimizer::{optimize_portfolio, OptimizedPortfolio};

    // Pipeline
    pub use crate::pipeline::{compute, compute_from_records};
    pub use crate::source::{BondSource, InMemoryBondSource};

    // Re-export commonly used types from dependencies
    pub use chrono::NaiveDate;
    pub use rust_decimal::Decimal;
    pub use rust_decimal_macros::dec;
}
