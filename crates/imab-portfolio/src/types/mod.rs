//! Domain types for index analytics.
//!
//! - [`BondRecord`]: One bond within one index membership
//! - [`IndexSelection`]: IMA-B 5, IMA-B or IMA-B 5+
//! - [`Holdings`]: Invested value per ticker
//! - [`BucketScheme`]: Partition boundaries and bucket label anchors
//! - [`OptimizerConfig`]: Configuration for the replication pipeline
//! - [`OptimizationRequest`]: Explicit input of one computation

mod bond;
mod config;
mod holding;
mod index;
mod maturity;
mod request;

pub use bond::{
    bond_ticker, BondRecord, BondRecordBuilder, BUSINESS_DAYS_PER_YEAR, DEFAULT_ISSUE_TYPE,
};
pub use config::OptimizerConfig;
pub use holding::Holdings;
pub use index::IndexSelection;
pub use maturity::{
    BucketDefinition, BucketKind, BucketScheme, LongBucketDefinition, MaturityRange, Partition,
};
pub use request::OptimizationRequest;
