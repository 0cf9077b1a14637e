//! Maturity partitioning of an index view.
//!
//! Splits constituents into the short, mid and long ranges of a
//! [`BucketScheme`](crate::types::BucketScheme). Boundaries are half-open.
//!
//! # Example
//!
//! ```rust,ignore
//! use imab_portfolio::bucketing::bucket_by_maturity;
//!
//! let scheme = config.scheme(IndexSelection::Imab);
//! let weights = bucket_by_maturity(&index.bonds, &scheme).weights();
//! println!("long weight: {:.4}", weights.long);
//! ```

mod maturity;

pub use maturity::*;
