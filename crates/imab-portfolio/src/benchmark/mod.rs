//! Index / current / optimized comparison.
//!
//! Provides the joined views a presenter renders:
//! - Per-ticker DV01 table (left join on the index bonds)
//! - DV01, duration and yield for the three series
//! - Chart series (yield vs duration, weight shares, DV01 by vertex)
//!
//! # Example
//!
//! ```rust,ignore
//! use imab_portfolio::benchmark::compare;
//!
//! let result = compare(index, portfolio, optimized);
//! println!("DV01 gap: {:.4}", result.dv01.optimized_gap());
//!
//! for row in &result.dv01_by_ticker {
//!     println!("{}: {:?}", row.ticker, row.optimized_dv01);
//! }
//! ```

mod comparison;

pub use comparison::*;
