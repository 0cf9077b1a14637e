//! Duration-matched replication of an index view.
//!
//! Replaces the full constituent list with at most four bucket positions:
//! - **Short** and **mid** buckets carry exactly the index weight of their
//!   maturity range.
//! - The **long** range weight is split over two anchor maturities in
//!   proportion to the anchors' modified durations.
//!
//! The algorithm is closed form: no search, no iteration.
//!
//! # Example
//!
//! ```rust,ignore
//! use imab_portfolio::optimizer::optimize_portfolio;
//!
//! let optimized = optimize_portfolio(&index, invested_total, &config)?;
//! for position in &optimized.positions {
//!     println!("{}: {:.2}%", position.ticker, position.new_weight * 100.0);
//! }
//! ```

mod replicate;
mod split;

pub use replicate::*;
pub use split::*;
