//! Index and portfolio risk analytics.
//!
//! This module provides the per-bond and aggregate metrics of an index view
//! and of the current portfolio measured against it:
//! - Modified duration (`duration / 252`)
//! - DV01 (`modified duration × weight`)
//! - Weighted yield
//!
//! All functions are pure - they take records and holdings as input and
//! return computed results. No caching, no I/O, no side effects.

mod risk;

pub use risk::*;
