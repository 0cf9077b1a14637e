//! Maturity-based partitioning of an index view.
//!
//! Splits index constituents into the short, mid and long ranges of a
//! [`BucketScheme`] and aggregates their index weight.

use crate::analytics::BondMetrics;
use crate::types::{BucketScheme, Partition};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Aggregated index metrics for one partition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionMetrics {
    /// Number of bonds in this partition.
    pub count: usize,

    /// `Σ index_weight` of the partition.
    pub index_weight: f64,

    /// `Σ index_dv01` of the partition.
    pub index_dv01: f64,

    /// Tickers in the partition, in index order.
    pub tickers: Vec<String>,
}

impl PartitionMetrics {
    /// Returns true if this partition is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Index-weighted modified duration within the partition.
    #[must_use]
    pub fn avg_duration(&self) -> Option<f64> {
        (self.index_weight > 0.0).then(|| self.index_dv01 / self.index_weight)
    }
}

/// Index weight of each partition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionWeights {
    /// Short partition weight.
    pub short: f64,
    /// Mid partition weight.
    pub mid: f64,
    /// Long partition weight.
    pub long: f64,
}

impl PartitionWeights {
    /// Returns the weight of a partition.
    #[must_use]
    pub fn get(&self, partition: Partition) -> f64 {
        match partition {
            Partition::Short => self.short,
            Partition::Mid => self.mid,
            Partition::Long => self.long,
        }
    }

    /// Sum of all partition weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.short + self.mid + self.long
    }
}

/// Distribution of an index view over the maturity partitions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaturityDistribution {
    /// Metrics by partition; every partition is present, possibly empty.
    pub by_partition: BTreeMap<Partition, PartitionMetrics>,
}

impl MaturityDistribution {
    /// Returns the metrics of a partition.
    #[must_use]
    pub fn get(&self, partition: Partition) -> Option<&PartitionMetrics> {
        self.by_partition.get(&partition)
    }

    /// Returns the index weight of each partition.
    #[must_use]
    pub fn weights(&self) -> PartitionWeights {
        let weight = |p| self.get(p).map_or(0.0, |m| m.index_weight);
        PartitionWeights {
            short: weight(Partition::Short),
            mid: weight(Partition::Mid),
            long: weight(Partition::Long),
        }
    }
}

/// Partitions index bonds by maturity.
///
/// Boundaries are half-open: a bond maturing exactly on the mid boundary is
/// mid, exactly on the long boundary is long.
#[must_use]
pub fn bucket_by_maturity(bonds: &[BondMetrics], scheme: &BucketScheme) -> MaturityDistribution {
    let mut by_partition: BTreeMap<Partition, PartitionMetrics> = Partition::all()
        .iter()
        .map(|p| (*p, PartitionMetrics::default()))
        .collect();

    for bond in bonds {
        let metrics = by_partition
            .entry(scheme.classify(bond.maturity))
            .or_default();
        metrics.count += 1;
        metrics.index_weight += bond.index_weight;
        metrics.index_dv01 += bond.index_dv01;
        metrics.tickers.push(bond.ticker.clone());
    }

    MaturityDistribution { by_partition }
}
