//! Maturity partitions and replication buckets.
//!
//! A bucket has two independent dates: its **boundary** (the maturity range
//! whose index weight it absorbs) and its **label anchor** (the maturity used
//! to name its ticker). They are kept apart because the mid bucket of the
//! non-IMA-B 5 selections is labelled 2030-08 while its range starts in 2028.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Maturity range partition of an index view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Partition {
    /// Before the mid boundary.
    Short,
    /// From the mid boundary up to the long boundary.
    Mid,
    /// From the long boundary on.
    Long,
}

impl Partition {
    /// Returns the label for this partition.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Short => "Short",
            Self::Mid => "Mid",
            Self::Long => "Long",
        }
    }

    /// Returns all partitions in maturity order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Short, Self::Mid, Self::Long]
    }
}

impl std::fmt::Display for Partition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One of the four positions of a replicating portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BucketKind {
    /// Short partition weight.
    Short,
    /// Mid partition weight.
    Mid,
    /// Long partition share of the first anchor.
    LongFirst,
    /// Long partition share of the second anchor.
    LongSecond,
}

impl BucketKind {
    /// Returns the partition whose weight feeds this bucket.
    #[must_use]
    pub fn partition(&self) -> Partition {
        match self {
            Self::Short => Partition::Short,
            Self::Mid => Partition::Mid,
            Self::LongFirst | Self::LongSecond => Partition::Long,
        }
    }

    /// Returns all buckets in emission order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Short, Self::Mid, Self::LongFirst, Self::LongSecond]
    }
}

/// Half-open maturity range `[start, end)`; an open side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaturityRange {
    /// Inclusive lower bound.
    pub start: Option<NaiveDate>,
    /// Exclusive upper bound.
    pub end: Option<NaiveDate>,
}

impl MaturityRange {
    /// Creates a range with both bounds.
    #[must_use]
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Creates a range of everything before `end`.
    #[must_use]
    pub fn before(end: NaiveDate) -> Self {
        Self {
            start: None,
            end: Some(end),
        }
    }

    /// Creates a range of everything from `start` on.
    #[must_use]
    pub fn starting(start: NaiveDate) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    /// Returns true if the maturity falls within the range.
    #[must_use]
    pub fn contains(&self, maturity: NaiveDate) -> bool {
        self.start.map_or(true, |s| maturity >= s) && self.end.map_or(true, |e| maturity < e)
    }
}

impl std::fmt::Display for MaturityRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.start, self.end) {
            (Some(s), Some(e)) => write!(f, "[{s}, {e})"),
            (None, Some(e)) => write!(f, "< {e}"),
            (Some(s), None) => write!(f, ">= {s}"),
            (None, None) => write!(f, "all"),
        }
    }
}

/// A short or mid bucket: one boundary, one label anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketDefinition {
    /// Maturities whose weight the bucket absorbs.
    pub boundary: MaturityRange,
    /// Maturity used to label the bucket ticker.
    pub label_anchor: NaiveDate,
}

impl BucketDefinition {
    /// Returns true if the label anchor lies in the first year of the boundary.
    #[must_use]
    pub fn label_matches_boundary(&self) -> bool {
        let in_range = self.boundary.contains(self.label_anchor);
        match self.boundary.start {
            // Labelled by the first maturity year the range holds.
            Some(start) => in_range && self.label_anchor.year() == start.year(),
            None => in_range,
        }
    }
}

/// The long bucket: one boundary split over two anchor maturities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LongBucketDefinition {
    /// Maturities whose weight is split.
    pub boundary: MaturityRange,
    /// Anchor maturities forming the duration basis of the split.
    pub anchors: [NaiveDate; 2],
}

/// Partition boundaries and bucket labels for one index selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketScheme {
    /// Short bucket.
    pub short: BucketDefinition,
    /// Mid bucket.
    pub mid: BucketDefinition,
    /// Long bucket.
    pub long: LongBucketDefinition,
}

impl BucketScheme {
    /// Classifies a maturity into its partition.
    #[must_use]
    pub fn classify(&self, maturity: NaiveDate) -> Partition {
        if self.short.boundary.contains(maturity) {
            Partition::Short
        } else if self.mid.boundary.contains(maturity) {
            Partition::Mid
        } else {
            Partition::Long
        }
    }

    /// Returns the label anchor of a bucket.
    #[must_use]
    pub fn label_anchor(&self, bucket: BucketKind) -> NaiveDate {
        match bucket {
            BucketKind::Short => self.short.label_anchor,
            BucketKind::Mid => self.mid.label_anchor,
            BucketKind::LongFirst => self.long.anchors[0],
            BucketKind::LongSecond => self.long.anchors[1],
        }
    }

    /// Returns false when the mid bucket is labelled with a year outside the
    /// start of its range (the 2030 label on a range starting in 2028).
    #[must_use]
    pub fn label_matches_boundary(&self) -> bool {
        self.mid.label_matches_boundary()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn scheme(mid_label: NaiveDate) -> BucketScheme {
        BucketScheme {
            short: BucketDefinition {
                boundary: MaturityRange::before(date(2028, 1, 1)),
                label_anchor: date(2026, 8, 15),
            },
            mid: BucketDefinition {
                boundary: MaturityRange::between(date(2028, 1, 1), date(2035, 1, 1)),
                label_anchor: mid_label,
            },
            long: LongBucketDefinition {
                boundary: MaturityRange::starting(date(2035, 1, 1)),
                anchors: [date(2035, 5, 15), date(2050, 8, 15)],
            },
        }
    }

    #[test]
    fn test_range_is_half_open() {
        let range = MaturityRange::between(date(2028, 1, 1), date(2035, 1, 1));
        assert!(!range.contains(date(2027, 12, 31)));
        assert!(range.contains(date(2028, 1, 1)));
        assert!(range.contains(date(2034, 12, 31)));
        assert!(!range.contains(date(2035, 1, 1)));
    }

    #[test]
    fn test_classify() {
        let s = scheme(date(2030, 8, 15));
        assert_eq!(s.classify(date(2026, 8, 15)), Partition::Short);
        assert_eq!(s.classify(date(2028, 1, 1)), Partition::Mid);
        assert_eq!(s.classify(date(2032, 8, 15)), Partition::Mid);
        assert_eq!(s.classify(date(2035, 1, 1)), Partition::Long);
        assert_eq!(s.classify(date(2060, 8, 15)), Partition::Long);
    }

    #[test]
    fn test_label_discrepancy_is_reported() {
        assert!(scheme(date(2028, 8, 15)).label_matches_boundary());
        assert!(!scheme(date(2030, 8, 15)).label_matches_boundary());
    }

    #[test]
    fn test_label_anchor_lookup() {
        let s = scheme(date(2030, 8, 15));
        assert_eq!(s.label_anchor(BucketKind::Short), date(2026, 8, 15));
        assert_eq!(s.label_anchor(BucketKind::Mid), date(2030, 8, 15));
        assert_eq!(s.label_anchor(BucketKind::LongFirst), date(2035, 5, 15));
        assert_eq!(s.label_anchor(BucketKind::LongSecond), date(2050, 8, 15));
    }

    #[test]
    fn test_bucket_partitions() {
        assert_eq!(BucketKind::Short.partition(), Partition::Short);
        assert_eq!(BucketKind::Mid.partition(), Partition::Mid);
        assert_eq!(BucketKind::LongFirst.partition(), Partition::Long);
        assert_eq!(BucketKind::LongSecond.partition(), Partition::Long);
        assert_eq!(BucketKind::all().len(), 4);
    }

    #[test]
    fn test_range_display() {
        assert_eq!(MaturityRange::before(date(2028, 1, 1)).to_string(), "< 2028-01-01");
        assert_eq!(MaturityRange::starting(date(2035, 1, 1)).to_string(), ">= 2035-01-01");
    }
}
