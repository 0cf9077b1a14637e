//! Bond data sources.
//!
//! A [`BondSource`] supplies the bond records of every index; the engine only
//! ever reads from it. File-backed implementations live in `imab-ext-file`.

use crate::analytics::index_view;
use crate::error::PortfolioResult;
use crate::types::{BondRecord, IndexSelection};

/// Trait for bond record providers.
pub trait BondSource {
    /// Returns all records, of every index, in source order.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::Source`](crate::PortfolioError::Source) if
    /// the records cannot be read.
    fn records(&self) -> PortfolioResult<Vec<BondRecord>>;

    /// Returns the records belonging to one index.
    ///
    /// # Errors
    ///
    /// Same as [`records`](Self::records).
    fn index_view(&self, selection: IndexSelection) -> PortfolioResult<Vec<BondRecord>> {
        Ok(index_view(&self.records()?, selection))
    }
}

impl<S: BondSource + ?Sized> BondSource for &S {
    fn records(&self) -> PortfolioResult<Vec<BondRecord>> {
        (**self).records()
    }
}

impl<S: BondSource + ?Sized> BondSource for Box<S> {
    fn records(&self) -> PortfolioResult<Vec<BondRecord>> {
        (**self).records()
    }
}

/// Source over records already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBondSource {
    records: Vec<BondRecord>,
}

impl InMemoryBondSource {
    /// Creates a source over the given records.
    #[must_use]
    pub fn new(records: Vec<BondRecord>) -> Self {
        Self { records }
    }

    /// Adds a record.
    #[must_use]
    pub fn with_record(mut self, record: BondRecord) -> Self {
        self.records.push(record);
        self
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the source has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<BondRecord>> for InMemoryBondSource {
    fn from(records: Vec<BondRecord>) -> Self {
        Self::new(records)
    }
}

impl BondSource for InMemoryBondSource {
    fn records(&self) -> PortfolioResult<Vec<BondRecord>> {
        Ok(self.records.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn bond(selection: IndexSelection, year: i32) -> BondRecord {
        BondRecord::builder()
            .index(selection)
            .maturity(NaiveDate::from_ymd_opt(year, 8, 15).unwrap())
            .duration(1_000.0)
            .index_weight(0.5)
            .build()
            .unwrap()
    }

    #[test]
    fn test_in_memory_index_view() {
        let source = InMemoryBondSource::default()
            .with_record(bond(IndexSelection::Imab5, 2026))
            .with_record(bond(IndexSelection::Imab, 2026))
            .with_record(bond(IndexSelection::Imab, 2040));

        assert_eq!(source.len(), 3);
        assert_eq!(source.records().unwrap().len(), 3);
        assert_eq!(source.index_view(IndexSelection::Imab).unwrap().len(), 2);
        assert!(source.index_view(IndexSelection::Imab5Plus).unwrap().is_empty());
    }

    #[test]
    fn test_boxed_source() {
        let source: Box<dyn BondSource> =
            Box::new(InMemoryBondSource::from(vec![bond(IndexSelection::Imab5Plus, 2040)]));
        assert_eq!(source.index_view(IndexSelection::Imab5Plus).unwrap().len(), 1);
    }
}
