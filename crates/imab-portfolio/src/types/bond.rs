//! Bond reference records for index constituents.

use super::IndexSelection;
use crate::error::{PortfolioError, PortfolioResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Business-day convention used to scale raw duration into modified duration.
///
/// This is a fixed constant applied uniformly to every bond, not a count of
/// the bond's remaining days.
pub const BUSINESS_DAYS_PER_YEAR: f64 = 252.0;

/// Issue type used when the source does not provide one.
pub const DEFAULT_ISSUE_TYPE: &str = "NTN-B";

/// Builds the synthetic ticker for an issue type and maturity.
///
/// ```
/// use chrono::NaiveDate;
/// use imab_portfolio::types::bond_ticker;
///
/// let maturity = NaiveDate::from_ymd_opt(2035, 5, 15).unwrap();
/// assert_eq!(bond_ticker("NTN-B", maturity), "NTN-B 2035-05");
/// ```
#[must_use]
pub fn bond_ticker(issue_type: &str, maturity: NaiveDate) -> String {
    format!("{} {}", issue_type, maturity.format("%Y-%m"))
}

/// One bond within one index membership.
///
/// A bond that belongs to several indices appears once per membership.
/// Records are read-only input; build them with [`BondRecordBuilder`] so the
/// ticker is always derived from the issue type and maturity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondRecord {
    /// Synthetic ticker (`"NTN-B 2035-05"`).
    pub ticker: String,

    /// Issue type the ticker is derived from.
    pub issue_type: String,

    /// Index this record belongs to.
    pub index_membership: IndexSelection,

    /// Maturity date.
    pub maturity: NaiveDate,

    /// Unit price.
    pub price: f64,

    /// Unmodified duration, in business days.
    pub duration: f64,

    /// Convexity.
    pub convexity: f64,

    /// Yield as a decimal fraction (0.06 = 6%).
    pub rate: f64,

    /// Fraction of the index market value.
    pub index_weight: f64,
}

impl BondRecord {
    /// Creates a builder for a record.
    #[must_use]
    pub fn builder() -> BondRecordBuilder {
        BondRecordBuilder::new()
    }

    /// Modified duration: raw duration scaled by [`BUSINESS_DAYS_PER_YEAR`].
    #[must_use]
    pub fn modified_duration(&self) -> f64 {
        self.duration / BUSINESS_DAYS_PER_YEAR
    }

    /// Returns true if the record belongs to the given index.
    #[must_use]
    pub fn is_member_of(&self, selection: IndexSelection) -> bool {
        self.index_membership == selection
    }
}

/// Builder for [`BondRecord`].
#[derive(Debug, Clone, Default)]
pub struct BondRecordBuilder {
    issue_type: Option<String>,
    index_membership: Option<IndexSelection>,
    maturity: Option<NaiveDate>,
    price: f64,
    duration: f64,
    convexity: f64,
    rate: f64,
    index_weight: f64,
}

impl BondRecordBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the issue type (defaults to [`DEFAULT_ISSUE_TYPE`]).
    #[must_use]
    pub fn issue_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue_type = Some(issue_type.into());
        self
    }

    /// Sets the index membership.
    #[must_use]
    pub fn index(mut self, selection: IndexSelection) -> Self {
        self.index_membership = Some(selection);
        self
    }

    /// Sets the maturity date.
    #[must_use]
    pub fn maturity(mut self, maturity: NaiveDate) -> Self {
        self.maturity = Some(maturity);
        self
    }

    /// Sets the price.
    #[must_use]
    pub fn price(mut self, price: f64) -> Self {
        self.price = price;
        self
    }

    /// Sets the raw duration in business days.
    #[must_use]
    pub fn duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the convexity.
    #[must_use]
    pub fn convexity(mut self, convexity: f64) -> Self {
        self.convexity = convexity;
        self
    }

    /// Sets the yield as a decimal fraction.
    #[must_use]
    pub fn rate(mut self, rate: f64) -> Self {
        self.rate = rate;
        self
    }

    /// Sets the index weight as a fraction.
    #[must_use]
    pub fn index_weight(mut self, weight: f64) -> Self {
        self.index_weight = weight;
        self
    }

    /// Builds the record, deriving its ticker.
    ///
    /// # Errors
    ///
    /// Returns an error if the index or maturity is missing, a numeric field
    /// is not finite, or the duration or index weight is negative.
    pub fn build(self) -> PortfolioResult<BondRecord> {
        let index_membership = self
            .index_membership
            .ok_or_else(|| PortfolioError::missing_field("index_membership"))?;
        let maturity = self
            .maturity
            .ok_or_else(|| PortfolioError::missing_field("maturity"))?;
        let issue_type = self
            .issue_type
            .unwrap_or_else(|| DEFAULT_ISSUE_TYPE.to_string());
        let ticker = bond_ticker(&issue_type, maturity);

        for (field, value) in [
            ("price", self.price),
            ("duration", self.duration),
            ("convexity", self.convexity),
            ("rate", self.rate),
        ] {
            if !value.is_finite() {
                return Err(PortfolioError::invalid_bond(
                    &ticker,
                    format!("{field} is not finite"),
                ));
            }
        }

        if self.duration < 0.0 {
            return Err(PortfolioError::invalid_bond(
                &ticker,
                format!("negative duration {}", self.duration),
            ));
        }

        if !self.index_weight.is_finite() || self.index_weight < 0.0 {
            return Err(PortfolioError::InvalidWeight {
                id: ticker,
                value: self.index_weight.to_string(),
            });
        }

        Ok(BondRecord {
            ticker,
            issue_type,
            index_membership,
            maturity,
            price: self.price,
            duration: self.duration,
            convexity: self.convexity,
            rate: self.rate,
            index_weight: self.index_weight,
        })
    }
}
