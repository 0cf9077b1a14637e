//! Invested values of the current portfolio.

use crate::error::{PortfolioError, PortfolioResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Invested value per ticker, as entered by the user.
///
/// Only invested values are supplied; weights and DV01 are recomputed by the
/// engine on every request. Tickers without an entry hold nothing.
///
/// Every value is non-negative and the total always fits in a [`Decimal`];
/// deserialization goes through the same checks as [`insert`](Self::insert).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Decimal>", into = "BTreeMap<String, Decimal>")]
pub struct Holdings {
    invested: BTreeMap<String, Decimal>,
}

impl Holdings {
    /// Creates empty holdings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the invested value of a ticker, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PortfolioError::InvalidHolding`] for a blank ticker, a
    /// negative value, or a value that would overflow the invested total.
    pub fn insert(&mut self, ticker: impl Into<String>, value: Decimal) -> PortfolioResult<()> {
        let ticker = ticker.into();
        if ticker.trim().is_empty() {
            return Err(PortfolioError::invalid_holding(ticker, "ticker is blank"));
        }
        if value.is_sign_negative() && !value.is_zero() {
            return Err(PortfolioError::invalid_holding(
                ticker,
                format!("negative invested value {value}"),
            ));
        }

        let others = self
            .invested
            .iter()
            .filter(|(t, _)| **t != ticker)
            .try_fold(Decimal::ZERO, |acc, (_, v)| acc.checked_add(*v));
        if others.and_then(|sum| sum.checked_add(value)).is_none() {
            return Err(PortfolioError::invalid_holding(ticker, "invested total overflows"));
        }

        self.invested.insert(ticker, value);
        Ok(())
    }

    /// Adds to the invested value of a ticker.
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert); the addition itself is checked.
    pub fn add(&mut self, ticker: impl Into<String>, value: Decimal) -> PortfolioResult<()> {
        let ticker = ticker.into();
        if value.is_sign_negative() && !value.is_zero() {
            return Err(PortfolioError::invalid_holding(
                ticker,
                format!("negative invested value {value}"),
            ));
        }
        let accumulated = self
            .invested_value(&ticker)
            .checked_add(value)
            .ok_or_else(|| PortfolioError::invalid_holding(&ticker, "invested value overflows"))?;
        self.insert(ticker, accumulated)
    }

    /// Builder-style [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Same as [`insert`](Self::insert).
    pub fn with(mut self, ticker: impl Into<String>, value: Decimal) -> PortfolioResult<Self> {
        self.insert(ticker, value)?;
        Ok(self)
    }

    /// Returns the invested value of a ticker (zero if absent).
    #[must_use]
    pub fn invested_value(&self, ticker: &str) -> Decimal {
        self.invested.get(ticker).copied().unwrap_or(Decimal::ZERO)
    }

    /// Returns the sum of invested values.
    ///
    /// Cannot overflow: [`insert`](Self::insert) rejects any value that
    /// would.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.invested.values().copied().sum()
    }

    /// Returns true if no ticker has an entry.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.invested.is_empty()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.invested.len()
    }

    /// Iterates over `(ticker, invested value)` in ticker order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.invested.iter().map(|(t, v)| (t.as_str(), *v))
    }

    /// Returns the tickers with an entry.
    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.invested.keys().map(String::as_str)
    }
}

impl TryFrom<Vec<(String, Decimal)>> for Holdings {
    type Error = PortfolioError;

    fn try_from(entries: Vec<(String, Decimal)>) -> Result<Self, Self::Error> {
        let mut holdings = Self::new();
        for (ticker, value) in entries {
            holdings.insert(ticker, value)?;
        }
        Ok(holdings)
    }
}

impl TryFrom<BTreeMap<String, Decimal>> for Holdings {
    type Error = PortfolioError;

    fn try_from(entries: BTreeMap<String, Decimal>) -> Result<Self, Self::Error> {
        let mut holdings = Self::new();
        for (ticker, value) in entries {
            holdings.insert(ticker, value)?;
        }
        Ok(holdings)
    }
}

impl From<Holdings> for BTreeMap<String, Decimal> {
    fn from(holdings: Holdings) -> Self {
        holdings.invested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_total_and_lookup() {
        let holdings = Holdings::new()
            .with("NTN-B 2035-05", dec!(600_000))
            .unwrap()
            .with("NTN-B 2050-08", dec!(400_000))
            .unwrap();

        assert_eq!(holdings.total(), dec!(1_000_000));
        assert_eq!(holdings.invested_value("NTN-B 2035-05"), dec!(600_000));
        assert_eq!(holdings.invested_value("NTN-B 2026-08"), Decimal::ZERO);
        assert_eq!(holdings.len(), 2);
    }

    #[test]
    fn test_insert_replaces() {
        let mut holdings = Holdings::new();
        holdings.insert("NTN-B 2030-08", dec!(100)).unwrap();
        holdings.insert("NTN-B 2030-08", dec!(250)).unwrap();
        assert_eq!(holdings.total(), dec!(250));
    }

    #[test]
    fn test_rejects_negative() {
        let err = Holdings::new().with("NTN-B 2030-08", dec!(-1)).unwrap_err();
        assert!(matches!(err, PortfolioError::InvalidHolding { .. }));
    }

    #[test]
    fn test_rejects_blank_ticker() {
        assert!(Holdings::new().with("  ", dec!(1)).is_err());
    }

    #[test]
    fn test_empty_total_is_zero() {
        assert_eq!(Holdings::new().total(), Decimal::ZERO);
        assert!(Holdings::new().is_empty());
    }

    #[test]
    fn test_try_from_entries() {
        let holdings = Holdings::try_from(vec![
            ("NTN-B 2026-08".to_string(), dec!(10)),
            ("NTN-B 2028-08".to_string(), dec!(20)),
        ])
        .unwrap();
        let tickers: Vec<&str> = holdings.tickers().collect();
        assert_eq!(tickers, vec!["NTN-B 2026-08", "NTN-B 2028-08"]);
    }

    #[test]
    fn test_add_accumulates() {
        let mut holdings = Holdings::new();
        holdings.add("NTN-B 2030-08", dec!(100)).unwrap();
        holdings.add("NTN-B 2030-08", dec!(50)).unwrap();
        assert_eq!(holdings.invested_value("NTN-B 2030-08"), dec!(150));

        let err = holdings.add("NTN-B 2030-08", dec!(-40)).unwrap_err();
        assert!(matches!(err, PortfolioError::InvalidHolding { .. }));
        assert_eq!(holdings.invested_value("NTN-B 2030-08"), dec!(150));
    }

    #[test]
    fn test_total_overflow_rejected() {
        let mut holdings = Holdings::new().with("NTN-B 2035-05", Decimal::MAX).unwrap();

        assert!(holdings.add("NTN-B 2035-05", dec!(1)).is_err());
        assert!(holdings.insert("NTN-B 2050-08", dec!(1)).is_err());
        // replacing the only entry does not count it twice
        holdings.insert("NTN-B 2035-05", dec!(5)).unwrap();
        assert_eq!(holdings.total(), dec!(5));
    }

    #[test]
    fn test_deserialize_validates() {
        let err = serde_json::from_str::<Holdings>(
            r#"{"NTN-B 2035-05": -500, "NTN-B 2050-08": 1000}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("negative invested value"));

        assert!(serde_json::from_str::<Holdings>(r#"{" ": 10}"#).is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let holdings = Holdings::new().with("NTN-B 2035-05", dec!(1.5)).unwrap();
        let json = serde_json::to_string(&holdings).unwrap();
        let parsed: Holdings = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, holdings);
        assert!(json.starts_with('{'));
    }
}
