//! Explicit input of one computation cycle.

use super::{Holdings, IndexSelection};
use crate::error::PortfolioResult;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Index selection plus invested values, passed by value through the pipeline.
///
/// Every user interaction builds a fresh request; nothing is carried between
/// computations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizationRequest {
    /// Index whose constituents form the view.
    pub index_selection: IndexSelection,

    /// Invested value per ticker.
    #[serde(default)]
    pub invested_values: Holdings,
}

impl OptimizationRequest {
    /// Creates a request with no investments.
    #[must_use]
    pub fn new(index_selection: IndexSelection) -> Self {
        Self {
            index_selection,
            invested_values: Holdings::new(),
        }
    }

    /// Replaces the invested values.
    #[must_use]
    pub fn with_holdings(mut self, holdings: Holdings) -> Self {
        self.invested_values = holdings;
        self
    }

    /// Adds one invested value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is negative or the ticker blank.
    pub fn with_investment(
        mut self,
        ticker: impl Into<String>,
        value: Decimal,
    ) -> PortfolioResult<Self> {
        self.invested_values.insert(ticker, value)?;
        Ok(self)
    }

    /// Sum of invested values.
    #[must_use]
    pub fn invested_total(&self) -> Decimal {
        self.invested_values.total()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_builder() {
        let request = OptimizationRequest::new(IndexSelection::Imab5Plus)
            .with_investment("NTN-B 2035-05", dec!(1_000))
            .unwrap()
            .with_investment("NTN-B 2050-08", dec!(500))
            .unwrap();

        assert_eq!(request.index_selection, IndexSelection::Imab5Plus);
        assert_eq!(request.invested_total(), dec!(1_500));
    }

    #[test]
    fn test_default_is_empty_imab() {
        let request = OptimizationRequest::default();
        assert_eq!(request.index_selection, IndexSelection::Imab);
        assert_eq!(request.invested_total(), Decimal::ZERO);
    }

    #[test]
    fn test_deserialize_without_holdings() {
        let request: OptimizationRequest =
            serde_json::from_str(r#"{"index_selection": "imab5"}"#).unwrap();
        assert_eq!(request.index_selection, IndexSelection::Imab5);
        assert!(request.invested_values.is_empty());
    }

    #[test]
    fn test_deserialize_rejects_negative_investment() {
        let json = r#"{
            "index_selection": "imab",
            "invested_values": {"NTN-B 2035-05": "-500", "NTN-B 2050-08": "1000"}
        }"#;
        let err = serde_json::from_str::<OptimizationRequest>(json).unwrap_err();
        assert!(err.to_string().contains("negative invested value"));
    }
}
