//! IMA-B index family selection.

use crate::error::PortfolioError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The IMA-B index whose constituents form the index view.
///
/// Serialized with the lowercase codes used by the constituent files
/// (`imab5`, `imab`, `imab5+`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum IndexSelection {
    /// IMA-B 5: NTN-B bonds maturing within five years.
    #[serde(rename = "imab5")]
    Imab5,

    /// IMA-B: all NTN-B bonds.
    #[default]
    #[serde(rename = "imab")]
    Imab,

    /// IMA-B 5+: NTN-B bonds maturing in five years or more.
    #[serde(rename = "imab5+")]
    Imab5Plus,
}

impl IndexSelection {
    /// Returns the display name used in reports.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Imab5 => "IMA-B 5",
            Self::Imab => "IMA-B",
            Self::Imab5Plus => "IMA-B 5+",
        }
    }

    /// Returns the code used by constituent files.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Imab5 => "imab5",
            Self::Imab => "imab",
            Self::Imab5Plus => "imab5+",
        }
    }

    /// Returns all selections in display order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        &[Self::Imab5, Self::Imab, Self::Imab5Plus]
    }
}

impl std::fmt::Display for IndexSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for IndexSelection {
    type Err = PortfolioError;

    /// Accepts either the file code or the display name, ignoring case,
    /// spaces, dashes and underscores (`imab5+`, `IMA-B 5+`, `ima_b_5+`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();

        match normalized.as_str() {
            "imab5" => Ok(Self::Imab5),
            "imab" => Ok(Self::Imab),
            "imab5+" | "imab5plus" => Ok(Self::Imab5Plus),
            _ => Err(PortfolioError::UnknownIndex {
                name: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_codes_and_names() {
        assert_eq!("imab5".parse::<IndexSelection>().unwrap(), IndexSelection::Imab5);
        assert_eq!("IMA-B 5".parse::<IndexSelection>().unwrap(), IndexSelection::Imab5);
        assert_eq!("IMA-B".parse::<IndexSelection>().unwrap(), IndexSelection::Imab);
        assert_eq!("imab5+".parse::<IndexSelection>().unwrap(), IndexSelection::Imab5Plus);
        assert_eq!("IMA-B 5+".parse::<IndexSelection>().unwrap(), IndexSelection::Imab5Plus);
        assert_eq!("imab5plus".parse::<IndexSelection>().unwrap(), IndexSelection::Imab5Plus);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "IDKA 2".parse::<IndexSelection>().unwrap_err();
        assert!(matches!(err, PortfolioError::UnknownIndex { .. }));
    }

    #[test]
    fn test_name_and_code_round_trip() {
        for selection in IndexSelection::all() {
            assert_eq!(selection.name().parse::<IndexSelection>().unwrap(), *selection);
            assert_eq!(selection.code().parse::<IndexSelection>().unwrap(), *selection);
        }
    }

    #[test]
    fn test_serde_uses_codes() {
        let json = serde_json::to_string(&IndexSelection::Imab5Plus).unwrap();
        assert_eq!(json, "\"imab5+\"");
        let parsed: IndexSelection = serde_json::from_str("\"imab5\"").unwrap();
        assert_eq!(parsed, IndexSelection::Imab5);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", IndexSelection::Imab5Plus), "IMA-B 5+");
    }
}
