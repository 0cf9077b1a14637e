//! CLI configuration.
//!
//! Loaded from a TOML file; every section and key is optional.
//!
//! ```toml
//! [optimizer]
//! issue_type = "NTN-B"
//! long_anchors = ["2035-05-15", "2050-08-15"]
//!
//! [output]
//! precision = 4
//! color = true
//! ```

use std::path::{Path, PathBuf};

use imab_portfolio::OptimizerConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Decimal places for durations, DV01 and weights.
    pub precision: usize,

    /// Colored headers and notes.
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            precision: 4,
            color: true,
        }
    }
}

/// Effective CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Replication settings.
    pub optimizer: OptimizerConfig,

    /// Presentation settings.
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
        config.optimizer.validate()?;
        Ok(config)
    }

    /// Loads the explicit file, else the user config file if present, else
    /// defaults.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        if let Some(path) = explicit {
            debug!(path = %path.display(), "loading configuration");
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!(path = %path.display(), "loading user configuration");
                Self::from_file(&path)
            }
            _ => {
                debug!("using default configuration");
                Ok(Self::default())
            }
        }
    }

    /// User config file location (`<config dir>/imab/config.toml`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir()
            .or_else(dirs::home_dir)
            .map(|dir| dir.join("imab").join("config.toml"))
    }

    /// Serializes to TOML.
    pub fn to_toml(&self) -> CliResult<String> {
        toml::to_string_pretty(self).map_err(|e| CliError::Serialization(e.to_string()))
    }
}
