//! Planner configuration
//!
//! Every field has a default, so a partial JSON file (or none at all) is a
//! valid configuration.

use std::path::{Path, PathBuf};

use log::info;
use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::format::CurrencyFormat;
use crate::metrics::Instrument;
use crate::params::InputBounds;
use crate::projection::{ProjectionConfig, ProjectionEngine};

/// Environment variable naming a JSON config file
pub const CONFIG_ENV_VAR: &str = "WEALTH_PROJECTION_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Ranges enforced before projecting user input
    pub bounds: InputBounds,

    /// Alternatives shown in the comparison table
    pub instruments: Vec<Instrument>,

    /// Used when a calculator is not given an inflation rate, percent
    pub inflation_rate_percent: f64,

    /// Directory holding the budget store files
    pub storage_dir: PathBuf,

    pub currency: CurrencyFormat,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            bounds: InputBounds::default(),
            instruments: Instrument::defaults(),
            inflation_rate_percent: 6.0,
            storage_dir: PathBuf::from("budget_data"),
            currency: CurrencyFormat::default(),
        }
    }
}

impl PlannerConfig {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let config = serde_json::from_str(&contents)?;
        info!("loaded config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], or defaults when unset
    pub fn from_env() -> Result<Self, LoadError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    pub fn projection_config(&self) -> ProjectionConfig {
        ProjectionConfig { bounds: self.bounds }
    }

    pub fn engine(&self) -> ProjectionEngine {
        ProjectionEngine::new(self.projection_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Grouping;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r#"{ "inflation_rate_percent": 4.5, "bounds": { "horizon_max": 40 } }"#;
        let config: PlannerConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.inflation_rate_percent, 4.5);
        assert_eq!(config.bounds.horizon_max, 40);
        assert_eq!(config.bounds.horizon_min, 1);
        assert_eq!(config.instruments.len(), 3);
        assert_eq!(config.currency.grouping, Grouping::Indian);
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{ "currency": {{ "symbol": "$", "grouping": "western" }} }}"#).unwrap();

        let config = PlannerConfig::from_path(file.path()).unwrap();
        assert_eq!(config.currency.format(1_500_000.0), "$1,500,000");
        assert_eq!(config.engine().config().bounds, InputBounds::default());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(PlannerConfig::from_path("/nonexistent/planner.json").is_err());
    }
}
