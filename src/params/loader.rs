//! Load scenarios from CSV and parameter sets from JSON

use csv::Reader;
use log::debug;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use super::{Extension, ProjectionParameters, Scenario};
use crate::error::LoadError;
use crate::strategy::{StrategyKind, StrategyParams};

/// Raw CSV row of a scenarios file
///
/// Empty cells map to `None` for the optional columns.
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    name: String,
    initial_principal: f64,
    periodic_contribution: f64,
    horizon_years: u32,
    annual_rate_percent: f64,
    #[serde(default)]
    inflation_rate_percent: Option<f64>,
    strategy: String,
    #[serde(default)]
    increase_rate_percent: Option<f64>,
    #[serde(default)]
    yearly_cap: Option<f64>,
    #[serde(default)]
    start_age: Option<u32>,
    #[serde(default)]
    extension_years: Option<u32>,
    #[serde(default)]
    extension_contributions: Option<bool>,
}

impl CsvRow {
    fn into_scenario(self, row: usize) -> Result<Scenario, LoadError> {
        let strategy = StrategyKind::parse(&self.strategy).ok_or_else(|| LoadError::UnknownVariant {
            row,
            field: "strategy",
            value: self.strategy.clone(),
        })?;

        let strategy_params = StrategyParams {
            increase_rate_percent: self
                .increase_rate_percent
                .unwrap_or(StrategyParams::default().increase_rate_percent),
            yearly_cap: self.yearly_cap,
        };

        let params = ProjectionParameters {
            initial_principal: self.initial_principal,
            periodic_contribution: self.periodic_contribution,
            horizon_years: self.horizon_years,
            annual_rate_percent: self.annual_rate_percent,
            inflation_rate_percent: self.inflation_rate_percent,
            strategy,
            strategy_params,
            scheduled_events: Vec::new(),
            start_age: self.start_age,
            extension: Extension {
                years: self.extension_years.unwrap_or(0),
                with_contributions: self.extension_contributions.unwrap_or(true),
            },
        };

        Ok(Scenario {
            name: self.name,
            params,
        })
    }
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>, LoadError> {
    let file = File::open(path.as_ref())?;
    let scenarios = load_scenarios_from_reader(file)?;
    debug!("loaded {} scenarios from {}", scenarios.len(), path.as_ref().display());
    Ok(scenarios)
}

/// Load scenarios from any reader (string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Scenario>, LoadError> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut scenarios = Vec::new();

    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        // 1-indexed data rows, header excluded
        scenarios.push(row.into_scenario(idx + 1)?);
    }

    Ok(scenarios)
}

/// Load a full parameter set, including scheduled events, from JSON
pub fn load_parameters_json<P: AsRef<Path>>(path: P) -> Result<ProjectionParameters, LoadError> {
    let file = File::open(path)?;
    let params = serde_json::from_reader(BufReader::new(file))?;
    Ok(params)
}
