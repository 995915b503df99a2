//! Range checks applied before a projection is attempted

use serde::{Deserialize, Serialize};

use super::ProjectionParameters;
use crate::error::ValidationError;

/// Accepted ranges for user-entered projection inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputBounds {
    /// Year-1 contribution range
    pub contribution_min: f64,
    pub contribution_max: f64,

    /// Annual growth rate range, percent
    pub rate_min: f64,
    pub rate_max: f64,

    /// Inflation rate range, percent
    pub inflation_min: f64,
    pub inflation_max: f64,

    /// Base horizon range, years
    pub horizon_min: u32,
    pub horizon_max: u32,

    /// Longest extension beyond the base horizon, years
    pub extension_max: u32,

    /// Step-up range for the increasing strategies, percent
    pub increase_rate_max: f64,
}

impl Default for InputBounds {
    fn default() -> Self {
        Self {
            contribution_min: 0.0,
            contribution_max: 10_000_000.0,
            rate_min: 0.0,
            rate_max: 30.0,
            inflation_min: 0.0,
            inflation_max: 20.0,
            horizon_min: 1,
            horizon_max: 50,
            extension_max: 50,
            increase_rate_max: 100.0,
        }
    }
}

fn check_range(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), ValidationError> {
    // NaN fails both comparisons and lands here too
    if !(value >= min && value <= max) {
        return Err(ValidationError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Check a year count against the horizon bounds
pub fn check_years(field: &'static str, years: u32, bounds: &InputBounds) -> Result<(), ValidationError> {
    check_range(
        field,
        years as f64,
        bounds.horizon_min as f64,
        bounds.horizon_max as f64,
    )
}

/// Reject parameters the engine should never be invoked with
pub fn validate(params: &ProjectionParameters, bounds: &InputBounds) -> Result<(), ValidationError> {
    if !(params.initial_principal >= 0.0) {
        return Err(ValidationError::Negative {
            field: "initial_principal",
            value: params.initial_principal,
        });
    }

    check_range(
        "periodic_contribution",
        params.periodic_contribution,
        bounds.contribution_min,
        bounds.contribution_max,
    )?;
    check_range(
        "annual_rate_percent",
        params.annual_rate_percent,
        bounds.rate_min,
        bounds.rate_max,
    )?;
    check_years("horizon_years", params.horizon_years, bounds)?;
    check_range(
        "extension_years",
        params.extension.years as f64,
        0.0,
        bounds.extension_max as f64,
    )?;

    if let Some(inflation) = params.inflation_rate_percent {
        check_range(
            "inflation_rate_percent",
            inflation,
            bounds.inflation_min,
            bounds.inflation_max,
        )?;
    }

    check_range(
        "increase_rate_percent",
        params.strategy_params.increase_rate_percent,
        0.0,
        bounds.increase_rate_max,
    )?;

    if let Some(cap) = params.strategy_params.yearly_cap {
        if cap < params.periodic_contribution {
            return Err(ValidationError::CapBelowBase {
                cap,
                base: params.periodic_contribution,
            });
        }
    }

    let last_year = params.total_years();
    for event in &params.scheduled_events {
        if !(event.amount >= 0.0) {
            return Err(ValidationError::Negative {
                field: "scheduled_event.amount",
                value: event.amount,
            });
        }
        if event.year_offset == 0 || event.year_offset > last_year {
            return Err(ValidationError::EventOutOfRange {
                year: event.year_offset,
                last_year,
            });
        }
    }

    Ok(())
}
