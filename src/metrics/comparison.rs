//! Comparison against alternative instruments at single fixed rates

use serde::{Deserialize, Serialize};

use crate::numeric::compound;
use crate::projection::ProjectionResult;

/// Checkpoint spacing for comparison tables, years
pub const COMPARISON_INTERVAL_YEARS: u32 = 5;

/// Alternative instrument with a fixed nominal annual rate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    pub label: String,
    pub annual_rate_percent: f64,
}

impl Instrument {
    pub fn new(label: impl Into<String>, annual_rate_percent: f64) -> Self {
        Self {
            label: label.into(),
            annual_rate_percent,
        }
    }

    /// Fixed deposit, diversified fund, and equity index at typical rates
    pub fn defaults() -> Vec<Instrument> {
        vec![
            Instrument::new("Fixed Deposit", 6.5),
            Instrument::new("Diversified Mutual Fund", 10.0),
            Instrument::new("Equity Index", 12.0),
        ]
    }
}

/// One instrument's value at a checkpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeValue {
    pub label: String,
    pub value: f64,
    /// Projection balance minus this value
    pub difference: f64,
}

/// Projection versus alternatives at one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonPoint {
    pub year: u32,
    pub projected_balance: f64,
    pub contributed: f64,
    pub alternatives: Vec<AlternativeValue>,
}

/// Compare the projection against `instruments` every 5 years and at the final year
///
/// Each alternative compounds the amount contributed by that checkpoint at
/// its own single annual rate for the elapsed years, ignoring the engine's
/// monthly timing and strategy.
pub fn compare(result: &ProjectionResult, instruments: &[Instrument]) -> Vec<ComparisonPoint> {
    result
        .checkpoints(COMPARISON_INTERVAL_YEARS)
        .into_iter()
        .map(|record| {
            let alternatives = instruments
                .iter()
                .map(|instrument| {
                    let value = compound(
                        record.cumulative_contributed,
                        instrument.annual_rate_percent,
                        record.year,
                    );
                    AlternativeValue {
                        label: instrument.label.clone(),
                        value,
                        difference: record.ending_balance - value,
                    }
                })
                .collect();

            ComparisonPoint {
                year: record.year,
                projected_balance: record.ending_balance,
                contributed: record.cumulative_contributed,
                alternatives,
            }
        })
        .collect()
}
