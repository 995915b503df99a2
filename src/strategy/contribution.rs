//! Year-over-year contribution rules

use serde::{Deserialize, Serialize};

/// Rule governing how the periodic contribution changes from year to year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// Same contribution every year
    Fixed,
    /// Step-up by `increase_rate_percent` each year
    Increasing,
    /// Step-up of 15% plus one point per elapsed year
    Aggressive,
    /// Step-up with an extra 10% boost every 5th year
    Moderate,
    /// Half-rate step-up with a 5% dip every 7th year
    Conservative,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 5] = [
        StrategyKind::Fixed,
        StrategyKind::Increasing,
        StrategyKind::Aggressive,
        StrategyKind::Moderate,
        StrategyKind::Conservative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StrategyKind::Fixed => "fixed",
            StrategyKind::Increasing => "increasing",
            StrategyKind::Aggressive => "aggressive",
            StrategyKind::Moderate => "moderate",
            StrategyKind::Conservative => "conservative",
        }
    }

    /// Parse the lowercase name used in CSV and JSON inputs
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name.trim()))
    }
}

/// Tunables shared by the step-up strategies
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyParams {
    /// Annual step-up in percent (used by increasing, moderate, conservative)
    pub increase_rate_percent: f64,

    /// Upper bound on any single year's contribution
    pub yearly_cap: Option<f64>,
}

impl Default for StrategyParams {
    fn default() -> Self {
        Self {
            increase_rate_percent: 10.0,
            yearly_cap: None,
        }
    }
}

impl StrategyParams {
    fn cap(&self, amount: f64) -> f64 {
        match self.yearly_cap {
            Some(cap) => amount.min(cap),
            None => amount,
        }
    }
}

/// Contribution for `year` given the previous year's contribution
///
/// Year 1 (and anything before it) always returns `base`. The result is
/// clamped to the yearly cap when one is set and never negative.
pub fn resolve_contribution(
    strategy: StrategyKind,
    year: u32,
    previous: f64,
    base: f64,
    params: &StrategyParams,
) -> f64 {
    if year <= 1 {
        return base;
    }

    let step = params.increase_rate_percent / 100.0;

    let amount = match strategy {
        StrategyKind::Fixed => params.cap(base),
        StrategyKind::Increasing => params.cap(previous * (1.0 + step)),
        StrategyKind::Aggressive => {
            params.cap(previous * (1.0 + 0.15 + 0.01 * year as f64))
        }
        StrategyKind::Moderate => {
            let mut next = previous * (1.0 + step);
            if year % 5 == 0 {
                next *= 1.10;
            }
            params.cap(next)
        }
        StrategyKind::Conservative => {
            if year % 7 == 0 {
                // Dip year: floored at the base, never above the prior year
                params.cap((previous * 0.95).max(base))
            } else {
                params.cap(previous * (1.0 + step / 2.0))
            }
        }
    };

    amount.max(0.0)
}

/// Contributions for years 1..=years, threading each year's result into the next
pub fn contribution_schedule(
    strategy: StrategyKind,
    base: f64,
    params: &StrategyParams,
    years: u32,
) -> Vec<f64> {
    let mut schedule = Vec::with_capacity(years as usize);
    let mut previous = base;
    for year in 1..=years {
        let amount = resolve_contribution(strategy, year, previous, base, params);
        schedule.push(amount);
        previous = amount;
    }
    schedule
}
