//! Projection inputs

use serde::{Deserialize, Serialize};

use crate::strategy::{RateRule, StrategyKind, StrategyParams};

/// Direction of a scheduled cash event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Lump sum added after the year's growth
    Contribution,
    /// Amount taken from the opening balance before the year's growth
    Withdrawal,
}

/// One-off contribution or withdrawal in a given projection year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEvent {
    /// Projection year the event applies to (1-indexed)
    pub year_offset: u32,

    /// Amount, always non-negative; direction comes from `kind`
    pub amount: f64,

    pub kind: EventKind,
}

impl ScheduledEvent {
    pub fn contribution(year_offset: u32, amount: f64) -> Self {
        Self {
            year_offset,
            amount,
            kind: EventKind::Contribution,
        }
    }

    pub fn withdrawal(year_offset: u32, amount: f64) -> Self {
        Self {
            year_offset,
            amount,
            kind: EventKind::Withdrawal,
        }
    }
}

/// Years simulated beyond the base horizon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Extension {
    pub years: u32,

    /// Keep contributing during the extension; otherwise the balance only compounds
    pub with_contributions: bool,
}

impl Default for Extension {
    fn default() -> Self {
        Self {
            years: 0,
            with_contributions: true,
        }
    }
}

/// Immutable input to a single projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionParameters {
    /// Balance at the start of year 1
    pub initial_principal: f64,

    /// Year-1 contribution; later years follow the strategy
    pub periodic_contribution: f64,

    /// Base number of simulated years
    pub horizon_years: u32,

    /// Nominal annual growth rate in percent
    pub annual_rate_percent: f64,

    /// When set, records carry an inflation-adjusted balance
    #[serde(default)]
    pub inflation_rate_percent: Option<f64>,

    #[serde(default = "default_strategy")]
    pub strategy: StrategyKind,

    #[serde(default)]
    pub strategy_params: StrategyParams,

    /// Events in any order; the engine matches them by year
    #[serde(default)]
    pub scheduled_events: Vec<ScheduledEvent>,

    /// Age during year 1, used to label records
    #[serde(default)]
    pub start_age: Option<u32>,

    #[serde(default)]
    pub extension: Extension,
}

fn default_strategy() -> StrategyKind {
    StrategyKind::Fixed
}

impl ProjectionParameters {
    /// Fixed-strategy parameters with no events, inflation, or extension
    pub fn new(
        initial_principal: f64,
        periodic_contribution: f64,
        horizon_years: u32,
        annual_rate_percent: f64,
    ) -> Self {
        Self {
            initial_principal,
            periodic_contribution,
            horizon_years,
            annual_rate_percent,
            inflation_rate_percent: None,
            strategy: StrategyKind::Fixed,
            strategy_params: StrategyParams::default(),
            scheduled_events: Vec::new(),
            start_age: None,
            extension: Extension::default(),
        }
    }

    pub fn with_strategy(mut self, strategy: StrategyKind, params: StrategyParams) -> Self {
        self.strategy = strategy;
        self.strategy_params = params;
        self
    }

    pub fn with_rate_rule(mut self, rule: RateRule) -> Self {
        self.annual_rate_percent = rule.annual_rate_percent();
        self
    }

    pub fn with_inflation(mut self, rate_percent: f64) -> Self {
        self.inflation_rate_percent = Some(rate_percent);
        self
    }

    pub fn with_event(mut self, event: ScheduledEvent) -> Self {
        self.scheduled_events.push(event);
        self
    }

    pub fn with_start_age(mut self, age: u32) -> Self {
        self.start_age = Some(age);
        self
    }

    pub fn with_extension(mut self, years: u32, with_contributions: bool) -> Self {
        self.extension = Extension {
            years,
            with_contributions,
        };
        self
    }

    /// Base horizon plus extension
    pub fn total_years(&self) -> u32 {
        self.horizon_years.saturating_add(self.extension.years)
    }

    /// Sum of events of `kind` scheduled for `year`
    pub fn event_total(&self, year: u32, kind: EventKind) -> f64 {
        self.scheduled_events
            .iter()
            .filter(|e| e.year_offset == year && e.kind == kind)
            .map(|e| e.amount)
            .sum()
    }
}

/// Named parameter set, one per row of a scenarios file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub params: ProjectionParameters,
}
