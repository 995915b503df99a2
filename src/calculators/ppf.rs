//! Public Provident Fund calculator
//!
//! Statutory 15-year lock-in with optional 5-year extension blocks. Deposits
//! are bounded to 500..=150000 per year, and no strategy may push a later
//! year above the upper bound.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::params::{validate, InputBounds, ProjectionParameters};
use crate::projection::{ProjectionEngine, ProjectionResult};
use crate::strategy::{StrategyKind, StrategyParams};

pub const PPF_RATE_PERCENT: f64 = 7.1;
pub const PPF_MIN_DEPOSIT: f64 = 500.0;
pub const PPF_MAX_DEPOSIT: f64 = 150_000.0;
pub const PPF_LOCK_IN_YEARS: u32 = 15;
pub const PPF_EXTENSION_BLOCK_YEARS: u32 = 5;
pub const PPF_MAX_EXTENSION_YEARS: u32 = 50;

/// User choices for a PPF account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PpfPlan {
    pub annual_deposit: f64,
    pub rate_percent: f64,
    pub strategy: StrategyKind,
    pub increase_rate_percent: f64,
    /// Whole 5-year blocks, at most 50 years
    pub extension_years: u32,
    pub extension_with_contributions: bool,
    pub start_age: Option<u32>,
    pub inflation_rate_percent: Option<f64>,
}

/// Outcome at the end of the plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PpfMaturity {
    pub maturity_year: u32,
    pub maturity_amount: f64,
    pub total_invested: f64,
    pub interest_earned: f64,
    /// PPF interest and maturity proceeds are exempt from income tax
    pub tax_free: bool,
    pub projection: ProjectionResult,
}

impl PpfPlan {
    /// Fixed deposit of `annual_deposit` at the current rate, no extension
    pub fn new(annual_deposit: f64) -> Self {
        Self {
            annual_deposit,
            rate_percent: PPF_RATE_PERCENT,
            strategy: StrategyKind::Fixed,
            increase_rate_percent: 0.0,
            extension_years: 0,
            extension_with_contributions: true,
            start_age: None,
            inflation_rate_percent: None,
        }
    }

    pub fn with_strategy(mut self, strategy: StrategyKind, increase_rate_percent: f64) -> Self {
        self.strategy = strategy;
        self.increase_rate_percent = increase_rate_percent;
        self
    }

    pub fn with_extension(mut self, years: u32, with_contributions: bool) -> Self {
        self.extension_years = years;
        self.extension_with_contributions = with_contributions;
        self
    }

    /// Ranges accepted for a PPF account
    pub fn bounds() -> InputBounds {
        InputBounds {
            contribution_min: PPF_MIN_DEPOSIT,
            contribution_max: PPF_MAX_DEPOSIT,
            rate_min: 0.0,
            rate_max: 15.0,
            horizon_min: PPF_LOCK_IN_YEARS,
            horizon_max: PPF_LOCK_IN_YEARS,
            extension_max: PPF_MAX_EXTENSION_YEARS,
            ..Default::default()
        }
    }

    pub fn parameters(&self) -> ProjectionParameters {
        let mut params = ProjectionParameters::new(
            0.0,
            self.annual_deposit,
            PPF_LOCK_IN_YEARS,
            self.rate_percent,
        )
        .with_strategy(
            self.strategy,
            StrategyParams {
                increase_rate_percent: self.increase_rate_percent,
                yearly_cap: Some(PPF_MAX_DEPOSIT),
            },
        )
        .with_extension(self.extension_years, self.extension_with_contributions);
        params.start_age = self.start_age;
        params.inflation_rate_percent = self.inflation_rate_percent;
        params
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.extension_years % PPF_EXTENSION_BLOCK_YEARS != 0 {
            return Err(ValidationError::ExtensionBlock {
                years: self.extension_years,
                block: PPF_EXTENSION_BLOCK_YEARS,
            });
        }
        validate(&self.parameters(), &Self::bounds())
    }

    pub fn projection(&self, engine: &ProjectionEngine) -> Result<ProjectionResult, ValidationError> {
        self.validate()?;
        Ok(engine.project(&self.parameters()))
    }

    pub fn maturity(&self, engine: &ProjectionEngine) -> Result<PpfMaturity, ValidationError> {
        let projection = self.projection(engine)?;
        let summary = &projection.summary;
        Ok(PpfMaturity {
            maturity_year: summary.years,
            maturity_amount: summary.final_balance,
            total_invested: summary.total_contributed,
            interest_earned: summary.total_interest,
            tax_free: true,
            projection,
        })
    }
}
