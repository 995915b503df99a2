//! Core projection engine: yearly loop with monthly compounding

use log::debug;

use super::records::{ProjectionResult, YearRecord};
use super::state::ProjectionState;
use crate::error::ValidationError;
use crate::numeric::{inflation_adjusted, monthly_rate, PERIODS_PER_YEAR};
use crate::params::{validate, EventKind, InputBounds, ProjectionParameters};
use crate::strategy::resolve_contribution;

/// Configuration for a projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionConfig {
    /// Ranges enforced by [`ProjectionEngine::project_validated`]
    pub bounds: InputBounds,
}

/// Stateless projection engine
///
/// Holds only configuration; every call to [`project`](Self::project) starts
/// from the parameters alone.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Validate against the configured bounds, then project
    pub fn project_validated(
        &self,
        params: &ProjectionParameters,
    ) -> Result<ProjectionResult, ValidationError> {
        validate(params, &self.config.bounds)?;
        Ok(self.project(params))
    }

    /// Run the projection
    ///
    /// Never fails. Inputs outside the validated ranges yield degenerate
    /// (flat or shrinking) sequences rather than errors.
    pub fn project(&self, params: &ProjectionParameters) -> ProjectionResult {
        let total_years = params.total_years();
        let mut records = Vec::with_capacity(total_years as usize);
        let mut state = ProjectionState::from_params(params);
        let rate = monthly_rate(params.annual_rate_percent);

        for _year in 1..=total_years {
            state.advance_year();
            let record = self.calculate_year(params, &mut state, rate);
            records.push(record);
        }

        let result = ProjectionResult::from_records(records, params.initial_principal);
        debug!(
            "projected {} years ({:?}): final balance {:.2}, contributed {:.2}",
            result.summary.years,
            params.strategy,
            result.summary.final_balance,
            result.summary.total_contributed
        );
        result
    }

    /// Simulate one year and update `state`
    fn calculate_year(
        &self,
        params: &ProjectionParameters,
        state: &mut ProjectionState,
        rate: f64,
    ) -> YearRecord {
        let mut record = YearRecord::new(state.year);
        record.age = params.start_age.map(|age| age + state.year - 1);
        record.is_extension = state.in_extension(params);
        record.opening_balance = state.balance;

        // Contribution for this year
        let contributing = !record.is_extension || params.extension.with_contributions;
        let contribution = if contributing {
            let amount = resolve_contribution(
                params.strategy,
                state.year,
                state.previous_contribution,
                params.periodic_contribution,
                &params.strategy_params,
            );
            state.previous_contribution = amount;
            amount
        } else {
            0.0
        };
        record.contribution = contribution;

        // Withdrawals come out of the opening balance; no floor at zero
        let withdrawn = params.event_total(state.year, EventKind::Withdrawal);
        state.balance -= withdrawn;
        record.withdrawn = withdrawn;

        // Monthly sub-steps: deposit the month's share, then grow
        let monthly_contribution = contribution / PERIODS_PER_YEAR as f64;
        let mut interest = 0.0;
        for _month in 0..PERIODS_PER_YEAR {
            state.balance += monthly_contribution;
            let growth = state.balance * rate;
            state.balance += growth;
            interest += growth;
        }
        record.interest_earned = interest;

        // Lump sums land after the year's growth
        let lump_sum = params.event_total(state.year, EventKind::Contribution);
        state.balance += lump_sum;
        record.lump_sum_contributed = lump_sum;

        state.cumulative_contributed += contribution + lump_sum;
        state.cumulative_interest += interest;
        state.cumulative_withdrawn += withdrawn;

        record.ending_balance = state.balance;
        record.cumulative_contributed = state.cumulative_contributed;
        record.cumulative_interest = state.cumulative_interest;
        record.inflation_adjusted_balance = params
            .inflation_rate_percent
            .map(|inflation| inflation_adjusted(state.balance, inflation, state.year));

        record
    }
}

/// Project with a default engine
pub fn project(params: &ProjectionParameters) -> ProjectionResult {
    ProjectionEngine::default().project(params)
}
