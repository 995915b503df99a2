//! Running state carried between simulated years

use crate::params::ProjectionParameters;

/// Balances and counters at a point in the projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection year (1-indexed, 0 before the first year)
    pub year: u32,

    /// Running balance; may go negative after an oversized withdrawal
    pub balance: f64,

    /// Principal plus every periodic and lump-sum contribution so far
    pub cumulative_contributed: f64,

    /// Growth credited so far
    pub cumulative_interest: f64,

    /// Scheduled withdrawals taken so far
    pub cumulative_withdrawn: f64,

    /// Last contribution produced by the strategy, seed for the next year
    pub previous_contribution: f64,
}

impl ProjectionState {
    /// State before year 1
    pub fn from_params(params: &ProjectionParameters) -> Self {
        Self {
            year: 0,
            balance: params.initial_principal,
            cumulative_contributed: params.initial_principal,
            cumulative_interest: 0.0,
            cumulative_withdrawn: 0.0,
            previous_contribution: params.periodic_contribution,
        }
    }

    /// Advance to the next year
    pub fn advance_year(&mut self) {
        self.year += 1;
    }

    /// Whether the current year lies past the base horizon
    pub fn in_extension(&self, params: &ProjectionParameters) -> bool {
        self.year > params.horizon_years
    }
}
