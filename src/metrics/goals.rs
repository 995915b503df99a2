//! Goal funding against a projection

use serde::{Deserialize, Serialize};

use crate::numeric::{compound, ratio_or_zero};
use crate::projection::ProjectionResult;

/// Named target amount due at a projection year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialGoal {
    pub name: String,
    pub target_amount: f64,
    pub target_year: u32,
}

impl FinancialGoal {
    pub fn new(name: impl Into<String>, target_amount: f64, target_year: u32) -> Self {
        Self {
            name: name.into(),
            target_amount,
            target_year,
        }
    }

    /// Same goal with a target quoted in today's money grown by inflation
    pub fn inflated(&self, inflation_rate_percent: f64) -> Self {
        Self {
            target_amount: compound(self.target_amount, inflation_rate_percent, self.target_year),
            ..self.clone()
        }
    }
}

/// How well a projection funds a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalFunding {
    pub name: String,
    pub target_year: u32,
    pub target_amount: f64,
    pub projected_value: f64,
    /// Clamped to `[0, 100]`
    pub funding_percentage: f64,
    pub funded: bool,
    pub shortfall: f64,
}

/// `projected / target × 100` clamped to `[0, 100]`; 0 for a zero target
pub fn funding_percentage(projected: f64, target: f64) -> f64 {
    (ratio_or_zero(projected, target) * 100.0).clamp(0.0, 100.0)
}

/// Evaluate `goal` against the balance at its target year
///
/// Goals past the end of the projection use the final balance.
pub fn evaluate_goal(result: &ProjectionResult, goal: &FinancialGoal) -> GoalFunding {
    let projected = result.balance_at(goal.target_year);
    let percentage = funding_percentage(projected, goal.target_amount);

    GoalFunding {
        name: goal.name.clone(),
        target_year: goal.target_year,
        target_amount: goal.target_amount,
        projected_value: projected,
        funding_percentage: percentage,
        funded: percentage >= 100.0,
        shortfall: (goal.target_amount - projected).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ProjectionParameters;
    use crate::projection::project;

    #[test]
    fn test_funding_percentage_clamped() {
        assert_eq!(funding_percentage(5_000_000.0, 1_000.0), 100.0);
        assert_eq!(funding_percentage(-10.0, 1_000.0), 0.0);
        assert_eq!(funding_percentage(250.0, 1_000.0), 25.0);
        assert_eq!(funding_percentage(250.0, 0.0), 0.0);
    }

    #[test]
    fn test_evaluate_goal_shortfall() {
        // 1000 a month at zero growth keeps the arithmetic exact
        let result = project(&ProjectionParameters::new(0.0, 12_000.0, 10, 0.0));
        let goal = FinancialGoal::new("Car", 80_000.0, 5);
        let funding = evaluate_goal(&result, &goal);
        assert_eq!(funding.projected_value, 60_000.0);
        assert_eq!(funding.funding_percentage, 75.0);
        assert!(!funding.funded);
        assert_eq!(funding.shortfall, 20_000.0);
    }

    #[test]
    fn test_overfunded_goal() {
        let result = project(&ProjectionParameters::new(0.0, 12_000.0, 10, 0.0));
        let funding = evaluate_goal(&result, &FinancialGoal::new("Trip", 20_000.0, 8));
        assert_eq!(funding.funding_percentage, 100.0);
        assert!(funding.funded);
        assert_eq!(funding.shortfall, 0.0);
    }

    #[test]
    fn test_inflated_target() {
        let goal = FinancialGoal::new("Education", 1_000.0, 2).inflated(10.0);
        assert!((goal.target_amount - 1_210.0).abs() < 1e-9);
    }
}
