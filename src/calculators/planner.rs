//! Goal-based financial plan: inflate each goal, then size the monthly saving

use log::debug;
use serde::Serialize;

use crate::error::ValidationError;
use crate::metrics::{evaluate_goal, FinancialGoal, GoalFunding};
use crate::params::{check_years, ProjectionParameters};
use crate::projection::{required_monthly_contribution, ProjectionEngine};
use crate::strategy::{AssetMix, RateRule, RiskProfile};

/// Saving plan for one goal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalPlan {
    pub goal: FinancialGoal,
    /// Target in the money of the goal year
    pub future_target: f64,
    pub required_monthly: f64,
    /// Check of the plan against the engine
    pub funding: GoalFunding,
}

/// Plan for several goals under one risk profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FinancialPlan {
    pub profile: RiskProfile,
    pub asset_mix: AssetMix,
    pub annual_return_percent: f64,
    pub inflation_rate_percent: f64,
    pub goals: Vec<GoalPlan>,
    pub total_required_monthly: f64,
}

/// Size a separate monthly saving for each goal
///
/// Goal amounts are quoted in today's money and grown by inflation to the
/// goal year; each goal is funded independently at the profile's return.
/// Every goal year must lie within the engine's horizon bounds.
pub fn plan_goals(
    engine: &ProjectionEngine,
    goals: &[FinancialGoal],
    profile: RiskProfile,
    inflation_rate_percent: f64,
) -> Result<FinancialPlan, ValidationError> {
    let bounds = &engine.config().bounds;
    for goal in goals {
        check_years("target_year", goal.target_year, bounds)?;
    }

    let rule = RateRule::Profile(profile);
    let plans: Vec<GoalPlan> = goals
        .iter()
        .map(|goal| {
            let future = goal.inflated(inflation_rate_percent);
            let params = ProjectionParameters::new(0.0, 0.0, goal.target_year, 0.0).with_rate_rule(rule);
            let monthly = required_monthly_contribution(
                future.target_amount,
                goal.target_year,
                params.annual_rate_percent,
                0.0,
            );
            let params = ProjectionParameters {
                periodic_contribution: monthly * 12.0,
                ..params
            };
            let funding = evaluate_goal(&engine.project(&params), &future);
            debug!(
                "goal {}: {:.0} in year {} needs {:.2}/month",
                goal.name, future.target_amount, goal.target_year, monthly
            );
            GoalPlan {
                goal: goal.clone(),
                future_target: future.target_amount,
                required_monthly: monthly,
                funding,
            }
        })
        .collect();

    Ok(FinancialPlan {
        profile,
        asset_mix: profile.asset_mix(),
        annual_return_percent: rule.annual_rate_percent(),
        inflation_rate_percent,
        total_required_monthly: plans.iter().map(|p| p.required_monthly).sum(),
        goals: plans,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_funds_every_goal() {
        let goals = vec![
            FinancialGoal::new("Education", 2_000_000.0, 12),
            FinancialGoal::new("Car", 800_000.0, 4),
        ];
        let plan = plan_goals(&ProjectionEngine::default(), &goals, RiskProfile::Moderate, 6.0).unwrap();

        assert_eq!(plan.goals.len(), 2);
        assert_eq!(plan.annual_return_percent, 10.0);
        assert_eq!(plan.asset_mix.equity_percent, 50.0);
        for g in &plan.goals {
            assert!(g.future_target > g.goal.target_amount);
            assert!(g.funding.funding_percentage > 99.99, "{} underfunded", g.goal.name);
        }
        let total: f64 = plan.goals.iter().map(|g| g.required_monthly).sum();
        assert!((plan.total_required_monthly - total).abs() < 1e-9);
    }

    #[test]
    fn test_aggressive_needs_less() {
        let goals = vec![FinancialGoal::new("Retire", 10_000_000.0, 20)];
        let engine = ProjectionEngine::default();
        let cautious = plan_goals(&engine, &goals, RiskProfile::Conservative, 6.0).unwrap();
        let bold = plan_goals(&engine, &goals, RiskProfile::Aggressive, 6.0).unwrap();
        assert!(bold.total_required_monthly < cautious.total_required_monthly);
    }

    #[test]
    fn test_goal_years_outside_horizon_rejected() {
        let engine = ProjectionEngine::default();
        for year in [0, 51, 400_000_000] {
            let goals = vec![
                FinancialGoal::new("Car", 800_000.0, 4),
                FinancialGoal::new("Someday", 1_000.0, year),
            ];
            assert!(
                matches!(
                    plan_goals(&engine, &goals, RiskProfile::Moderate, 6.0),
                    Err(ValidationError::OutOfRange { field: "target_year", .. })
                ),
                "year {}",
                year
            );
        }
    }
}
