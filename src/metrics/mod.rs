//! Derived metrics computed from a finished projection
//!
//! Every ratio here guards its denominator: a zero expense figure, target, or
//! contribution total produces 0 rather than NaN or infinity.

mod comparison;
mod goals;
mod portfolio;

pub use comparison::{compare, AlternativeValue, ComparisonPoint, Instrument, COMPARISON_INTERVAL_YEARS};
pub use goals::{evaluate_goal, funding_percentage, FinancialGoal, GoalFunding};
pub use portfolio::{
    retirement_readiness, AssetAllocation, AssetKind, Portfolio, PortfolioYear, RetirementReadiness,
    EMERGENCY_LIQUIDITY_THRESHOLD, RETIREMENT_EXPENSE_MULTIPLE,
};

use serde::Serialize;

use crate::projection::ProjectionResult;

/// Inputs beyond the projection itself
#[derive(Debug, Clone, Default)]
pub struct MetricsContext<'a> {
    pub instruments: &'a [Instrument],
    pub goals: &'a [FinancialGoal],
    pub portfolio: Option<&'a Portfolio>,
    pub monthly_expenses: f64,
    /// Projection year treated as retirement; defaults to the final year
    pub retirement_year: Option<u32>,
}

/// Portfolio-level composites
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PortfolioMetrics {
    pub total_value: f64,
    pub weighted_risk_score: f64,
    pub weighted_liquidity_score: f64,
    pub emergency_fund_months: f64,
}

/// Everything derived from one projection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub comparisons: Vec<ComparisonPoint>,
    pub goals: Vec<GoalFunding>,
    pub portfolio: Option<PortfolioMetrics>,
    /// Projection balance at retirement plus any portfolio grown to the same year
    pub retirement: RetirementReadiness,
}

pub fn derive_metrics(result: &ProjectionResult, context: &MetricsContext<'_>) -> Metrics {
    let comparisons = compare(result, context.instruments);
    let goals = context
        .goals
        .iter()
        .map(|goal| evaluate_goal(result, goal))
        .collect();

    let portfolio = context.portfolio.map(|p| PortfolioMetrics {
        total_value: p.total_value(),
        weighted_risk_score: p.weighted_risk_score(),
        weighted_liquidity_score: p.weighted_liquidity_score(),
        emergency_fund_months: p.emergency_fund_months(context.monthly_expenses),
    });

    let retirement_year = context.retirement_year.unwrap_or(result.summary.years);
    let portfolio_corpus = context
        .portfolio
        .map(|p| p.projected_value(retirement_year))
        .unwrap_or(0.0);
    let retirement = retirement_readiness(
        result.balance_at(retirement_year) + portfolio_corpus,
        context.monthly_expenses,
    );

    Metrics {
        comparisons,
        goals,
        portfolio,
        retirement,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ProjectionParameters;
    use crate::projection::project;

    #[test]
    fn test_derive_metrics_zero_expenses() {
        let result = project(&ProjectionParameters::new(0.0, 100_000.0, 20, 10.0));
        let portfolio = Portfolio::new(vec![AssetAllocation::new(AssetKind::Cash, "Cash", 50_000.0)]);
        let instruments = Instrument::defaults();
        let context = MetricsContext {
            instruments: &instruments,
            portfolio: Some(&portfolio),
            monthly_expenses: 0.0,
            ..Default::default()
        };

        let metrics = derive_metrics(&result, &context);
        assert_eq!(metrics.comparisons.len(), 4);
        let p = metrics.portfolio.unwrap();
        assert_eq!(p.emergency_fund_months, 0.0);
        assert_eq!(metrics.retirement.funding_percentage, 0.0);
    }

    #[test]
    fn test_derive_metrics_goals_and_retirement() {
        let result = project(&ProjectionParameters::new(0.0, 12_000.0, 10, 0.0));
        let goals = vec![FinancialGoal::new("Home", 240_000.0, 10)];
        let context = MetricsContext {
            goals: &goals,
            monthly_expenses: 1_000.0,
            retirement_year: Some(10),
            ..Default::default()
        };

        let metrics = derive_metrics(&result, &context);
        assert_eq!(metrics.goals[0].funding_percentage, 50.0);
        assert!(metrics.portfolio.is_none());
        // 120000 against a 300000 target
        assert!((metrics.retirement.funding_percentage - 40.0).abs() < 1e-9);
    }
}
