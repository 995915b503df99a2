use approx::assert_relative_eq;

use wealth_projection::budget::{BudgetCategory, BudgetStore, MemoryStorage};
use wealth_projection::metrics::{
    derive_metrics, funding_percentage, AssetAllocation, AssetKind, FinancialGoal, MetricsContext, Portfolio,
};
use wealth_projection::params::{validate, InputBounds, ProjectionParameters, ScheduledEvent};
use wealth_projection::projection::{project, solve_base_contribution, ProjectionEngine};
use wealth_projection::strategy::{contribution_schedule, StrategyKind, StrategyParams};

fn capped(increase_rate_percent: f64, cap: f64) -> StrategyParams {
    StrategyParams {
        increase_rate_percent,
        yearly_cap: Some(cap),
    }
}

#[test]
fn test_fixed_ppf_matches_closed_form() {
    let params = ProjectionParameters::new(0.0, 50_000.0, 15, 7.1);
    let result = project(&params);

    let i = 1.071_f64.powf(1.0 / 12.0) - 1.0;
    let monthly = 50_000.0 / 12.0;
    let n = 180;
    let expected = monthly * (1.0 + i) * ((1.0 + i).powi(n) - 1.0) / i;

    assert!((result.summary.final_balance - expected).abs() < 1.0);
    assert_eq!(result.summary.total_contributed, 750_000.0);
    assert_eq!(result.records.len(), 15);
}

#[test]
fn test_increasing_strategy_hits_cap() {
    let params = ProjectionParameters::new(0.0, 50_000.0, 20, 8.0)
        .with_strategy(StrategyKind::Increasing, capped(10.0, 150_000.0));
    let result = project(&params);

    assert_relative_eq!(result.records[1].contribution, 55_000.0, epsilon = 1e-9);
    // 50000 x 1.1^11 is still below the cap; 1.1^12 crosses it
    assert!(result.records[11].contribution < 150_000.0);
    assert_eq!(result.records[12].contribution, 150_000.0);
    assert!(result.records.iter().all(|r| r.contribution <= 150_000.0));
}

#[test]
fn test_two_asset_weighted_risk() {
    let portfolio = Portfolio::new(vec![
        AssetAllocation::new(AssetKind::Equity, "Equity", 1_200_000.0).with_scores(8, 7),
        AssetAllocation::new(AssetKind::FixedDeposit, "Deposit", 300_000.0).with_scores(8, 1),
    ]);
    assert_relative_eq!(portfolio.weighted_risk_score(), 5.8, epsilon = 1e-12);
}

#[test]
fn test_oversized_withdrawal_goes_negative() {
    let params = ProjectionParameters::new(0.0, 100_000.0, 10, 8.0)
        .with_event(ScheduledEvent::withdrawal(5, 1_500_000.0));
    assert!(validate(&params, &InputBounds::default()).is_ok());

    let result = project(&params);
    let year4 = result.record(4).unwrap();
    let year5 = result.record(5).unwrap();
    assert!(year4.ending_balance < 1_500_000.0);
    assert_eq!(year5.withdrawn, 1_500_000.0);
    assert!(year5.ending_balance < 0.0);
    assert_eq!(result.summary.total_withdrawn, 1_500_000.0);
}

#[test]
fn test_zero_expenses_guard() {
    let portfolio = Portfolio::new(vec![
        AssetAllocation::new(AssetKind::SavingsAccount, "Savings", 250_000.0),
        AssetAllocation::new(AssetKind::MutualFund, "Index fund", 750_000.0),
    ]);
    assert_eq!(portfolio.emergency_fund_months(0.0), 0.0);
    assert_eq!(portfolio.retirement_readiness(0.0, 20).funding_percentage, 0.0);

    let result = project(&ProjectionParameters::new(0.0, 0.0, 5, 0.0));
    let metrics = derive_metrics(
        &result,
        &MetricsContext {
            portfolio: Some(&portfolio),
            ..Default::default()
        },
    );
    let p = metrics.portfolio.unwrap();
    assert!(p.emergency_fund_months.is_finite());
    assert_eq!(p.emergency_fund_months, 0.0);
    assert_eq!(metrics.retirement.funding_percentage, 0.0);
    assert_eq!(result.summary.wealth_multiplier, 0.0);
    assert_eq!(result.summary.cagr, 0.0);
}

#[test]
fn test_year_one_is_base_for_every_strategy() {
    for kind in StrategyKind::ALL {
        let params = ProjectionParameters::new(10_000.0, 36_000.0, 12, 9.0)
            .with_strategy(kind, capped(12.0, 80_000.0));
        let result = project(&params);
        assert_eq!(result.records[0].contribution, 36_000.0, "{:?}", kind);
    }
}

#[test]
fn test_cumulative_contributed_never_decreases() {
    for kind in StrategyKind::ALL {
        let params = ProjectionParameters::new(5_000.0, 24_000.0, 30, 11.0)
            .with_strategy(kind, StrategyParams::default())
            .with_event(ScheduledEvent::contribution(10, 50_000.0))
            .with_extension(5, false);
        let result = project(&params);
        for pair in result.records.windows(2) {
            assert!(pair[1].cumulative_contributed >= pair[0].cumulative_contributed, "{:?}", kind);
        }
    }
}

#[test]
fn test_cap_holds_for_step_up_strategies() {
    for kind in [StrategyKind::Increasing, StrategyKind::Aggressive, StrategyKind::Moderate] {
        let schedule = contribution_schedule(kind, 20_000.0, &capped(15.0, 60_000.0), 40);
        assert!(schedule.iter().all(|&c| c <= 60_000.0), "{:?}", kind);
        assert_eq!(*schedule.last().unwrap(), 60_000.0);
    }
}

#[test]
fn test_conservative_dip_years() {
    let base = 30_000.0;
    let schedule = contribution_schedule(StrategyKind::Conservative, base, &StrategyParams::default(), 35);
    for year in (7..=35).step_by(7) {
        let idx = year - 1;
        assert!(schedule[idx] <= schedule[idx - 1]);
        assert!(schedule[idx] >= base);
    }
}

#[test]
fn test_cagr_consistency() {
    let params = ProjectionParameters::new(100_000.0, 60_000.0, 25, 12.0)
        .with_strategy(StrategyKind::Moderate, StrategyParams::default());
    let s = project(&params).summary;
    assert_relative_eq!(
        (1.0 + s.cagr).powi(s.years as i32),
        s.final_balance / s.total_contributed,
        max_relative = 1e-9
    );
}

#[test]
fn test_goal_funding_is_clamped() {
    let result = project(&ProjectionParameters::new(0.0, 500_000.0, 10, 12.0));
    let context_goals = vec![
        FinancialGoal::new("Small", 10_000.0, 10),
        FinancialGoal::new("Huge", 1e12, 10),
        FinancialGoal::new("Empty", 0.0, 5),
    ];
    let metrics = derive_metrics(
        &result,
        &MetricsContext {
            goals: &context_goals,
            ..Default::default()
        },
    );

    assert_eq!(metrics.goals[0].funding_percentage, 100.0);
    assert!(metrics.goals[0].funded);
    assert!(metrics.goals[1].funding_percentage < 1.0);
    assert!(!metrics.goals[1].funded);
    assert_eq!(metrics.goals[2].funding_percentage, 0.0);
    assert_eq!(funding_percentage(-5.0, 100.0), 0.0);
}

#[test]
fn test_solver_feeds_back_into_engine() {
    let engine = ProjectionEngine::default();
    let params = ProjectionParameters::new(0.0, 0.0, 20, 10.0)
        .with_strategy(StrategyKind::Increasing, StrategyParams::default());
    let base = solve_base_contribution(&engine, &params, 5_000_000.0, 20, 1_000_000.0).unwrap();

    let check = engine.project(&ProjectionParameters {
        periodic_contribution: base,
        ..params
    });
    // Upper end of the bracket: never short, within a few rupees over
    assert!(check.summary.final_balance >= 5_000_000.0);
    assert!(check.summary.final_balance - 5_000_000.0 < 5.0);
}

#[test]
fn test_budget_session_survives_reload() {
    let mut store = BudgetStore::load(MemoryStorage::new());
    store.set_income(120_000.0).unwrap();
    store.set_allocation(BudgetCategory::Savings, "SIP", 30_000.0).unwrap();
    let goal = store.add_goal("Emergency fund", 360_000.0, None).unwrap();
    store.contribute_to_goal(goal, 90_000.0).unwrap();

    let store = BudgetStore::load(store.into_storage());
    let today = chrono::NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
    let summary = store.summary(today);
    assert_eq!(summary.savings_rate_percent, 25.0);
    assert_eq!(store.goals()[0].progress_percentage(), 25.0);
}
