//! Wealth Projection CLI
//!
//! Command-line front end for the projection engine, calculators, and budget store

use anyhow::{anyhow, bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use wealth_projection::budget::{BudgetCategory, BudgetStore, FileStorage};
use wealth_projection::calculators::{estimate_premium, plan_goals, recommend_cover, Gender, PpfPlan, TermInsuranceInput};
use wealth_projection::format::{format_percent, CurrencyFormat};
use wealth_projection::metrics::{derive_metrics, FinancialGoal, MetricsContext, Portfolio};
use wealth_projection::params::{load_parameters_json, ScheduledEvent};
use wealth_projection::strategy::{RateRule, RiskProfile, StrategyKind, StrategyParams};
use wealth_projection::{PlannerConfig, ProjectionParameters, ProjectionResult};

#[derive(Parser)]
#[command(name = "wealth-projection")]
#[command(about = "Savings projections, calculators, and a monthly budget planner", long_about = None)]
struct Cli {
    /// JSON config file (overrides WEALTH_PROJECTION_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Year-by-year savings projection
    Project {
        /// Full parameter set as JSON; other flags are ignored when given
        #[arg(long)]
        params: Option<PathBuf>,
        #[arg(long, default_value_t = 0.0)]
        principal: f64,
        /// Year-1 annual contribution
        #[arg(long, default_value_t = 0.0)]
        contribution: f64,
        #[arg(long, default_value_t = 10)]
        years: u32,
        /// Annual growth rate, percent
        #[arg(long, default_value_t = 10.0)]
        rate: f64,
        /// Use the expected return of a risk profile instead of --rate
        #[arg(long, value_parser = parse_profile)]
        profile: Option<RiskProfile>,
        /// Inflation rate, percent
        #[arg(long)]
        inflation: Option<f64>,
        #[arg(long, default_value = "fixed", value_parser = parse_strategy)]
        strategy: StrategyKind,
        /// Step-up for the increasing strategies, percent
        #[arg(long, default_value_t = 10.0)]
        increase_rate: f64,
        /// Maximum contribution in any year
        #[arg(long)]
        cap: Option<f64>,
        /// Lump sum as YEAR:AMOUNT (repeatable)
        #[arg(long = "lump-sum", value_parser = parse_event)]
        lump_sums: Vec<(u32, f64)>,
        /// Withdrawal as YEAR:AMOUNT (repeatable)
        #[arg(long = "withdraw", value_parser = parse_event)]
        withdrawals: Vec<(u32, f64)>,
        #[arg(long)]
        start_age: Option<u32>,
        #[arg(long, default_value_t = 0)]
        extension_years: u32,
        /// Stop contributing during the extension
        #[arg(long)]
        no_extension_contributions: bool,
        /// Goal as NAME:AMOUNT:YEAR (repeatable)
        #[arg(long = "goal", value_parser = parse_goal)]
        goals: Vec<FinancialGoal>,
        /// Monthly expenses for retirement readiness
        #[arg(long, default_value_t = 0.0)]
        monthly_expenses: f64,
    },
    /// Public Provident Fund maturity
    Ppf {
        /// Annual deposit
        #[arg(long)]
        deposit: f64,
        #[arg(long)]
        rate: Option<f64>,
        #[arg(long, default_value = "fixed", value_parser = parse_strategy)]
        strategy: StrategyKind,
        #[arg(long, default_value_t = 10.0)]
        increase_rate: f64,
        /// Multiple of 5
        #[arg(long, default_value_t = 0)]
        extension_years: u32,
        #[arg(long)]
        no_extension_contributions: bool,
    },
    /// Term insurance cover and premium
    Term {
        #[arg(long)]
        age: u32,
        #[arg(long)]
        income: Option<f64>,
        #[arg(long, default_value_t = 0.0)]
        liabilities: f64,
        #[arg(long, default_value_t = 0.0)]
        existing_cover: f64,
        #[arg(long)]
        smoker: bool,
        #[arg(long)]
        female: bool,
        #[arg(long, default_value_t = 30)]
        term: u32,
        #[arg(long)]
        sum_assured: Option<f64>,
    },
    /// Portfolio scores and growth from a JSON list of holdings
    Portfolio {
        #[arg(long)]
        input: PathBuf,
        #[arg(long, default_value_t = 0.0)]
        monthly_expenses: f64,
        #[arg(long, default_value_t = 10)]
        years: u32,
    },
    /// Monthly saving needed for goals in today's money
    Plan {
        /// Goal as NAME:AMOUNT:YEAR (repeatable)
        #[arg(long = "goal", value_parser = parse_goal, required = true)]
        goals: Vec<FinancialGoal>,
        #[arg(long, default_value = "moderate", value_parser = parse_profile)]
        profile: RiskProfile,
        #[arg(long)]
        inflation: Option<f64>,
    },
    /// Monthly budget planner
    Budget {
        #[command(subcommand)]
        action: BudgetAction,
    },
}

#[derive(Subcommand)]
enum BudgetAction {
    /// Set monthly income
    Income { amount: f64 },
    /// Plan an amount for an item
    Allocate {
        #[arg(value_parser = parse_category)]
        category: BudgetCategory,
        item: String,
        amount: f64,
    },
    /// Remove a planned item
    Unallocate {
        #[arg(value_parser = parse_category)]
        category: BudgetCategory,
        item: String,
    },
    /// Record an expense
    Spend {
        #[arg(value_parser = parse_category)]
        category: BudgetCategory,
        description: String,
        amount: f64,
        /// YYYY-MM-DD, defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete an expense by id
    Unspend { id: u64 },
    /// Create a savings goal
    Goal {
        name: String,
        target: f64,
        #[arg(long)]
        deadline: Option<NaiveDate>,
    },
    /// Add money to a savings goal
    Save { id: u64, amount: f64 },
    /// Delete a savings goal
    DropGoal { id: u64 },
    /// Show the budget summary
    Summary {
        /// Any date in the month to summarise, defaults to today
        #[arg(long)]
        month: Option<NaiveDate>,
    },
}

fn parse_strategy(s: &str) -> std::result::Result<StrategyKind, String> {
    StrategyKind::parse(s).ok_or_else(|| format!("unknown strategy `{}`", s))
}

fn parse_profile(s: &str) -> std::result::Result<RiskProfile, String> {
    RiskProfile::parse(s).ok_or_else(|| format!("unknown risk profile `{}`", s))
}

fn parse_category(s: &str) -> std::result::Result<BudgetCategory, String> {
    BudgetCategory::parse(s).ok_or_else(|| format!("unknown category `{}`", s))
}

fn parse_event(s: &str) -> std::result::Result<(u32, f64), String> {
    let (year, amount) = s.split_once(':').ok_or("expected YEAR:AMOUNT")?;
    let year = year.trim().parse().map_err(|_| format!("bad year `{}`", year))?;
    let amount = amount.trim().parse().map_err(|_| format!("bad amount `{}`", amount))?;
    Ok((year, amount))
}

fn parse_goal(s: &str) -> std::result::Result<FinancialGoal, String> {
    let mut parts = s.rsplitn(3, ':');
    let (year, amount, name) = match (parts.next(), parts.next(), parts.next()) {
        (Some(year), Some(amount), Some(name)) => (year, amount, name),
        _ => return Err("expected NAME:AMOUNT:YEAR".to_string()),
    };
    let amount = amount.trim().parse().map_err(|_| format!("bad amount `{}`", amount))?;
    let year = year.trim().parse().map_err(|_| format!("bad year `{}`", year))?;
    Ok(FinancialGoal::new(name.trim(), amount, year))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_projection(result: &ProjectionResult, currency: &CurrencyFormat) {
    println!(
        "{:>8} {:>16} {:>14} {:>14} {:>16} {:>16}",
        "Year", "Opening", "Contribution", "Interest", "Closing", "Real value"
    );
    println!("{}", "-".repeat(90));
    for record in &result.records {
        println!(
            "{:>8} {:>16} {:>14} {:>14} {:>16} {:>16}",
            record.label(),
            currency.format(record.opening_balance),
            currency.format(record.contribution + record.lump_sum_contributed),
            currency.format(record.interest_earned),
            currency.format(record.ending_balance),
            record
                .inflation_adjusted_balance
                .map(|v| currency.format(v))
                .unwrap_or_else(|| "-".to_string()),
        );
    }

    let s = &result.summary;
    println!("\nSummary ({} years):", s.years);
    println!("  Final balance:     {}", currency.format(s.final_balance));
    println!("  Total contributed: {}", currency.format(s.total_contributed));
    println!("  Total interest:    {}", currency.format(s.total_interest));
    println!("  Total withdrawn:   {}", currency.format(s.total_withdrawn));
    println!("  Wealth multiplier: {:.2}x", s.wealth_multiplier);
    println!("  CAGR:              {}", format_percent(s.cagr * 100.0));
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => PlannerConfig::from_path(path),
        None => PlannerConfig::from_env(),
    }
    .context("failed to load configuration")?;
    let currency = &config.currency;
    let engine = config.engine();

    match cli.command {
        Commands::Project {
            params,
            principal,
            contribution,
            years,
            rate,
            profile,
            inflation,
            strategy,
            increase_rate,
            cap,
            lump_sums,
            withdrawals,
            start_age,
            extension_years,
            no_extension_contributions,
            goals,
            monthly_expenses,
        } => {
            let params = match params {
                Some(path) => load_parameters_json(&path)
                    .with_context(|| format!("failed to read parameters from {}", path.display()))?,
                None => {
                    let rule = profile.map_or(RateRule::Fixed(rate), RateRule::Profile);
                    let mut p = ProjectionParameters::new(principal, contribution, years, rate)
                        .with_rate_rule(rule)
                        .with_strategy(
                            strategy,
                            StrategyParams {
                                increase_rate_percent: increase_rate,
                                yearly_cap: cap,
                            },
                        )
                        .with_extension(extension_years, !no_extension_contributions);
                    if let Some(inflation) = inflation {
                        p = p.with_inflation(inflation);
                    }
                    if let Some(age) = start_age {
                        p = p.with_start_age(age);
                    }
                    for (year, amount) in lump_sums {
                        p = p.with_event(ScheduledEvent::contribution(year, amount));
                    }
                    for (year, amount) in withdrawals {
                        p = p.with_event(ScheduledEvent::withdrawal(year, amount));
                    }
                    p
                }
            };

            let result = engine.project_validated(&params).context("invalid projection inputs")?;
            let context = MetricsContext {
                instruments: &config.instruments,
                goals: &goals,
                monthly_expenses,
                ..Default::default()
            };
            let metrics = derive_metrics(&result, &context);

            if cli.json {
                return print_json(&serde_json::json!({ "projection": result, "metrics": metrics }));
            }

            print_projection(&result, currency);
            for point in &metrics.comparisons {
                let alternatives: Vec<String> = point
                    .alternatives
                    .iter()
                    .map(|a| format!("{} {}", a.label, currency.format(a.value)))
                    .collect();
                println!(
                    "  Year {:>3}: projection {} vs {}",
                    point.year,
                    currency.format(point.projected_balance),
                    alternatives.join(", ")
                );
            }
            for goal in &metrics.goals {
                println!(
                    "  Goal {}: {} funded (shortfall {})",
                    goal.name,
                    format_percent(goal.funding_percentage),
                    currency.format(goal.shortfall)
                );
            }
            if monthly_expenses > 0.0 {
                println!(
                    "  Retirement readiness: {} of {}",
                    format_percent(metrics.retirement.funding_percentage),
                    currency.format(metrics.retirement.target_corpus)
                );
            }
        }

        Commands::Ppf {
            deposit,
            rate,
            strategy,
            increase_rate,
            extension_years,
            no_extension_contributions,
        } => {
            let mut plan = PpfPlan::new(deposit)
                .with_strategy(strategy, increase_rate)
                .with_extension(extension_years, !no_extension_contributions);
            if let Some(rate) = rate {
                plan.rate_percent = rate;
            }
            let maturity = plan.maturity(&engine).context("invalid PPF inputs")?;

            if cli.json {
                return print_json(&maturity);
            }
            print_projection(&maturity.projection, currency);
            println!("\nMaturity after {} years: {}", maturity.maturity_year, currency.format(maturity.maturity_amount));
            println!("  Tax free: {}", if maturity.tax_free { "yes" } else { "no" });
        }

        Commands::Term {
            age,
            income,
            liabilities,
            existing_cover,
            smoker,
            female,
            term,
            sum_assured,
        } => {
            let input = TermInsuranceInput {
                age,
                annual_income: income,
                outstanding_liabilities: liabilities,
                existing_cover,
                smoker,
                gender: if female { Gender::Female } else { Gender::Male },
                term_years: term,
                sum_assured,
            };
            let recommendation = recommend_cover(&input);
            let premium = estimate_premium(&input).context("cannot estimate premium")?;

            if cli.json {
                return print_json(&serde_json::json!({ "recommendation": recommendation, "premium": premium }));
            }
            if let Some(cover) = recommendation.recommended_cover {
                println!("Recommended cover: {} ({}x income)", currency.format(cover), recommendation.income_multiple);
            }
            if let Some(advisory) = &recommendation.advisory {
                println!("Note: {}", advisory);
            }
            println!("Sum assured:     {}", currency.format(premium.sum_assured));
            println!("Annual premium:  {}", currency.format(premium.annual_premium));
            println!("Monthly premium: {}", currency.format(premium.monthly_premium));
            println!("Over {} years:   {}", term, currency.format(premium.total_premium_over_term));
        }

        Commands::Portfolio {
            input,
            monthly_expenses,
            years,
        } => {
            let contents = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let portfolio: Portfolio = if contents.trim_start().starts_with('[') {
                serde_json::from_str(&contents).map(Portfolio::new)
            } else {
                serde_json::from_str(&contents)
            }
            .with_context(|| format!("invalid portfolio in {}", input.display()))?;
            let growth = portfolio.projection(years, &config.bounds)?;
            let readiness = portfolio.retirement_readiness(monthly_expenses, years);

            if cli.json {
                return print_json(&serde_json::json!({
                    "total_value": portfolio.total_value(),
                    "weighted_risk_score": portfolio.weighted_risk_score(),
                    "weighted_liquidity_score": portfolio.weighted_liquidity_score(),
                    "emergency_fund_months": portfolio.emergency_fund_months(monthly_expenses),
                    "projection": growth,
                    "retirement": readiness,
                }));
            }
            println!("Total value:       {}", currency.format(portfolio.total_value()));
            println!("Risk score:        {:.1}", portfolio.weighted_risk_score());
            println!("Liquidity score:   {:.1}", portfolio.weighted_liquidity_score());
            println!("Emergency fund:    {:.1} months", portfolio.emergency_fund_months(monthly_expenses));
            for (kind, share) in portfolio.allocation_by_kind() {
                println!("  {:?}: {}", kind, format_percent(share));
            }
            if let Some(last) = growth.last() {
                println!("Value in {} years: {}", last.year, currency.format(last.total_value));
            }
            println!(
                "Retirement readiness: {} of {}",
                format_percent(readiness.funding_percentage),
                currency.format(readiness.target_corpus)
            );
        }

        Commands::Plan {
            goals,
            profile,
            inflation,
        } => {
            let plan = plan_goals(&engine, &goals, profile, inflation.unwrap_or(config.inflation_rate_percent))?;
            if cli.json {
                return print_json(&plan);
            }
            for goal in &plan.goals {
                println!(
                    "{:<20} {} in year {} -> {}/month",
                    goal.goal.name,
                    currency.format(goal.future_target),
                    goal.goal.target_year,
                    currency.format(goal.required_monthly)
                );
            }
            println!("Total: {}/month at {}", currency.format(plan.total_required_monthly), format_percent(plan.annual_return_percent));
            println!(
                "Suggested mix: {} equity, {} debt, {} gold",
                format_percent(plan.asset_mix.equity_percent),
                format_percent(plan.asset_mix.debt_percent),
                format_percent(plan.asset_mix.gold_percent)
            );
        }

        Commands::Budget { action } => {
            let storage = FileStorage::open(&config.storage_dir)
                .with_context(|| format!("cannot open {}", config.storage_dir.display()))?;
            let mut store = BudgetStore::load(storage);
            let today = Local::now().date_naive();

            match action {
                BudgetAction::Income { amount } => store.set_income(amount)?,
                BudgetAction::Allocate { category, item, amount } => store.set_allocation(category, &item, amount)?,
                BudgetAction::Unallocate { category, item } => {
                    if !store.remove_allocation(category, &item)? {
                        bail!("no `{}` item in {:?}", item, category);
                    }
                }
                BudgetAction::Spend {
                    category,
                    description,
                    amount,
                    date,
                } => {
                    let id = store.add_expense(date.unwrap_or(today), category, &description, amount)?;
                    println!("Recorded expense #{}", id);
                }
                BudgetAction::Unspend { id } => {
                    if !store.remove_expense(id)? {
                        bail!("no expense #{}", id);
                    }
                }
                BudgetAction::Goal { name, target, deadline } => {
                    let id = store.add_goal(&name, target, deadline)?;
                    println!("Created goal #{}", id);
                }
                BudgetAction::Save { id, amount } => {
                    let progress = store
                        .contribute_to_goal(id, amount)?
                        .ok_or_else(|| anyhow!("no goal #{}", id))?;
                    println!("Goal #{} is {} complete", id, format_percent(progress));
                }
                BudgetAction::DropGoal { id } => {
                    if !store.remove_goal(id)? {
                        bail!("no goal #{}", id);
                    }
                }
                BudgetAction::Summary { month } => {
                    let summary = store.summary(month.unwrap_or(today));
                    if cli.json {
                        return print_json(&serde_json::json!({ "summary": summary, "goals": store.goals() }));
                    }
                    println!("Income:    {}", currency.format(summary.monthly_income));
                    for c in &summary.categories {
                        println!(
                            "  {:<10} planned {} ({} vs {} target), spent {}",
                            format!("{:?}", c.category),
                            currency.format(c.allocated),
                            format_percent(c.actual_share_percent),
                            format_percent(c.target_share_percent),
                            currency.format(c.spent_this_month)
                        );
                    }
                    println!("Remaining: {}", currency.format(summary.remaining));
                    println!("Savings rate: {}", format_percent(summary.savings_rate_percent));
                    for goal in store.goals() {
                        let monthly = goal
                            .monthly_required(today)
                            .map(|m| format!(", {}/month needed", currency.format(m)))
                            .unwrap_or_default();
                        println!(
                            "  Goal #{} {}: {} of {}{}",
                            goal.id,
                            goal.name,
                            format_percent(goal.progress_percentage()),
                            currency.format(goal.target_amount),
                            monthly
                        );
                    }
                }
            }
        }
    }

    Ok(())
}
