//! Project every scenario in a CSV file
//!
//! Outputs one summary row per scenario; invalid scenarios are reported
//! with their validation error instead of figures.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

use wealth_projection::metrics::{compare, COMPARISON_INTERVAL_YEARS};
use wealth_projection::params::load_scenarios;
use wealth_projection::scenario::ScenarioRunner;
use wealth_projection::PlannerConfig;

#[derive(Parser)]
#[command(name = "run_scenarios", about = "Batch projection of a scenarios CSV")]
struct Args {
    #[arg(default_value = "data/scenarios.csv")]
    input: PathBuf,

    #[arg(short, long, default_value = "scenario_output.csv")]
    output: PathBuf,
}

/// One output line per scenario
#[derive(Debug, Serialize)]
struct SummaryRow {
    name: String,
    status: String,
    years: Option<u32>,
    final_balance: Option<f64>,
    total_contributed: Option<f64>,
    total_interest: Option<f64>,
    wealth_multiplier: Option<f64>,
    cagr_percent: Option<f64>,
    final_inflation_adjusted: Option<f64>,
    /// Best alternative instrument at the final year
    best_alternative: Option<String>,
    best_alternative_value: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = PlannerConfig::from_env().context("failed to load configuration")?;

    let start = Instant::now();
    println!("Loading scenarios from {}...", args.input.display());
    let scenarios = load_scenarios(&args.input)
        .with_context(|| format!("failed to load {}", args.input.display()))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let runner = ScenarioRunner::with_config(config.projection_config());
    let proj_start = Instant::now();
    let outcomes = runner.run_named(&scenarios);
    println!("Projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;

    let mut failed = 0;
    for outcome in outcomes {
        let row = match &outcome.result {
            Ok(result) => {
                let s = &result.summary;
                let best = compare(result, &config.instruments)
                    .pop()
                    .and_then(|point| {
                        point
                            .alternatives
                            .into_iter()
                            .max_by(|a, b| a.value.total_cmp(&b.value))
                    });
                SummaryRow {
                    name: outcome.name.clone(),
                    status: "ok".to_string(),
                    years: Some(s.years),
                    final_balance: Some(s.final_balance),
                    total_contributed: Some(s.total_contributed),
                    total_interest: Some(s.total_interest),
                    wealth_multiplier: Some(s.wealth_multiplier),
                    cagr_percent: Some(s.cagr * 100.0),
                    final_inflation_adjusted: s.final_inflation_adjusted,
                    best_alternative_value: best.as_ref().map(|b| b.value),
                    best_alternative: best.map(|b| b.label),
                }
            }
            Err(e) => {
                failed += 1;
                log::warn!("scenario {} rejected: {}", outcome.name, e);
                SummaryRow {
                    name: outcome.name.clone(),
                    status: e.to_string(),
                    years: None,
                    final_balance: None,
                    total_contributed: None,
                    total_interest: None,
                    wealth_multiplier: None,
                    cagr_percent: None,
                    final_inflation_adjusted: None,
                    best_alternative: None,
                    best_alternative_value: None,
                }
            }
        };
        writer.serialize(row)?;
    }
    writer.flush()?;

    println!(
        "Output written to {} ({} rejected, checkpoints every {} years)",
        args.output.display(),
        failed,
        COMPARISON_INTERVAL_YEARS
    );
    Ok(())
}
