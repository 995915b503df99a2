//! Scenario runner for batch projections
//!
//! Holds one engine configuration and projects many parameter sets against
//! it. Batches are independent, so they are spread across threads with rayon.

use rayon::prelude::*;

use crate::error::ValidationError;
use crate::params::{ProjectionParameters, Scenario};
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};

/// Result of one named scenario
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: String,
    pub result: Result<ProjectionResult, ValidationError>,
}

/// Shared-engine runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let base = ProjectionParameters::new(0.0, 60_000.0, 20, 10.0);
///
/// let variants: Vec<_> = [8.0, 10.0, 12.0]
///     .iter()
///     .map(|&rate| ProjectionParameters { annual_rate_percent: rate, ..base.clone() })
///     .collect();
/// let results = runner.run_batch(&variants);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Runner with default input bounds
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }

    /// Project one parameter set without validation
    pub fn run(&self, params: &ProjectionParameters) -> ProjectionResult {
        self.engine.project(params)
    }

    /// Project one parameter set after range checks
    pub fn run_validated(&self, params: &ProjectionParameters) -> Result<ProjectionResult, ValidationError> {
        self.engine.project_validated(params)
    }

    /// Project every parameter set in parallel, preserving input order
    pub fn run_batch(&self, batch: &[ProjectionParameters]) -> Vec<ProjectionResult> {
        batch.par_iter().map(|params| self.engine.project(params)).collect()
    }

    /// Apply each variation to `base` and project the results
    pub fn run_scenarios<F>(&self, base: &ProjectionParameters, variations: &[F]) -> Vec<ProjectionResult>
    where
        F: Fn(&ProjectionParameters) -> ProjectionParameters + Sync,
    {
        variations
            .par_iter()
            .map(|vary| self.engine.project(&vary(base)))
            .collect()
    }

    /// Validate and project named scenarios; invalid ones carry their error
    pub fn run_named(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        scenarios
            .par_iter()
            .map(|scenario| ScenarioOutcome {
                name: scenario.name.clone(),
                result: self.run_validated(&scenario.params),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::InputBounds;
    use crate::strategy::{StrategyKind, StrategyParams};

    fn base() -> ProjectionParameters {
        ProjectionParameters::new(0.0, 60_000.0, 20, 10.0)
    }

    #[test]
    fn test_run_batch_preserves_order() {
        let runner = ScenarioRunner::new();
        let batch: Vec<_> = [8.0, 10.0, 12.0]
            .iter()
            .map(|&rate| ProjectionParameters {
                annual_rate_percent: rate,
                ..base()
            })
            .collect();

        let results = runner.run_batch(&batch);
        assert_eq!(results.len(), 3);
        assert!(results[0].summary.final_balance < results[1].summary.final_balance);
        assert!(results[1].summary.final_balance < results[2].summary.final_balance);
        assert_eq!(results[1], runner.run(&batch[1]));
    }

    #[test]
    fn test_run_scenarios_with_strategies() {
        let runner = ScenarioRunner::new();
        let variations: Vec<Box<dyn Fn(&ProjectionParameters) -> ProjectionParameters + Sync>> = StrategyKind::ALL
            .iter()
            .map(|&kind| {
                Box::new(move |p: &ProjectionParameters| p.clone().with_strategy(kind, StrategyParams::default()))
                    as Box<dyn Fn(&ProjectionParameters) -> ProjectionParameters + Sync>
            })
            .collect();

        let results = runner.run_scenarios(&base(), &variations);
        assert_eq!(results.len(), StrategyKind::ALL.len());
        // Fixed contributes the least of all strategies
        let fixed = results[0].summary.total_contributed;
        assert!(results.iter().all(|r| r.summary.total_contributed >= fixed));
    }

    #[test]
    fn test_run_named_reports_invalid() {
        let runner = ScenarioRunner::with_config(ProjectionConfig {
            bounds: InputBounds {
                horizon_max: 10,
                ..Default::default()
            },
        });
        let scenarios = vec![
            Scenario {
                name: "short".into(),
                params: ProjectionParameters::new(0.0, 10_000.0, 5, 7.0),
            },
            Scenario {
                name: "long".into(),
                params: base(),
            },
        ];

        let outcomes = runner.run_named(&scenarios);
        assert!(outcomes[0].result.is_ok());
        assert!(matches!(
            outcomes[1].result,
            Err(ValidationError::OutOfRange { field: "horizon_years", .. })
        ));
    }
}
