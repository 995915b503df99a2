//! Projection engine: parameters in, year-indexed records and summary out

mod state;
mod engine;
mod records;
mod solver;

pub use state::ProjectionState;
pub use engine::{project, ProjectionConfig, ProjectionEngine};
pub use records::{ProjectionResult, ProjectionSummary, YearRecord};
pub use solver::{required_monthly_contribution, solve_base_contribution};
