//! Wealth Projection - multi-year savings projection engine for personal finance calculators
//!
//! This library provides:
//! - Year-by-year projections with monthly compounding, step-up contribution
//!   strategies, scheduled lump sums and withdrawals, and extension periods
//! - Derived metrics: instrument comparisons, goal funding, portfolio scores,
//!   emergency-fund coverage, and retirement readiness
//! - PPF, term insurance, and goal-based planning calculators
//! - A monthly budget planner persisted to local JSON files
//! - Batch scenario runs across threads

pub mod budget;
pub mod calculators;
pub mod config;
pub mod error;
pub mod format;
pub mod metrics;
pub mod numeric;
pub mod params;
pub mod projection;
pub mod scenario;
pub mod strategy;

// Re-export commonly used types
pub use config::PlannerConfig;
pub use error::{LoadError, StoreError, ValidationError};
pub use metrics::{derive_metrics, Metrics, MetricsContext};
pub use params::{ProjectionParameters, ScheduledEvent};
pub use projection::{project, ProjectionEngine, ProjectionResult, YearRecord};
pub use scenario::ScenarioRunner;
pub use strategy::{StrategyKind, StrategyParams};
