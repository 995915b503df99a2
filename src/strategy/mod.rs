//! Contribution strategies and return-rate rules consumed by the projection engine

mod contribution;
mod risk;

pub use contribution::{contribution_schedule, resolve_contribution, StrategyKind, StrategyParams};
pub use risk::{AssetMix, RateRule, RiskProfile};
