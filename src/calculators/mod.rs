//! Calculator presets built on the shared projection engine

pub mod planner;
pub mod ppf;
pub mod term_insurance;

pub use planner::{plan_goals, FinancialPlan, GoalPlan};
pub use ppf::{PpfMaturity, PpfPlan};
pub use term_insurance::{
    estimate_premium, income_multiple, recommend_cover, CoverageRecommendation, Gender, PremiumEstimate,
    TermInsuranceInput,
};
