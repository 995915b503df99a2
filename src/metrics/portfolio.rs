//! Portfolio composites: risk, liquidity, emergency fund, retirement readiness

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::ValidationError;
use crate::numeric::{compound, ratio_or_zero};
use crate::params::{check_years, InputBounds};

/// Liquidity score at or above which an asset counts toward the emergency fund
pub const EMERGENCY_LIQUIDITY_THRESHOLD: u8 = 7;

/// Inclusive range of liquidity and risk scores
pub const SCORE_RANGE: std::ops::RangeInclusive<u8> = 1..=10;

/// Years of expenses a retirement corpus should cover (4% withdrawal rule)
pub const RETIREMENT_EXPENSE_MULTIPLE: f64 = 25.0;

/// Broad asset class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    Cash,
    SavingsAccount,
    FixedDeposit,
    Ppf,
    Epf,
    DebtFund,
    MutualFund,
    Equity,
    Gold,
    RealEstate,
}

impl AssetKind {
    /// Typical (liquidity, risk) scores on a 1-10 scale
    pub fn default_scores(&self) -> (u8, u8) {
        match self {
            AssetKind::Cash => (10, 1),
            AssetKind::SavingsAccount => (10, 1),
            AssetKind::FixedDeposit => (7, 2),
            AssetKind::Ppf => (2, 1),
            AssetKind::Epf => (2, 1),
            AssetKind::DebtFund => (8, 3),
            AssetKind::MutualFund => (8, 6),
            AssetKind::Equity => (9, 8),
            AssetKind::Gold => (6, 4),
            AssetKind::RealEstate => (1, 5),
        }
    }

    /// Typical nominal annual growth, percent
    pub fn default_growth_percent(&self) -> f64 {
        match self {
            AssetKind::Cash => 0.0,
            AssetKind::SavingsAccount => 3.5,
            AssetKind::FixedDeposit => 6.5,
            AssetKind::Ppf => 7.1,
            AssetKind::Epf => 8.25,
            AssetKind::DebtFund => 7.0,
            AssetKind::MutualFund => 11.0,
            AssetKind::Equity => 12.0,
            AssetKind::Gold => 8.0,
            AssetKind::RealEstate => 7.0,
        }
    }
}

/// A single holding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetAllocation {
    pub kind: AssetKind,
    pub label: String,
    pub current_value: f64,
    pub annual_growth_rate_percent: f64,
    /// 1 (illiquid) to 10 (cash)
    #[serde(deserialize_with = "deserialize_score")]
    pub liquidity_score: u8,
    /// 1 (safe) to 10 (speculative)
    #[serde(deserialize_with = "deserialize_score")]
    pub risk_score: u8,
}

fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let score = u8::deserialize(deserializer)?;
    if !SCORE_RANGE.contains(&score) {
        return Err(serde::de::Error::custom(format!(
            "score {} outside {}..={}",
            score,
            SCORE_RANGE.start(),
            SCORE_RANGE.end()
        )));
    }
    Ok(score)
}

impl AssetAllocation {
    /// Holding with the kind's default growth rate and scores
    pub fn new(kind: AssetKind, label: impl Into<String>, current_value: f64) -> Self {
        let (liquidity_score, risk_score) = kind.default_scores();
        Self {
            kind,
            label: label.into(),
            current_value,
            annual_growth_rate_percent: kind.default_growth_percent(),
            liquidity_score,
            risk_score,
        }
    }

    pub fn with_scores(mut self, liquidity_score: u8, risk_score: u8) -> Self {
        self.liquidity_score = liquidity_score.clamp(*SCORE_RANGE.start(), *SCORE_RANGE.end());
        self.risk_score = risk_score.clamp(*SCORE_RANGE.start(), *SCORE_RANGE.end());
        self
    }

    pub fn with_growth(mut self, annual_growth_rate_percent: f64) -> Self {
        self.annual_growth_rate_percent = annual_growth_rate_percent;
        self
    }

    pub fn value_after(&self, years: u32) -> f64 {
        compound(self.current_value, self.annual_growth_rate_percent, years)
    }
}

/// Portfolio value in one projected year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioYear {
    pub year: u32,
    pub total_value: f64,
    /// Per-holding values in portfolio order
    pub asset_values: Vec<f64>,
}

/// Retirement corpus check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementReadiness {
    pub target_corpus: f64,
    pub projected_corpus: f64,
    /// Clamped to `[0, 100]`
    pub funding_percentage: f64,
    pub shortfall: f64,
}

/// Ordered list of holdings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub assets: Vec<AssetAllocation>,
}

impl Portfolio {
    pub fn new(assets: Vec<AssetAllocation>) -> Self {
        Self { assets }
    }

    pub fn total_value(&self) -> f64 {
        self.assets.iter().map(|a| a.current_value).sum()
    }

    /// `Σ(score × value) / Σ value`, 0 for an empty or zero-valued portfolio
    fn weighted(&self, score: impl Fn(&AssetAllocation) -> u8) -> f64 {
        let weighted_sum: f64 = self
            .assets
            .iter()
            .map(|a| score(a) as f64 * a.current_value)
            .sum();
        ratio_or_zero(weighted_sum, self.total_value())
    }

    pub fn weighted_risk_score(&self) -> f64 {
        self.weighted(|a| a.risk_score)
    }

    pub fn weighted_liquidity_score(&self) -> f64 {
        self.weighted(|a| a.liquidity_score)
    }

    /// Value held in assets liquid enough for emergencies
    pub fn liquid_value(&self) -> f64 {
        self.assets
            .iter()
            .filter(|a| a.liquidity_score >= EMERGENCY_LIQUIDITY_THRESHOLD)
            .map(|a| a.current_value)
            .sum()
    }

    /// Months of expenses the liquid assets cover; 0 when expenses are 0
    pub fn emergency_fund_months(&self, monthly_expenses: f64) -> f64 {
        ratio_or_zero(self.liquid_value(), monthly_expenses)
    }

    /// Share of portfolio value per asset kind, percent, in first-seen order
    pub fn allocation_by_kind(&self) -> Vec<(AssetKind, f64)> {
        let total = self.total_value();
        let mut shares: Vec<(AssetKind, f64)> = Vec::new();
        for asset in &self.assets {
            let share = ratio_or_zero(asset.current_value, total) * 100.0;
            match shares.iter_mut().find(|(kind, _)| *kind == asset.kind) {
                Some((_, existing)) => *existing += share,
                None => shares.push((asset.kind, share)),
            }
        }
        shares
    }

    /// Grow each holding at its own rate, years 1..=years
    pub fn project(&self, years: u32) -> Vec<PortfolioYear> {
        (1..=years)
            .map(|year| {
                let asset_values: Vec<f64> = self.assets.iter().map(|a| a.value_after(year)).collect();
                PortfolioYear {
                    year,
                    total_value: asset_values.iter().sum(),
                    asset_values,
                }
            })
            .collect()
    }

    /// [`Portfolio::project`] with `years` checked against the horizon bounds
    pub fn projection(&self, years: u32, bounds: &InputBounds) -> Result<Vec<PortfolioYear>, ValidationError> {
        check_years("years", years, bounds)?;
        Ok(self.project(years))
    }

    pub fn projected_value(&self, years: u32) -> f64 {
        self.assets.iter().map(|a| a.value_after(years)).sum()
    }

    /// Compare the portfolio grown to retirement against 25 years of expenses
    pub fn retirement_readiness(&self, monthly_expenses: f64, years_to_retirement: u32) -> RetirementReadiness {
        retirement_readiness(self.projected_value(years_to_retirement), monthly_expenses)
    }
}

/// Readiness of `projected_corpus` against `monthly_expenses × 12 × 25`
///
/// A zero expense figure yields a zero target and 0% funding.
pub fn retirement_readiness(projected_corpus: f64, monthly_expenses: f64) -> RetirementReadiness {
    let target_corpus = monthly_expenses.max(0.0) * 12.0 * RETIREMENT_EXPENSE_MULTIPLE;
    RetirementReadiness {
        target_corpus,
        projected_corpus,
        funding_percentage: (ratio_or_zero(projected_corpus, target_corpus) * 100.0).clamp(0.0, 100.0),
        shortfall: (target_corpus - projected_corpus).max(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_assets() -> Portfolio {
        Portfolio::new(vec![
            AssetAllocation::new(AssetKind::Equity, "Stocks", 1_200_000.0).with_scores(9, 7),
            AssetAllocation::new(AssetKind::FixedDeposit, "Bank FD", 300_000.0).with_scores(7, 1),
        ])
    }

    #[test]
    fn test_weighted_risk_score() {
        assert_relative_eq!(two_assets().weighted_risk_score(), 5.8, epsilon = 1e-12);
    }

    #[test]
    fn test_weighted_liquidity_score() {
        assert_relative_eq!(two_assets().weighted_liquidity_score(), 8.6, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_portfolio_scores_zero() {
        let empty = Portfolio::default();
        assert_eq!(empty.weighted_risk_score(), 0.0);
        assert_eq!(empty.emergency_fund_months(40_000.0), 0.0);
    }

    #[test]
    fn test_emergency_fund_months() {
        let portfolio = Portfolio::new(vec![
            AssetAllocation::new(AssetKind::SavingsAccount, "Savings", 120_000.0),
            AssetAllocation::new(AssetKind::Ppf, "PPF", 500_000.0),
        ]);
        assert_relative_eq!(portfolio.emergency_fund_months(40_000.0), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_expenses_guard() {
        let portfolio = two_assets();
        assert_eq!(portfolio.emergency_fund_months(0.0), 0.0);
        let readiness = portfolio.retirement_readiness(0.0, 20);
        assert_eq!(readiness.funding_percentage, 0.0);
        assert!(readiness.funding_percentage.is_finite());
    }

    #[test]
    fn test_retirement_readiness() {
        let readiness = retirement_readiness(6_000_000.0, 40_000.0);
        assert_eq!(readiness.target_corpus, 12_000_000.0);
        assert_relative_eq!(readiness.funding_percentage, 50.0, epsilon = 1e-12);
        assert_eq!(readiness.shortfall, 6_000_000.0);

        let over = retirement_readiness(50_000_000.0, 40_000.0);
        assert_eq!(over.funding_percentage, 100.0);
        assert_eq!(over.shortfall, 0.0);
    }

    #[test]
    fn test_project_grows_each_asset() {
        let portfolio = Portfolio::new(vec![
            AssetAllocation::new(AssetKind::Equity, "Stocks", 1_000.0).with_growth(10.0),
            AssetAllocation::new(AssetKind::Cash, "Cash", 500.0),
        ]);
        let years = portfolio.project(2);
        assert_eq!(years.len(), 2);
        assert_relative_eq!(years[1].asset_values[0], 1_210.0, epsilon = 1e-9);
        assert_relative_eq!(years[1].total_value, 1_710.0, epsilon = 1e-9);
        assert_relative_eq!(portfolio.projected_value(2), 1_710.0, epsilon = 1e-9);
    }

    #[test]
    fn test_projection_years_bounded() {
        let bounds = InputBounds::default();
        let portfolio = two_assets();
        assert_eq!(portfolio.projection(50, &bounds).unwrap().len(), 50);
        assert!(portfolio.projection(0, &bounds).is_err());
        assert!(matches!(
            portfolio.projection(u32::MAX, &bounds),
            Err(ValidationError::OutOfRange { field: "years", .. })
        ));
    }

    #[test]
    fn test_scores_out_of_range_rejected_on_load() {
        let holding = |liquidity: u32, risk: u32| {
            format!(
                r#"{{"kind":"equity","label":"Stocks","current_value":1000.0,
                    "annual_growth_rate_percent":12.0,"liquidity_score":{},"risk_score":{}}}"#,
                liquidity, risk
            )
        };
        let ok: AssetAllocation = serde_json::from_str(&holding(9, 8)).unwrap();
        assert_eq!((ok.liquidity_score, ok.risk_score), (9, 8));
        assert!(serde_json::from_str::<AssetAllocation>(&holding(0, 8)).is_err());
        assert!(serde_json::from_str::<AssetAllocation>(&holding(9, 255)).is_err());
        assert!(serde_json::from_str::<AssetAllocation>(&holding(9, 11)).is_err());
    }

    #[test]
    fn test_with_scores_clamps() {
        let asset = AssetAllocation::new(AssetKind::Gold, "Gold", 100.0).with_scores(0, 255);
        assert_eq!((asset.liquidity_score, asset.risk_score), (1, 10));
    }

    #[test]
    fn test_allocation_by_kind_merges() {
        let portfolio = Portfolio::new(vec![
            AssetAllocation::new(AssetKind::Equity, "A", 300.0),
            AssetAllocation::new(AssetKind::Gold, "B", 100.0),
            AssetAllocation::new(AssetKind::Equity, "C", 100.0),
        ]);
        let shares = portfolio.allocation_by_kind();
        assert_eq!(shares.len(), 2);
        assert_eq!(shares[0].0, AssetKind::Equity);
        assert_relative_eq!(shares[0].1, 80.0, epsilon = 1e-9);
    }
}
