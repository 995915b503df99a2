//! Budget, expense, and savings-goal records

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::numeric::ratio_or_zero;

/// Top-level budget bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetCategory {
    /// Needs: rent, EMIs, groceries, utilities
    Essential,
    /// Wants: dining, travel, subscriptions
    Lifestyle,
    /// Savings and investments
    Savings,
}

impl BudgetCategory {
    pub const ALL: [BudgetCategory; 3] = [
        BudgetCategory::Essential,
        BudgetCategory::Lifestyle,
        BudgetCategory::Savings,
    ];

    /// Share of income under the 50/30/20 rule, percent
    pub fn target_share_percent(&self) -> f64 {
        match self {
            BudgetCategory::Essential => 50.0,
            BudgetCategory::Lifestyle => 30.0,
            BudgetCategory::Savings => 20.0,
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "essential" | "needs" => Some(BudgetCategory::Essential),
            "lifestyle" | "wants" => Some(BudgetCategory::Lifestyle),
            "savings" => Some(BudgetCategory::Savings),
            _ => None,
        }
    }
}

/// Monthly income and planned amounts, category → item → amount
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetState {
    pub monthly_income: f64,
    pub allocations: BTreeMap<BudgetCategory, BTreeMap<String, f64>>,
}

impl BudgetState {
    pub fn category_total(&self, category: BudgetCategory) -> f64 {
        self.allocations
            .get(&category)
            .map(|items| items.values().sum())
            .unwrap_or(0.0)
    }

    pub fn total_allocated(&self) -> f64 {
        BudgetCategory::ALL.iter().map(|c| self.category_total(*c)).sum()
    }
}

/// A single spend entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyExpense {
    pub id: u64,
    pub date: NaiveDate,
    pub category: BudgetCategory,
    pub description: String,
    pub amount: f64,
}

/// Money set aside toward a named target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub id: u64,
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub saved_amount: f64,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
}

impl SavingsGoal {
    /// Saved share of the target, clamped to `[0, 100]`
    pub fn progress_percentage(&self) -> f64 {
        (ratio_or_zero(self.saved_amount, self.target_amount) * 100.0).clamp(0.0, 100.0)
    }

    pub fn remaining(&self) -> f64 {
        (self.target_amount - self.saved_amount).max(0.0)
    }

    /// Monthly saving needed to hit the deadline; `None` without a deadline
    /// or once the deadline has passed
    pub fn monthly_required(&self, today: NaiveDate) -> Option<f64> {
        let deadline = self.deadline?;
        if deadline <= today {
            return None;
        }
        let months = (deadline.year() - today.year()) * 12 + deadline.month() as i32 - today.month() as i32;
        Some(self.remaining() / months.max(1) as f64)
    }
}

/// One category line of a budget summary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub category: BudgetCategory,
    pub allocated: f64,
    pub spent_this_month: f64,
    pub target_share_percent: f64,
    pub actual_share_percent: f64,
}

/// Budget overview for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetSummary {
    pub monthly_income: f64,
    pub categories: Vec<CategoryTotal>,
    pub total_allocated: f64,
    pub remaining: f64,
    /// Savings allocation as a share of income, percent
    pub savings_rate_percent: f64,
    pub spent_this_month: f64,
}

/// Summarise allocations and the expenses dated in `month`'s calendar month
pub fn summarize(budget: &BudgetState, expenses: &[DailyExpense], month: NaiveDate) -> BudgetSummary {
    let in_month = |e: &&DailyExpense| e.date.year() == month.year() && e.date.month() == month.month();

    let categories: Vec<CategoryTotal> = BudgetCategory::ALL
        .iter()
        .map(|&category| {
            let allocated = budget.category_total(category);
            CategoryTotal {
                category,
                allocated,
                spent_this_month: expenses
                    .iter()
                    .filter(in_month)
                    .filter(|e| e.category == category)
                    .map(|e| e.amount)
                    .sum(),
                target_share_percent: category.target_share_percent(),
                actual_share_percent: ratio_or_zero(allocated, budget.monthly_income) * 100.0,
            }
        })
        .collect();

    let total_allocated = budget.total_allocated();
    BudgetSummary {
        monthly_income: budget.monthly_income,
        total_allocated,
        remaining: budget.monthly_income - total_allocated,
        savings_rate_percent: ratio_or_zero(
            budget.category_total(BudgetCategory::Savings),
            budget.monthly_income,
        ) * 100.0,
        spent_this_month: categories.iter().map(|c| c.spent_this_month).sum(),
        categories,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample_budget() -> BudgetState {
        let mut budget = BudgetState {
            monthly_income: 100_000.0,
            ..Default::default()
        };
        budget
            .allocations
            .entry(BudgetCategory::Essential)
            .or_default()
            .insert("Rent/Home EMI".to_string(), 30_000.0);
        budget
            .allocations
            .entry(BudgetCategory::Essential)
            .or_default()
            .insert("Groceries".to_string(), 10_000.0);
        budget
            .allocations
            .entry(BudgetCategory::Savings)
            .or_default()
            .insert("SIP".to_string(), 25_000.0);
        budget
    }

    #[test]
    fn test_summary_totals() {
        let expenses = vec![
            DailyExpense {
                id: 1,
                date: date(2026, 3, 2),
                category: BudgetCategory::Lifestyle,
                description: "Dinner".into(),
                amount: 1_500.0,
            },
            DailyExpense {
                id: 2,
                date: date(2026, 2, 28),
                category: BudgetCategory::Lifestyle,
                description: "Movie".into(),
                amount: 600.0,
            },
        ];
        let summary = summarize(&sample_budget(), &expenses, date(2026, 3, 15));

        assert_eq!(summary.total_allocated, 65_000.0);
        assert_eq!(summary.remaining, 35_000.0);
        assert_eq!(summary.savings_rate_percent, 25.0);
        assert_eq!(summary.spent_this_month, 1_500.0);
        assert_eq!(summary.categories[0].actual_share_percent, 40.0);
    }

    #[test]
    fn test_zero_income_guard() {
        let budget = BudgetState::default();
        let summary = summarize(&budget, &[], date(2026, 1, 1));
        assert_eq!(summary.savings_rate_percent, 0.0);
        assert!(summary.categories.iter().all(|c| c.actual_share_percent == 0.0));
    }

    #[test]
    fn test_goal_progress_and_monthly_need() {
        let goal = SavingsGoal {
            id: 1,
            name: "Vacation".into(),
            target_amount: 120_000.0,
            saved_amount: 30_000.0,
            deadline: Some(date(2026, 12, 1)),
        };
        assert_eq!(goal.progress_percentage(), 25.0);
        assert_eq!(goal.monthly_required(date(2026, 3, 1)), Some(10_000.0));
        assert_eq!(goal.monthly_required(date(2027, 1, 1)), None);
    }

    #[test]
    fn test_budget_json_uses_category_keys() {
        let json = serde_json::to_string(&sample_budget()).unwrap();
        assert!(json.contains("\"essential\""));
        let back: BudgetState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample_budget());
    }
}
