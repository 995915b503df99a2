//! Monthly budget planner with a persisted store

mod model;
mod storage;
mod store;

pub use model::{summarize, BudgetCategory, BudgetState, BudgetSummary, CategoryTotal, DailyExpense, SavingsGoal};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{
    BudgetStore, LoadOutcome, BUDGET_DATA_KEY, DAILY_EXPENSES_KEY, SAVINGS_GOALS_KEY, SCHEMA_VERSION,
};
