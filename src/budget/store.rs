//! Persisted budget store: read once at startup, rewritten on every mutation

use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::model::{summarize, BudgetCategory, BudgetState, BudgetSummary, DailyExpense, SavingsGoal};
use super::storage::KeyValueStorage;
use crate::error::StoreError;

pub const BUDGET_DATA_KEY: &str = "budget_data";
pub const DAILY_EXPENSES_KEY: &str = "daily_expenses";
pub const SAVINGS_GOALS_KEY: &str = "savings_goals";

/// Version written into every envelope
pub const SCHEMA_VERSION: u32 = 1;

/// Stored form of each value
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    saved_at: DateTime<Utc>,
    data: T,
}

/// Where a loaded value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Current-version envelope
    Loaded,
    /// Bare value written before envelopes existed
    Legacy,
    /// Key absent
    Missing,
    /// Unreadable, malformed, or from a newer schema; defaults used
    Reset,
}

/// Budget, expenses, and savings goals backed by a key-value storage
#[derive(Debug)]
pub struct BudgetStore<S: KeyValueStorage> {
    storage: S,
    budget: BudgetState,
    expenses: Vec<DailyExpense>,
    goals: Vec<SavingsGoal>,
    next_id: u64,
}

fn read_value<S, T>(storage: &S, key: &str) -> (T, LoadOutcome)
where
    S: KeyValueStorage,
    T: DeserializeOwned + Default,
{
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return (T::default(), LoadOutcome::Missing),
        Err(e) => {
            warn!("could not read `{}`: {}; using defaults", key, e);
            return (T::default(), LoadOutcome::Reset);
        }
    };

    match serde_json::from_str::<Envelope<T>>(&raw) {
        Ok(envelope) if envelope.version <= SCHEMA_VERSION => (envelope.data, LoadOutcome::Loaded),
        Ok(envelope) => {
            warn!(
                "`{}` has schema version {} (supported: {}); using defaults",
                key, envelope.version, SCHEMA_VERSION
            );
            (T::default(), LoadOutcome::Reset)
        }
        Err(_) => match serde_json::from_str::<T>(&raw) {
            Ok(value) => (value, LoadOutcome::Legacy),
            Err(e) => {
                warn!("`{}` is malformed: {}; using defaults", key, e);
                (T::default(), LoadOutcome::Reset)
            }
        },
    }
}

fn write_value<S, T>(storage: &mut S, key: &str, data: &T, saved_at: DateTime<Utc>) -> Result<(), StoreError>
where
    S: KeyValueStorage,
    T: Serialize,
{
    let envelope = Envelope {
        version: SCHEMA_VERSION,
        saved_at,
        data,
    };
    let json = serde_json::to_string(&envelope).map_err(|source| StoreError::Serialize {
        key: key.to_string(),
        source,
    })?;
    storage.set(key, &json).map_err(|source| StoreError::Io {
        key: key.to_string(),
        source,
    })
}

impl<S: KeyValueStorage> BudgetStore<S> {
    /// Read all three values; anything unreadable falls back to defaults
    pub fn load(storage: S) -> Self {
        let (budget, budget_outcome) = read_value::<S, BudgetState>(&storage, BUDGET_DATA_KEY);
        let (expenses, expenses_outcome) = read_value::<S, Vec<DailyExpense>>(&storage, DAILY_EXPENSES_KEY);
        let (goals, goals_outcome) = read_value::<S, Vec<SavingsGoal>>(&storage, SAVINGS_GOALS_KEY);

        info!(
            "budget store loaded (budget: {:?}, expenses: {} {:?}, goals: {} {:?})",
            budget_outcome,
            expenses.len(),
            expenses_outcome,
            goals.len(),
            goals_outcome
        );

        let next_id = expenses
            .iter()
            .map(|e: &DailyExpense| e.id)
            .chain(goals.iter().map(|g: &SavingsGoal| g.id))
            .max()
            .unwrap_or(0)
            + 1;

        Self {
            storage,
            budget,
            expenses,
            goals,
            next_id,
        }
    }

    /// Rewrite all three values in full
    pub fn save(&mut self) -> Result<(), StoreError> {
        let now = Utc::now();
        write_value(&mut self.storage, BUDGET_DATA_KEY, &self.budget, now)?;
        write_value(&mut self.storage, DAILY_EXPENSES_KEY, &self.expenses, now)?;
        write_value(&mut self.storage, SAVINGS_GOALS_KEY, &self.goals, now)?;
        info!(
            "budget store saved ({} expenses, {} goals)",
            self.expenses.len(),
            self.goals.len()
        );
        Ok(())
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn budget(&self) -> &BudgetState {
        &self.budget
    }

    pub fn expenses(&self) -> &[DailyExpense] {
        &self.expenses
    }

    pub fn goals(&self) -> &[SavingsGoal] {
        &self.goals
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Apply `change` and persist it
    ///
    /// If the save fails, memory is restored to its state before `change`
    /// and the previous values are written back over any partial save.
    fn commit<T>(&mut self, change: impl FnOnce(&mut Self) -> T) -> Result<T, StoreError> {
        let snapshot = (
            self.budget.clone(),
            self.expenses.clone(),
            self.goals.clone(),
            self.next_id,
        );
        let outcome = change(self);
        if let Err(e) = self.save() {
            (self.budget, self.expenses, self.goals, self.next_id) = snapshot;
            if let Err(restore) = self.save() {
                warn!("could not restore stored budget after failed save: {}", restore);
            }
            return Err(e);
        }
        Ok(outcome)
    }

    pub fn set_income(&mut self, monthly_income: f64) -> Result<(), StoreError> {
        self.commit(|store| store.budget.monthly_income = monthly_income.max(0.0))
    }

    /// Set the planned amount for an item, replacing any previous amount
    pub fn set_allocation(
        &mut self,
        category: BudgetCategory,
        item: &str,
        amount: f64,
    ) -> Result<(), StoreError> {
        self.commit(|store| {
            store
                .budget
                .allocations
                .entry(category)
                .or_default()
                .insert(item.to_string(), amount.max(0.0));
        })
    }

    /// Returns whether the item existed
    pub fn remove_allocation(&mut self, category: BudgetCategory, item: &str) -> Result<bool, StoreError> {
        let exists = self
            .budget
            .allocations
            .get(&category)
            .is_some_and(|items| items.contains_key(item));
        if !exists {
            return Ok(false);
        }
        self.commit(|store| {
            if let Some(items) = store.budget.allocations.get_mut(&category) {
                items.remove(item);
                if items.is_empty() {
                    store.budget.allocations.remove(&category);
                }
            }
        })?;
        Ok(true)
    }

    /// Record an expense and return its id
    pub fn add_expense(
        &mut self,
        date: NaiveDate,
        category: BudgetCategory,
        description: &str,
        amount: f64,
    ) -> Result<u64, StoreError> {
        self.commit(|store| {
            let id = store.allocate_id();
            store.expenses.push(DailyExpense {
                id,
                date,
                category,
                description: description.to_string(),
                amount: amount.max(0.0),
            });
            id
        })
    }

    pub fn remove_expense(&mut self, id: u64) -> Result<bool, StoreError> {
        if !self.expenses.iter().any(|e| e.id == id) {
            return Ok(false);
        }
        self.commit(|store| store.expenses.retain(|e| e.id != id))?;
        Ok(true)
    }

    pub fn add_goal(
        &mut self,
        name: &str,
        target_amount: f64,
        deadline: Option<NaiveDate>,
    ) -> Result<u64, StoreError> {
        self.commit(|store| {
            let id = store.allocate_id();
            store.goals.push(SavingsGoal {
                id,
                name: name.to_string(),
                target_amount: target_amount.max(0.0),
                saved_amount: 0.0,
                deadline,
            });
            id
        })
    }

    /// Add to a goal's saved amount; returns the goal's new progress, or
    /// `None` if no goal has that id
    pub fn contribute_to_goal(&mut self, id: u64, amount: f64) -> Result<Option<f64>, StoreError> {
        let Some(index) = self.goals.iter().position(|g| g.id == id) else {
            return Ok(None);
        };
        self.commit(|store| {
            let goal = &mut store.goals[index];
            goal.saved_amount = (goal.saved_amount + amount).max(0.0);
            goal.progress_percentage()
        })
        .map(Some)
    }

    pub fn remove_goal(&mut self, id: u64) -> Result<bool, StoreError> {
        if !self.goals.iter().any(|g| g.id == id) {
            return Ok(false);
        }
        self.commit(|store| store.goals.retain(|g| g.id != id))?;
        Ok(true)
    }

    pub fn summary(&self, month: NaiveDate) -> BudgetSummary {
        summarize(&self.budget, &self.expenses, month)
    }
}
