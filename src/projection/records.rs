//! Year-by-year projection output

use serde::{Deserialize, Serialize};

use crate::numeric::{cagr, ratio_or_zero};

/// One simulated year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    // Timing
    pub year: u32,
    pub age: Option<u32>,
    pub is_extension: bool,

    // Flows during the year
    pub opening_balance: f64,
    pub withdrawn: f64,
    pub contribution: f64,
    pub interest_earned: f64,
    pub lump_sum_contributed: f64,

    // Position at year end
    pub ending_balance: f64,
    pub cumulative_contributed: f64,
    pub cumulative_interest: f64,
    pub inflation_adjusted_balance: Option<f64>,
}

impl YearRecord {
    /// Create an empty record for `year`
    pub fn new(year: u32) -> Self {
        Self {
            year,
            age: None,
            is_extension: false,
            opening_balance: 0.0,
            withdrawn: 0.0,
            contribution: 0.0,
            interest_earned: 0.0,
            lump_sum_contributed: 0.0,
            ending_balance: 0.0,
            cumulative_contributed: 0.0,
            cumulative_interest: 0.0,
            inflation_adjusted_balance: None,
        }
    }

    /// Label for tables: the age when known, otherwise the year number
    pub fn label(&self) -> String {
        match self.age {
            Some(age) => format!("Age {}", age),
            None => format!("Year {}", self.year),
        }
    }
}

/// Summary statistics computed from the last record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub years: u32,
    pub final_balance: f64,
    pub total_contributed: f64,
    pub total_interest: f64,
    pub total_withdrawn: f64,
    /// `final_balance / total_contributed`, 0 when nothing was contributed
    pub wealth_multiplier: f64,
    /// Rate that grows `total_contributed` into `final_balance` over `years`
    pub cagr: f64,
    pub final_inflation_adjusted: Option<f64>,
}

/// Complete projection result
///
/// Built once by the engine and handed to the caller; a parameter change
/// produces a new result rather than mutating this one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Yearly records in increasing `year` order, starting at 1
    pub records: Vec<YearRecord>,

    pub summary: ProjectionSummary,
}

impl ProjectionResult {
    /// Assemble the result and its summary
    ///
    /// `initial_principal` stands in for the summary when no year was simulated.
    pub fn from_records(records: Vec<YearRecord>, initial_principal: f64) -> Self {
        let years = records.len() as u32;
        let total_withdrawn: f64 = records.iter().map(|r| r.withdrawn).sum();

        let (final_balance, total_contributed, total_interest, final_inflation_adjusted) =
            match records.last() {
                Some(last) => (
                    last.ending_balance,
                    last.cumulative_contributed,
                    last.cumulative_interest,
                    last.inflation_adjusted_balance,
                ),
                None => (initial_principal, initial_principal, 0.0, None),
            };

        let summary = ProjectionSummary {
            years,
            final_balance,
            total_contributed,
            total_interest,
            total_withdrawn,
            wealth_multiplier: ratio_or_zero(final_balance, total_contributed),
            cagr: cagr(final_balance, total_contributed, years),
            final_inflation_adjusted,
        };

        Self { records, summary }
    }

    /// Record for a given 1-indexed year
    pub fn record(&self, year: u32) -> Option<&YearRecord> {
        if year == 0 {
            return None;
        }
        self.records.get(year as usize - 1)
    }

    /// Balance at the end of `year`, clamped to the last simulated year
    ///
    /// Year 0 (or an empty projection) yields the opening balance.
    pub fn balance_at(&self, year: u32) -> f64 {
        if year == 0 {
            return self
                .records
                .first()
                .map(|r| r.opening_balance)
                .unwrap_or(self.summary.final_balance);
        }
        match self.record(year).or_else(|| self.records.last()) {
            Some(record) => record.ending_balance,
            None => self.summary.final_balance,
        }
    }

    /// Records at every `interval`-th year plus the final year
    pub fn checkpoints(&self, interval: u32) -> Vec<&YearRecord> {
        let interval = interval.max(1);
        let last_year = self.records.last().map(|r| r.year).unwrap_or(0);
        self.records
            .iter()
            .filter(|r| r.year % interval == 0 || r.year == last_year)
            .collect()
    }
}
