//! Term insurance cover recommendation and premium estimate

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const MIN_ENTRY_AGE: u32 = 18;
pub const MAX_ENTRY_AGE: u32 = 65;
pub const MIN_TERM_YEARS: u32 = 5;
pub const MAX_TERM_YEARS: u32 = 40;
pub const MAX_MATURITY_AGE: u32 = 85;

const SMOKER_MULTIPLIER: f64 = 1.5;
const FEMALE_MULTIPLIER: f64 = 0.9;
const TERM_LOADING_PER_YEAR: f64 = 0.02;
const REFERENCE_TERM_YEARS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
}

/// Applicant details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermInsuranceInput {
    pub age: u32,
    /// Needed for a cover recommendation; optional otherwise
    pub annual_income: Option<f64>,
    #[serde(default)]
    pub outstanding_liabilities: f64,
    #[serde(default)]
    pub existing_cover: f64,
    #[serde(default)]
    pub smoker: bool,
    pub gender: Gender,
    pub term_years: u32,
    /// Explicit cover; falls back to the recommendation when absent
    #[serde(default)]
    pub sum_assured: Option<f64>,
}

/// Suggested cover amount
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageRecommendation {
    pub income_multiple: f64,
    /// `None` when income was not supplied
    pub recommended_cover: Option<f64>,
    pub advisory: Option<String>,
}

/// Premium quote
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PremiumEstimate {
    pub sum_assured: f64,
    pub rate_per_thousand: f64,
    pub annual_premium: f64,
    pub monthly_premium: f64,
    pub total_premium_over_term: f64,
}

/// Cover as a multiple of annual income, shrinking with age
pub fn income_multiple(age: u32) -> f64 {
    match age {
        0..=29 => 25.0,
        30..=39 => 20.0,
        40..=49 => 15.0,
        _ => 10.0,
    }
}

/// Annual premium per 1000 of cover for a non-smoking male
fn base_rate_per_thousand(age: u32) -> f64 {
    match age {
        0..=30 => 0.8,
        31..=40 => 1.2,
        41..=50 => 2.5,
        51..=60 => 5.0,
        _ => 8.0,
    }
}

/// Income multiple plus liabilities, less cover already held
pub fn recommend_cover(input: &TermInsuranceInput) -> CoverageRecommendation {
    let multiple = income_multiple(input.age);
    match input.annual_income.filter(|income| *income > 0.0) {
        Some(income) => {
            let cover =
                (income * multiple + input.outstanding_liabilities - input.existing_cover).max(0.0);
            let advisory = if cover == 0.0 {
                Some("Existing cover already meets the recommended amount".to_string())
            } else {
                None
            };
            CoverageRecommendation {
                income_multiple: multiple,
                recommended_cover: Some(cover),
                advisory,
            }
        }
        None => CoverageRecommendation {
            income_multiple: multiple,
            recommended_cover: None,
            advisory: Some("Enter your annual income to get a recommended cover amount".to_string()),
        },
    }
}

fn check(field: &'static str, value: u32, min: u32, max: u32) -> Result<(), ValidationError> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field,
            value: value as f64,
            min: min as f64,
            max: max as f64,
        });
    }
    Ok(())
}

/// Estimate premiums for the explicit or recommended sum assured
pub fn estimate_premium(input: &TermInsuranceInput) -> Result<PremiumEstimate, ValidationError> {
    check("age", input.age, MIN_ENTRY_AGE, MAX_ENTRY_AGE)?;
    check("term_years", input.term_years, MIN_TERM_YEARS, MAX_TERM_YEARS)?;
    check("maturity_age", input.age + input.term_years, 0, MAX_MATURITY_AGE)?;

    let sum_assured = input
        .sum_assured
        .or_else(|| recommend_cover(input).recommended_cover)
        .filter(|amount| *amount > 0.0)
        .ok_or(ValidationError::Missing { field: "sum_assured" })?;

    let mut rate = base_rate_per_thousand(input.age);
    if input.smoker {
        rate *= SMOKER_MULTIPLIER;
    }
    if input.gender == Gender::Female {
        rate *= FEMALE_MULTIPLIER;
    }
    rate *= 1.0 + TERM_LOADING_PER_YEAR * (input.term_years as f64 - REFERENCE_TERM_YEARS);

    let annual_premium = sum_assured / 1000.0 * rate;
    Ok(PremiumEstimate {
        sum_assured,
        rate_per_thousand: rate,
        annual_premium,
        monthly_premium: annual_premium / 12.0,
        total_premium_over_term: annual_premium * input.term_years as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn applicant() -> TermInsuranceInput {
        TermInsuranceInput {
            age: 32,
            annual_income: Some(1_200_000.0),
            outstanding_liabilities: 2_000_000.0,
            existing_cover: 5_000_000.0,
            smoker: false,
            gender: Gender::Male,
            term_years: 30,
            sum_assured: None,
        }
    }

    #[test]
    fn test_recommended_cover() {
        let rec = recommend_cover(&applicant());
        assert_eq!(rec.income_multiple, 20.0);
        assert_eq!(rec.recommended_cover, Some(21_000_000.0));
        assert!(rec.advisory.is_none());
    }

    #[test]
    fn test_missing_income_is_advisory() {
        let input = TermInsuranceInput {
            annual_income: None,
            ..applicant()
        };
        let rec = recommend_cover(&input);
        assert_eq!(rec.recommended_cover, None);
        assert!(rec.advisory.is_some());

        assert_eq!(
            estimate_premium(&input),
            Err(ValidationError::Missing { field: "sum_assured" })
        );
    }

    #[test]
    fn test_premium_multipliers() {
        let base = TermInsuranceInput {
            sum_assured: Some(10_000_000.0),
            term_years: 10,
            ..applicant()
        };
        let plain = estimate_premium(&base).unwrap();
        assert_relative_eq!(plain.annual_premium, 12_000.0, epsilon = 1e-6);
        assert_relative_eq!(plain.monthly_premium, 1_000.0, epsilon = 1e-6);

        let smoker = estimate_premium(&TermInsuranceInput { smoker: true, ..base.clone() }).unwrap();
        assert_relative_eq!(smoker.annual_premium, 18_000.0, epsilon = 1e-6);

        let female = estimate_premium(&TermInsuranceInput {
            gender: Gender::Female,
            ..base.clone()
        })
        .unwrap();
        assert_relative_eq!(female.annual_premium, 10_800.0, epsilon = 1e-6);

        let longer = estimate_premium(&TermInsuranceInput { term_years: 20, ..base }).unwrap();
        assert_relative_eq!(longer.annual_premium, 12_000.0 * 1.2, epsilon = 1e-6);
    }

    #[test]
    fn test_age_and_term_bounds() {
        let too_young = TermInsuranceInput { age: 17, ..applicant() };
        assert!(estimate_premium(&too_young).is_err());

        let past_maturity = TermInsuranceInput {
            age: 60,
            term_years: 30,
            ..applicant()
        };
        assert!(matches!(
            estimate_premium(&past_maturity),
            Err(ValidationError::OutOfRange { field: "maturity_age", .. })
        ));
    }
}
