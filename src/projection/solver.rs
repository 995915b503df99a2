//! Required-contribution solving for goal planning
//!
//! The closed form covers the plain fixed-contribution case; the bisection
//! search runs the full engine, so it also honours step-up strategies and
//! scheduled events.

use super::engine::ProjectionEngine;
use crate::numeric::{exponent, monthly_rate, PERIODS_PER_YEAR};
use crate::params::ProjectionParameters;

/// Monthly instalment that grows to `target` after `years`
///
/// Instalments are deposited at the start of each month and grow at the
/// effective monthly equivalent of `annual_rate_percent`, matching the
/// engine's compounding. `initial_principal` grows alongside them.
pub fn required_monthly_contribution(
    target: f64,
    years: u32,
    annual_rate_percent: f64,
    initial_principal: f64,
) -> f64 {
    if years == 0 {
        return (target - initial_principal).max(0.0);
    }

    let i = monthly_rate(annual_rate_percent);
    let n = exponent(years.saturating_mul(PERIODS_PER_YEAR));
    let growth = (1.0 + i).powi(n);
    if !growth.is_finite() {
        return 0.0;
    }
    let remaining = target - initial_principal * growth;
    if remaining <= 0.0 {
        return 0.0;
    }

    let annuity_factor = if i.abs() < 1e-15 {
        n as f64
    } else {
        (growth - 1.0) / i * (1.0 + i)
    };
    remaining / annuity_factor
}

/// Base periodic contribution that reaches `target` by the end of `year`
///
/// Returns `Some(0.0)` when the target is already met without contributions,
/// and `None` when even `max_contribution` falls short.
pub fn solve_base_contribution(
    engine: &ProjectionEngine,
    params: &ProjectionParameters,
    target: f64,
    year: u32,
    max_contribution: f64,
) -> Option<f64> {
    let value_at = |contribution: f64| {
        let candidate = ProjectionParameters {
            periodic_contribution: contribution,
            ..params.clone()
        };
        engine.project(&candidate).balance_at(year)
    };

    if value_at(0.0) >= target {
        return Some(0.0);
    }
    if value_at(max_contribution) < target {
        return None;
    }

    let mut low = 0.0_f64;
    let mut high = max_contribution;
    let tolerance = 0.01;
    let max_iterations = 200;

    for _ in 0..max_iterations {
        if high - low < tolerance {
            break;
        }
        let mid = (low + high) / 2.0;
        if value_at(mid) >= target {
            high = mid;
        } else {
            low = mid;
        }
    }

    // Upper end of the bracket always reaches the target
    Some(high)
}
