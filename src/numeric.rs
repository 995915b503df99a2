//! Small rate-conversion and guarded-division helpers shared by the engine and metrics

/// Compounding steps per simulated year
pub const PERIODS_PER_YEAR: u32 = 12;

/// `numerator / denominator`, or 0 when the result would not be finite
pub fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let value = numerator / denominator;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Effective monthly rate equivalent to an annual percentage rate
///
/// `(1 + annual/100)^(1/12) - 1`, so twelve monthly steps reproduce the
/// annual rate exactly.
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    (1.0 + annual_rate_percent / 100.0).powf(1.0 / PERIODS_PER_YEAR as f64) - 1.0
}

/// `count` as a `powi` exponent, saturating at `i32::MAX`
pub fn exponent(count: u32) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

/// Value of `amount` after `years` of annual compounding at `rate_percent`
pub fn compound(amount: f64, rate_percent: f64, years: u32) -> f64 {
    amount * (1.0 + rate_percent / 100.0).powi(exponent(years))
}

/// Express `amount` in year-0 money given annual inflation
pub fn inflation_adjusted(amount: f64, inflation_rate_percent: f64, years: u32) -> f64 {
    let factor = (1.0 + inflation_rate_percent / 100.0).powi(exponent(years));
    ratio_or_zero(amount, factor)
}

/// Compound annual growth rate turning `start` into `end` over `years`
///
/// Zero whenever the ratio is undefined (non-positive values or no years).
pub fn cagr(end: f64, start: f64, years: u32) -> f64 {
    if years == 0 || start <= 0.0 || end <= 0.0 {
        return 0.0;
    }
    (end / start).powf(1.0 / years as f64) - 1.0
}
