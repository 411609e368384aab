//! Closed-form statistics for conversion proportions
//!
//! Pure, total functions: zero-visitor inputs resolve to zero-valued
//! sentinels instead of NaN or infinity.

use crate::config::Z_95;
use crate::model::ConfidenceInterval;

/// Conversion rate as a percentage. Zero visitors yields zero by
/// convention.
pub fn conversion_rate(conversions: u64, visitors: u64) -> f64 {
    if visitors == 0 {
        return 0.0;
    }
    100.0 * conversions as f64 / visitors as f64
}

/// Standard error of a proportion, in percentage points.
pub fn standard_error(rate: f64, visitors: u64) -> f64 {
    if visitors == 0 {
        return 0.0;
    }
    let p = rate / 100.0;
    (p * (1.0 - p) / visitors as f64).sqrt() * 100.0
}

/// 95% normal-approximation confidence interval around `rate`, bounds
/// clamped to [0, 100].
pub fn confidence_interval(rate: f64, visitors: u64) -> ConfidenceInterval {
    let se = standard_error(rate, visitors);
    ConfidenceInterval {
        lower: (rate - Z_95 * se).max(0.0),
        upper: (rate + Z_95 * se).min(100.0),
    }
}
