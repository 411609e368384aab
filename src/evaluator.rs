//! Revenue projection and significance evaluation
//!
//! Combines per-variant statistics with business metrics: projects
//! monthly revenue, picks the best challenger, runs pairwise
//! two-proportion z-tests against the control, and classifies risk.

use crate::config::{IMPROVEMENT_RISK_THRESHOLD, Z_95};
use crate::error::{Error, Result};
use crate::model::{
    BusinessMetrics, Improvement, RiskLevel, Significance, TestResults, Variant, VariantResult,
};
use crate::stats;

/// Projected monthly revenue for a variant converting at `rate`.
pub fn projected_revenue(metrics: &BusinessMetrics, rate: f64) -> f64 {
    metrics.monthly_visitors as f64
        * (rate / 100.0)
        * metrics.pipeline_value
        * (metrics.close_rate / 100.0)
}

/// Derive the full per-variant statistics record from raw counts.
pub fn variant_result(metrics: &BusinessMetrics, variant: &Variant) -> VariantResult {
    let rate = stats::conversion_rate(variant.conversions, variant.visitors);
    VariantResult {
        id: variant.id,
        name: variant.name.clone(),
        is_control: variant.is_control,
        visitors: variant.visitors,
        conversions: variant.conversions,
        rate,
        standard_error: stats::standard_error(rate, variant.visitors),
        confidence_interval: stats::confidence_interval(rate, variant.visitors),
        revenue: projected_revenue(metrics, rate),
        significance: None,
    }
}

/// Two-proportion z-test of a variant against the control. A zero
/// pooled standard error leaves the z-score undefined; the flag then
/// reduces to whether the rates differ at all.
fn significance_vs_control(variant: &VariantResult, control: &VariantResult) -> Significance {
    let diff = (variant.rate - control.rate).abs();
    let denom = (variant.standard_error.powi(2) + control.standard_error.powi(2)).sqrt();

    if denom == 0.0 {
        Significance {
            z_score: None,
            significant: diff > 0.0,
        }
    } else {
        let z = diff / denom;
        Significance {
            z_score: Some(z),
            significant: z > Z_95,
        }
    }
}

/// Combine computed variant results into a [`TestResults`] record.
///
/// Fails with [`Error::InsufficientVariants`] when no non-control
/// entry remains, rather than panicking on an empty reduction.
pub fn evaluate(mut variants: Vec<VariantResult>) -> Result<TestResults> {
    let control = variants
        .iter()
        .find(|v| v.is_control)
        .cloned()
        .ok_or(Error::MissingControl)?;

    for variant in variants.iter_mut().filter(|v| !v.is_control) {
        variant.significance = Some(significance_vs_control(variant, &control));
    }

    // Best challenger by rate; ties keep the first-encountered entry.
    let best = variants
        .iter()
        .filter(|v| !v.is_control)
        .fold(None::<&VariantResult>, |acc, v| match acc {
            Some(b) if v.rate > b.rate => Some(v),
            Some(b) => Some(b),
            None => Some(v),
        })
        .cloned()
        .ok_or(Error::InsufficientVariants)?;

    let improvement = if control.rate == 0.0 {
        if best.rate > 0.0 {
            Improvement::Undefined
        } else {
            Improvement::Relative(0.0)
        }
    } else {
        Improvement::Relative(100.0 * (best.rate - control.rate) / control.rate)
    };

    let monthly_revenue_impact = best.revenue - control.revenue;
    let annual_revenue_impact = monthly_revenue_impact * 12.0;

    let all_significant = variants
        .iter()
        .filter(|v| !v.is_control)
        .all(|v| v.significance.map(|s| s.significant).unwrap_or(false));

    let risk_level = if all_significant {
        if improvement.magnitude_exceeds(IMPROVEMENT_RISK_THRESHOLD) {
            RiskLevel::Low
        } else {
            RiskLevel::Medium
        }
    } else {
        RiskLevel::High
    };

    let winner = if best.rate > control.rate {
        best.name.clone()
    } else {
        control.name.clone()
    };

    let total_sample_size = variants.iter().map(|v| v.visitors).sum();

    Ok(TestResults {
        variants,
        winner,
        improvement,
        monthly_revenue_impact,
        annual_revenue_impact,
        risk_level,
        total_sample_size,
    })
}
