//! Engine orchestration
//!
//! Ties the pipeline together: validation, per-variant statistics,
//! revenue and significance evaluation, recommendation. Stateless;
//! every call recomputes from scratch.

use chrono::Utc;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::model::{Analysis, BusinessMetrics, Variant};
use crate::{evaluator, recommendation, validation};

/// Run the full analysis over raw inputs.
///
/// Returns [`Error::Validation`] with every violated rule when the
/// input fails validation. Optional 3rd/4th variants with unusable
/// counts are excluded silently; the control and the first challenger
/// are always included (validation guarantees they are usable).
pub fn analyze(
    metrics: &BusinessMetrics,
    variants: &[Variant],
    config: &EngineConfig,
) -> Result<Analysis> {
    let errors = validation::validate(metrics, variants);
    if !errors.is_empty() {
        return Err(Error::Validation(errors));
    }

    let first_challenger = variants.iter().position(|v| !v.is_control);

    let mut results = Vec::with_capacity(variants.len());
    let mut skipped = 0usize;
    for (idx, variant) in variants.iter().enumerate() {
        let mandatory = variant.is_control || Some(idx) == first_challenger;
        if !mandatory && !variant.has_valid_counts() {
            debug!(variant = %variant.name, "Excluding variant with unusable counts");
            skipped += 1;
            continue;
        }
        results.push(evaluator::variant_result(metrics, variant));
    }
    if skipped > 0 {
        info!(skipped, "Excluded additional variants from analysis");
    }

    let results = evaluator::evaluate(results)?;
    let recommendation = recommendation::classify(
        results.improvement,
        results.total_sample_size,
        config.required_sample_size,
    );

    info!(
        winner = %results.winner,
        risk = %results.risk_level,
        label = %recommendation.label,
        confidence = %recommendation.confidence,
        "Analysis complete"
    );

    Ok(Analysis {
        results,
        recommendation,
        generated_at: Utc::now(),
    })
}
