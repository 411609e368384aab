//! Business-rule validation for scenarios
//!
//! Violations are collected, not fail-fast: the caller gets every
//! broken rule in one pass. Only the control and the first challenger
//! are mandatory; extra variants with unusable counts are excluded
//! later during computation instead of being reported here.

use std::fmt;

use serde::Serialize;

use crate::config::{MAX_VARIANTS, MIN_VARIANTS};
use crate::model::{BusinessMetrics, Variant};

/// A single violated constraint, keyed by the input field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check business metrics and variants against all rules. An empty
/// result means the input is valid. Pure function, no side effects.
pub fn validate(metrics: &BusinessMetrics, variants: &[Variant]) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if !metrics.pipeline_value.is_finite() || metrics.pipeline_value <= 0.0 {
        errors.push(ValidationError::new(
            "pipeline_value",
            "pipeline value must be greater than zero",
        ));
    }
    if !metrics.close_rate.is_finite()
        || metrics.close_rate <= 0.0
        || metrics.close_rate > 100.0
    {
        errors.push(ValidationError::new(
            "close_rate",
            "close rate must be between 0 (exclusive) and 100",
        ));
    }
    if metrics.monthly_visitors == 0 {
        errors.push(ValidationError::new(
            "monthly_visitors",
            "monthly visitors must be greater than zero",
        ));
    }

    if variants.len() < MIN_VARIANTS || variants.len() > MAX_VARIANTS {
        errors.push(ValidationError::new(
            "variants",
            format!(
                "a test needs between {} and {} variants, got {}",
                MIN_VARIANTS,
                MAX_VARIANTS,
                variants.len()
            ),
        ));
    }

    let control_count = variants.iter().filter(|v| v.is_control).count();
    if control_count != 1 {
        errors.push(ValidationError::new(
            "variants",
            format!("exactly one control variant is required, got {}", control_count),
        ));
    }

    if let Some(control) = variants.iter().find(|v| v.is_control) {
        check_counts(control, "control", &mut errors);
    }
    if let Some(first) = variants.iter().find(|v| !v.is_control) {
        check_counts(first, "variant", &mut errors);
    }

    errors
}

fn check_counts(variant: &Variant, prefix: &str, errors: &mut Vec<ValidationError>) {
    if variant.visitors == 0 {
        errors.push(ValidationError::new(
            format!("{}_visitors", prefix),
            format!("{} must have at least one visitor", variant.name),
        ));
    }
    if variant.conversions > variant.visitors {
        errors.push(ValidationError::new(
            format!("{}_conversions", prefix),
            format!("{}: conversions cannot exceed visitors", variant.name),
        ));
    }
}
