//! Domain model for A/B test analysis
//!
//! All entities are plain records recomputed from scratch on every
//! invocation. Nothing here caches or mutates across calls.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Business metrics supplied wholesale by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusinessMetrics {
    /// Average pipeline value of one closed deal (currency).
    pub pipeline_value: f64,
    /// Percentage of conversions that close, 0 < x <= 100.
    pub close_rate: f64,
    /// Monthly visitor count the projection scales to.
    pub monthly_visitors: u64,
}

impl BusinessMetrics {
    pub fn new(pipeline_value: f64, close_rate: f64, monthly_visitors: u64) -> Self {
        Self {
            pipeline_value,
            close_rate,
            monthly_visitors,
        }
    }
}

/// Raw experiment counts for a single variant.
///
/// Variants are an ordered list; exactly one entry carries
/// `is_control = true`. Each variant has a stable id so callers can
/// correlate inputs with results without relying on display names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    #[serde(default, alias = "control")]
    pub is_control: bool,
    pub visitors: u64,
    pub conversions: u64,
}

impl Variant {
    /// Create a non-control variant.
    pub fn new(name: impl Into<String>, visitors: u64, conversions: u64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            is_control: false,
            visitors,
            conversions,
        }
    }

    /// Create the control variant.
    pub fn control(name: impl Into<String>, visitors: u64, conversions: u64) -> Self {
        Self {
            is_control: true,
            ..Self::new(name, visitors, conversions)
        }
    }

    /// Counts usable for computation. Optional 3rd/4th variants failing
    /// this check are skipped silently rather than reported.
    pub fn has_valid_counts(&self) -> bool {
        self.visitors > 0 && self.conversions <= self.visitors
    }
}

/// 95% confidence interval bounds, clamped to [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    pub lower: f64,
    pub upper: f64,
}

/// Two-proportion z-test outcome for a variant against the control.
///
/// `z_score` is `None` when the pooled standard error is zero (both
/// proportions sit exactly at 0% or 100%); the flag is still defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Significance {
    pub z_score: Option<f64>,
    pub significant: bool,
}

/// Derived statistics for one variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantResult {
    pub id: Uuid,
    pub name: String,
    pub is_control: bool,
    pub visitors: u64,
    pub conversions: u64,
    /// Conversion rate as a percentage.
    pub rate: f64,
    /// Standard error of the rate, in percentage points.
    pub standard_error: f64,
    pub confidence_interval: ConfidenceInterval,
    /// Projected monthly revenue (currency).
    pub revenue: f64,
    /// None for the control entry.
    pub significance: Option<Significance>,
}

/// Relative improvement of the best variant over the control.
///
/// `Undefined` marks the zero-control-rate edge case: a converting
/// variant measured against a control that never converted has no
/// finite relative improvement, and the engine reports that instead of
/// letting infinity leak through.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "percent", rename_all = "snake_case")]
pub enum Improvement {
    Relative(f64),
    Undefined,
}

impl Improvement {
    /// Relative improvement percent, when defined.
    pub fn as_percent(&self) -> Option<f64> {
        match self {
            Improvement::Relative(p) => Some(*p),
            Improvement::Undefined => None,
        }
    }

    /// Whether the magnitude exceeds `threshold` percentage points.
    /// An undefined improvement counts as exceeding any threshold.
    pub fn magnitude_exceeds(&self, threshold: f64) -> bool {
        match self {
            Improvement::Relative(p) => p.abs() > threshold,
            Improvement::Undefined => true,
        }
    }
}

/// How trustworthy the recommended action is, given significance and
/// magnitude of improvement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        write!(f, "{}", text)
    }
}

/// Aggregate of all variant results plus the test-level verdicts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResults {
    pub variants: Vec<VariantResult>,
    /// Name of the best variant when it beats the control, else the
    /// control's name.
    pub winner: String,
    pub improvement: Improvement,
    pub monthly_revenue_impact: f64,
    pub annual_revenue_impact: f64,
    pub risk_level: RiskLevel,
    /// Total visitors across the included variants.
    pub total_sample_size: u64,
}

/// Qualitative recommendation label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationLabel {
    ImplementVariant,
    KeepControl,
    NoClearWinner,
    NeedMoreData,
}

impl std::fmt::Display for RecommendationLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            RecommendationLabel::ImplementVariant => "Implement Variant",
            RecommendationLabel::KeepControl => "Keep Control",
            RecommendationLabel::NoClearWinner => "No Clear Winner",
            RecommendationLabel::NeedMoreData => "Need More Data",
        };
        write!(f, "{}", text)
    }
}

/// Sample-size confidence tier. Deliberately separate from the
/// per-variant significance flags: one measures how much traffic the
/// test has seen, the other whether an observed difference is likely
/// real.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            ConfidenceLevel::High => "high",
            ConfidenceLevel::Medium => "medium",
            ConfidenceLevel::Low => "low",
        };
        write!(f, "{}", text)
    }
}

/// Actionable recommendation derived from improvement and sample size.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub label: RecommendationLabel,
    pub confidence: ConfidenceLevel,
    pub action_text: String,
}

/// Full engine output consumed by the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub results: TestResults,
    pub recommendation: Recommendation,
    pub generated_at: DateTime<Utc>,
}
