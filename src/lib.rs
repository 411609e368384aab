//! A/B Test ROI Calculator Library
//!
//! This library provides tools to:
//! - Validate business metrics and raw experiment counts
//! - Compute per-variant conversion rate, standard error and 95% confidence interval
//! - Project monthly and annual revenue impact against the control
//! - Run pairwise two-proportion z-tests and classify risk
//! - Map improvement and sample size to an actionable recommendation
//! - Render text reports and export results as CSV or JSON

pub mod config;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod model;
pub mod recommendation;
pub mod report;
pub mod stats;
pub mod validation;

// Re-export common types
pub use config::{EngineConfig, Scenario, REQUIRED_SAMPLE_SIZE, Z_95};
pub use engine::analyze;
pub use error::{Error, Result};
pub use model::{
    Analysis, BusinessMetrics, ConfidenceInterval, ConfidenceLevel, Improvement, Recommendation,
    RecommendationLabel, RiskLevel, Significance, TestResults, Variant, VariantResult,
};
pub use validation::{validate, ValidationError};
