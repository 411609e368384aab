//! Decision-table recommendation classifier
//!
//! Maps improvement magnitude and total sample size to a qualitative
//! call. The confidence tier here is driven purely by sample size and
//! is intentionally independent of the per-variant significance flags.

use crate::config::IMPROVEMENT_DECISION_THRESHOLD;
use crate::model::{ConfidenceLevel, Improvement, Recommendation, RecommendationLabel};

/// Classify an outcome. Rows are evaluated top to bottom, first match
/// wins:
///
/// 1. sample below half the required size -> need more data, low
///    confidence;
/// 2. improvement above +10% (an undefined improvement over a
///    zero-converting control counts) -> implement the variant;
/// 3. improvement below -10% -> keep the control;
/// 4. otherwise -> no clear winner.
pub fn classify(
    improvement: Improvement,
    total_sample_size: u64,
    required_sample_size: u64,
) -> Recommendation {
    let sample = total_sample_size as f64;
    let required = required_sample_size as f64;

    if sample < 0.5 * required {
        return Recommendation {
            label: RecommendationLabel::NeedMoreData,
            confidence: ConfidenceLevel::Low,
            action_text: "Continue the test until more traffic has been collected".to_string(),
        };
    }

    let confidence = if sample >= required {
        ConfidenceLevel::High
    } else {
        ConfidenceLevel::Medium
    };

    let exceeds_positive = match improvement {
        Improvement::Relative(p) => p > IMPROVEMENT_DECISION_THRESHOLD,
        Improvement::Undefined => true,
    };
    let exceeds_negative = matches!(
        improvement,
        Improvement::Relative(p) if p < -IMPROVEMENT_DECISION_THRESHOLD
    );

    if exceeds_positive {
        Recommendation {
            label: RecommendationLabel::ImplementVariant,
            confidence,
            action_text: "Implement the winning variant: strong positive revenue impact"
                .to_string(),
        }
    } else if exceeds_negative {
        Recommendation {
            label: RecommendationLabel::KeepControl,
            confidence,
            action_text: "Keep the control: the variant shows a significant decline".to_string(),
        }
    } else {
        Recommendation {
            label: RecommendationLabel::NoClearWinner,
            confidence,
            action_text: "No clear winner: the observed differences are not decisive".to_string(),
        }
    }
}
