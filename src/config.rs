//! Engine constants and scenario loading
//!
//! Loads test scenarios from YAML or JSON files. Environment variables
//! take precedence over built-in defaults.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::{BusinessMetrics, Variant};

/// z value for a 95% two-sided normal interval.
pub const Z_95: f64 = 1.96;

/// Sample size a test should reach before a confident call.
pub const REQUIRED_SAMPLE_SIZE: u64 = 10_000;

/// Relative improvement (percent) beyond which the classifier calls
/// implement / keep-control instead of no-clear-winner.
pub const IMPROVEMENT_DECISION_THRESHOLD: f64 = 10.0;

/// Improvement magnitude (percent) separating low from medium risk when
/// every variant is individually significant.
pub const IMPROVEMENT_RISK_THRESHOLD: f64 = 20.0;

/// A test carries the control plus 1 to 3 challengers.
pub const MIN_VARIANTS: usize = 2;
pub const MAX_VARIANTS: usize = 4;

/// Tunable knobs of the engine.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub required_sample_size: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            required_sample_size: REQUIRED_SAMPLE_SIZE,
        }
    }
}

impl EngineConfig {
    /// Build a config from the environment, falling back to defaults.
    pub fn from_env() -> Self {
        let required_sample_size = std::env::var("AB_REQUIRED_SAMPLE_SIZE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(REQUIRED_SAMPLE_SIZE);

        Self {
            required_sample_size,
        }
    }

    pub fn with_required_sample_size(mut self, required_sample_size: u64) -> Self {
        self.required_sample_size = required_sample_size;
        self
    }
}

/// A scenario file: business metrics plus 2-4 variants, one of them
/// the control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub metrics: BusinessMetrics,
    pub variants: Vec<Variant>,
}

impl Scenario {
    /// Load a scenario from a YAML or JSON file, chosen by extension.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ScenarioNotFound(path.display().to_string()));
        }

        let raw = fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yml") | Some("yaml") => Ok(serde_yaml::from_str(&raw)?),
            Some("json") => Ok(serde_json::from_str(&raw)?),
            other => Err(Error::UnsupportedFormat(
                other.unwrap_or("(none)").to_string(),
            )),
        }
    }

    /// Starter scenario for the `template` command.
    pub fn template() -> Self {
        Self {
            metrics: BusinessMetrics::new(1000.0, 20.0, 10_000),
            variants: vec![
                Variant::control("Control", 1000, 100),
                Variant::new("Variant B", 1000, 150),
            ],
        }
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(Z_95, 1.96);
        assert_eq!(REQUIRED_SAMPLE_SIZE, 10_000);
        assert_eq!(MIN_VARIANTS, 2);
        assert_eq!(MAX_VARIANTS, 4);
        assert!(IMPROVEMENT_DECISION_THRESHOLD < IMPROVEMENT_RISK_THRESHOLD);
    }

    #[test]
    fn test_engine_config_default() {
        let config = EngineConfig::default();
        assert_eq!(config.required_sample_size, REQUIRED_SAMPLE_SIZE);
    }

    #[test]
    fn test_engine_config_builder() {
        let config = EngineConfig::default().with_required_sample_size(500);
        assert_eq!(config.required_sample_size, 500);
    }

    #[test]
    fn test_scenario_template_is_sane() {
        let scenario = Scenario::template();
        assert_eq!(scenario.variants.len(), 2);
        assert_eq!(
            scenario.variants.iter().filter(|v| v.is_control).count(),
            1
        );
        assert!(scenario.metrics.pipeline_value > 0.0);
    }

    #[test]
    fn test_scenario_yaml_round_trip() {
        let scenario = Scenario::template();
        let yaml = scenario.to_yaml().unwrap();
        let parsed: Scenario = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.variants.len(), scenario.variants.len());
        assert_eq!(parsed.variants[0].id, scenario.variants[0].id);
        assert_eq!(parsed.metrics.monthly_visitors, 10_000);
    }

    #[test]
    fn test_scenario_load_missing_file() {
        let err = Scenario::load_from_file("does_not_exist_12345.yml").unwrap_err();
        assert!(matches!(err, Error::ScenarioNotFound(_)));
    }

    #[test]
    fn test_scenario_yaml_without_ids() {
        let yaml = r#"
metrics:
  pipeline_value: 1000
  close_rate: 20
  monthly_visitors: 10000
variants:
  - name: Control
    control: true
    visitors: 1000
    conversions: 100
  - name: Variant B
    visitors: 1000
    conversions: 150
"#;
        let scenario: Scenario = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(scenario.variants.len(), 2);
        assert!(scenario.variants[0].is_control);
        assert!(!scenario.variants[1].is_control);
        assert!(!scenario.variants[0].id.is_nil());
    }
}
