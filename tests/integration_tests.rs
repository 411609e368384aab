//! Integration tests for the ab_calculator library
//!
//! These tests verify the public API and module interactions.

use std::io::Write;

use tempfile::NamedTempFile;

use ab_calculator::{
    analyze, report, validate, BusinessMetrics, ConfidenceLevel, EngineConfig, Error, Improvement,
    RecommendationLabel, Result, RiskLevel, Scenario, Variant, REQUIRED_SAMPLE_SIZE, Z_95,
};

fn reference_metrics() -> BusinessMetrics {
    BusinessMetrics::new(1000.0, 20.0, 10_000)
}

fn reference_variants() -> Vec<Variant> {
    vec![
        Variant::control("Control", 1000, 100),
        Variant::new("Variant", 1000, 150),
    ]
}

// ============================================================================
// Config Tests
// ============================================================================

#[test]
fn test_constants() {
    assert_eq!(REQUIRED_SAMPLE_SIZE, 10_000);
    assert_eq!(Z_95, 1.96);
}

#[test]
fn test_engine_config_default_and_builder() {
    let config = EngineConfig::default();
    assert_eq!(config.required_sample_size, REQUIRED_SAMPLE_SIZE);

    let config = config.with_required_sample_size(2_500);
    assert_eq!(config.required_sample_size, 2_500);
}

// ============================================================================
// Error Tests
// ============================================================================

#[test]
fn test_error_variants_display() {
    let errors = vec![
        Error::ScenarioNotFound("test.yml".into()),
        Error::UnsupportedFormat("toml".into()),
        Error::InsufficientVariants,
        Error::MissingControl,
        Error::SerializationError("json error".into()),
        Error::ExportError("csv error".into()),
        Error::InvalidArgument("bad arg".into()),
    ];

    for err in errors {
        let msg = err.to_string();
        assert!(!msg.is_empty(), "Error message should not be empty");
    }
}

#[test]
fn test_result_type_alias() {
    fn returns_ok() -> Result<i32> {
        Ok(42)
    }

    fn returns_err() -> Result<i32> {
        Err(Error::InsufficientVariants)
    }

    assert!(returns_ok().is_ok());
    assert!(returns_err().is_err());
}

// ============================================================================
// End-to-end Analysis Tests
// ============================================================================

#[test]
fn test_reference_scenario_end_to_end() {
    let analysis = analyze(
        &reference_metrics(),
        &reference_variants(),
        &EngineConfig::default(),
    )
    .unwrap();

    let results = &analysis.results;
    assert_eq!(results.winner, "Variant");
    assert_eq!(results.improvement, Improvement::Relative(50.0));
    assert!(results.monthly_revenue_impact > 0.0);
    assert_eq!(
        results.annual_revenue_impact,
        results.monthly_revenue_impact * 12.0
    );

    // Per-variant statistics are well-formed.
    for v in &results.variants {
        assert!((0.0..=100.0).contains(&v.rate));
        assert!(v.confidence_interval.lower <= v.rate);
        assert!(v.confidence_interval.upper >= v.rate);
        assert!(v.confidence_interval.lower >= 0.0);
        assert!(v.confidence_interval.upper <= 100.0);
    }
}

#[test]
fn test_validation_errors_are_collected() {
    let metrics = BusinessMetrics::new(-1.0, 150.0, 0);
    let err = analyze(&metrics, &reference_variants(), &EngineConfig::default()).unwrap_err();

    match err {
        Error::Validation(errors) => {
            let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
            assert!(fields.contains(&"pipeline_value"));
            assert!(fields.contains(&"close_rate"));
            assert!(fields.contains(&"monthly_visitors"));
        }
        other => panic!("expected Validation, got {:?}", other),
    }
}

#[test]
fn test_control_visitors_zero_is_rejected() {
    let variants = vec![
        Variant::control("Control", 0, 0),
        Variant::new("Variant", 1000, 150),
    ];
    let errors = validate(&reference_metrics(), &variants);
    assert!(errors.iter().any(|e| e.field == "control_visitors"));
}

#[test]
fn test_conversions_exceeding_visitors_rejected() {
    let variants = vec![
        Variant::control("Control", 1000, 100),
        Variant::new("Variant", 100, 150),
    ];
    let errors = validate(&reference_metrics(), &variants);
    assert!(errors.iter().any(|e| e.field == "variant_conversions"));
}

#[test]
fn test_third_variant_with_zero_visitors_is_excluded_silently() {
    let mut variants = reference_variants();
    variants.push(Variant::new("Variant C", 0, 0));

    assert!(validate(&reference_metrics(), &variants).is_empty());

    let analysis = analyze(&reference_metrics(), &variants, &EngineConfig::default()).unwrap();
    assert_eq!(analysis.results.variants.len(), 2);
}

#[test]
fn test_identical_rates_mean_no_significance() {
    let variants = vec![
        Variant::control("Control", 2000, 200),
        Variant::new("B", 2000, 200),
        Variant::new("C", 2000, 200),
    ];
    let analysis = analyze(&reference_metrics(), &variants, &EngineConfig::default()).unwrap();

    assert_eq!(analysis.results.improvement, Improvement::Relative(0.0));
    for v in analysis.results.variants.iter().filter(|v| !v.is_control) {
        assert!(!v.significance.unwrap().significant);
    }
    assert_eq!(analysis.results.risk_level, RiskLevel::High);
}

#[test]
fn test_recommendation_table_reference_row() {
    // improvement 15%, sample 12000, required 10000 -> high / implement.
    let variants = vec![
        Variant::control("Control", 6000, 600),
        Variant::new("Variant", 6000, 690),
    ];
    let analysis = analyze(&reference_metrics(), &variants, &EngineConfig::default()).unwrap();

    assert_eq!(analysis.results.total_sample_size, 12_000);
    assert_eq!(analysis.results.improvement, Improvement::Relative(15.0));
    assert_eq!(
        analysis.recommendation.label,
        RecommendationLabel::ImplementVariant
    );
    assert_eq!(analysis.recommendation.confidence, ConfidenceLevel::High);
}

#[test]
fn test_zero_control_rate_flagged_not_infinite() {
    let variants = vec![
        Variant::control("Control", 1000, 0),
        Variant::new("Variant", 1000, 50),
    ];
    let analysis = analyze(&reference_metrics(), &variants, &EngineConfig::default()).unwrap();

    assert_eq!(analysis.results.improvement, Improvement::Undefined);
    assert!(analysis.results.improvement.as_percent().is_none());
    assert!(analysis.results.monthly_revenue_impact.is_finite());
}

// ============================================================================
// Scenario File Tests
// ============================================================================

#[test]
fn test_scenario_loads_from_yaml_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".yml")
        .tempfile()
        .unwrap();
    write!(
        file,
        r#"
metrics:
  pipeline_value: 1000
  close_rate: 20
  monthly_visitors: 10000
variants:
  - name: Control
    control: true
    visitors: 1000
    conversions: 100
  - name: Variant
    visitors: 1000
    conversions: 150
"#
    )
    .unwrap();

    let scenario = Scenario::load_from_file(file.path()).unwrap();
    assert_eq!(scenario.variants.len(), 2);

    let analysis = analyze(
        &scenario.metrics,
        &scenario.variants,
        &EngineConfig::default(),
    )
    .unwrap();
    assert_eq!(analysis.results.winner, "Variant");
}

#[test]
fn test_scenario_loads_from_json_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .unwrap();
    write!(
        file,
        r#"{{
  "metrics": {{"pipeline_value": 1000, "close_rate": 20, "monthly_visitors": 10000}},
  "variants": [
    {{"name": "Control", "control": true, "visitors": 1000, "conversions": 100}},
    {{"name": "Variant", "visitors": 1000, "conversions": 150}}
  ]
}}"#
    )
    .unwrap();

    let scenario = Scenario::load_from_file(file.path()).unwrap();
    assert_eq!(scenario.metrics.monthly_visitors, 10_000);
    assert!(scenario.variants[0].is_control);
}

#[test]
fn test_scenario_rejects_unknown_extension() {
    let file = NamedTempFile::new().unwrap();
    let path = file.path().with_extension("toml");
    std::fs::write(&path, "metrics = 1").unwrap();

    let err = Scenario::load_from_file(&path).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat(_)));
    std::fs::remove_file(&path).ok();
}

#[test]
fn test_scenario_template_analyzes_cleanly() {
    let scenario = Scenario::template();
    let analysis = analyze(
        &scenario.metrics,
        &scenario.variants,
        &EngineConfig::default(),
    )
    .unwrap();
    assert_eq!(analysis.results.winner, "Variant B");
}

// ============================================================================
// Report & Export Tests
// ============================================================================

#[test]
fn test_report_renders_all_sections() {
    let analysis = analyze(
        &reference_metrics(),
        &reference_variants(),
        &EngineConfig::default(),
    )
    .unwrap();
    let rendered = report::render_report(&analysis);

    assert!(rendered.contains("A/B test report"));
    assert!(rendered.contains("Winner:"));
    assert!(rendered.contains("Improvement:"));
    assert!(rendered.contains("Risk level:"));
    assert!(rendered.contains("Recommendation:"));
}

#[test]
fn test_csv_export_row_per_variant() {
    let analysis = analyze(
        &reference_metrics(),
        &reference_variants(),
        &EngineConfig::default(),
    )
    .unwrap();

    let mut buffer = Vec::new();
    report::write_csv(&analysis, &mut buffer).unwrap();
    let text = String::from_utf8(buffer).unwrap();

    assert_eq!(text.lines().count(), 3); // header + 2 variants
    assert!(text.contains("Control"));
    assert!(text.contains("Variant"));
}

#[test]
fn test_json_export_round_trips() {
    let analysis = analyze(
        &reference_metrics(),
        &reference_variants(),
        &EngineConfig::default(),
    )
    .unwrap();

    let json = report::to_json(&analysis).unwrap();
    let parsed: ab_calculator::Analysis = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.results.winner, analysis.results.winner);
    assert_eq!(parsed.recommendation.label, analysis.recommendation.label);
}
