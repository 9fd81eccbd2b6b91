//! End-to-end scenarios driving the public assessment facade with the bundled data files, the
//! same way the HTTP service wires it up.

use std::path::PathBuf;

use ckd_risk::assessment::{
    AgeBaselineTable, ChartKind, IntakeField, RawIntake, RiskAssessor, RiskLevel, RuleTable,
    ViolationKind,
};

fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../data")
        .join(name)
}

fn configured_assessor() -> RiskAssessor {
    let rules = RuleTable::from_path(data_path("rules.json")).expect("bundled rules load");
    let baselines =
        AgeBaselineTable::from_path(data_path("age_baselines.csv")).expect("baselines load");
    RiskAssessor::new(rules).with_baselines(baselines)
}

fn sample_intake() -> RawIntake {
    let raw = std::fs::read_to_string(data_path("sample_intake.json")).expect("sample readable");
    serde_json::from_str(&raw).expect("sample parses")
}

#[test]
fn sample_patient_receives_full_report() {
    let report = configured_assessor()
        .assess(&sample_intake())
        .expect("sample intake is valid");

    let assessment = &report.assessment;
    assert_eq!(assessment.score, 18);
    assert_eq!(assessment.level, RiskLevel::VeryHigh);
    assert_eq!(assessment.percentage, 90.0);

    let ids: Vec<&str> = assessment
        .factors
        .iter()
        .map(|factor| factor.id.as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "diabetes",
            "hypertension-long",
            "age-60-plus",
            "family-history",
            "obesity",
            "symptomatic",
        ]
    );

    let kinds: Vec<ChartKind> = report.charts.iter().map(|chart| chart.kind).collect();
    assert_eq!(
        kinds,
        vec![
            ChartKind::LevelGauge,
            ChartKind::FactorBreakdown,
            ChartKind::AgeCohort,
        ]
    );
}

#[test]
fn assessor_without_baselines_degrades_to_two_charts() {
    let assessor = RiskAssessor::new(RuleTable::canonical());

    let report = assessor.assess(&sample_intake()).expect("valid");

    assert_eq!(report.charts.len(), 2);
    assert_eq!(report.assessment.score, 18);
}

#[test]
fn invalid_intake_surfaces_every_violation() {
    let mut raw = sample_intake();
    raw.age = 200;
    raw.hypertension = false;
    raw.hypertension_duration_years = 3;

    let errors = configured_assessor()
        .assess(&raw)
        .expect_err("intake is invalid");

    let tagged: Vec<(IntakeField, ViolationKind)> = errors
        .violations
        .iter()
        .map(|violation| (violation.field, violation.kind))
        .collect();
    assert_eq!(
        tagged,
        vec![
            (IntakeField::Age, ViolationKind::OutOfRange),
            (
                IntakeField::HypertensionDurationYears,
                ViolationKind::InconsistentField
            ),
        ]
    );
}

#[test]
fn reports_are_stable_across_concurrent_callers() {
    let assessor = std::sync::Arc::new(configured_assessor());
    let expected = assessor.assess(&sample_intake()).expect("valid");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let assessor = assessor.clone();
            std::thread::spawn(move || assessor.assess(&sample_intake()).expect("valid"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().expect("thread completes"), expected);
    }
}
