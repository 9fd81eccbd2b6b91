use super::common::*;
use crate::assessment::charts::{
    build_series, AgeBaseline, AgeBaselineTable, BaselineError, ChartKind,
};
use crate::assessment::report::RiskAssessment;

fn assessment_for(raw: &crate::assessment::intake::RawIntake) -> RiskAssessment {
    RiskAssessment::from_breakdown(engine().score(&validated(raw)))
}

#[test]
fn gauge_carries_percentage_on_fixed_domain() {
    let mut raw = healthy_intake();
    raw.diabetes = true;
    let assessment = assessment_for(&raw);

    let series = build_series(&assessment, 45, None);
    let gauge = &series[0];

    assert_eq!(gauge.kind, ChartKind::LevelGauge);
    assert_eq!(gauge.domain, Some([0.0, 100.0]));
    assert_eq!(gauge.values(), vec![20.0]);
}

#[test]
fn factor_breakdown_follows_factor_order() {
    let assessment = assessment_for(&every_signal_intake());

    let series = build_series(&assessment, 80, None);
    let breakdown = &series[1];

    assert_eq!(breakdown.kind, ChartKind::FactorBreakdown);
    assert_eq!(breakdown.points.len(), assessment.factors.len());
    for (point, factor) in breakdown.points.iter().zip(&assessment.factors) {
        assert_eq!(point.label, factor.label);
        assert_eq!(point.value, f64::from(factor.weight));
    }
    assert_eq!(breakdown.domain, Some([0.0, 5.0]));
}

#[test]
fn empty_breakdown_has_no_domain() {
    let assessment = assessment_for(&healthy_intake());

    let series = build_series(&assessment, 45, None);

    assert!(series[1].points.is_empty());
    assert!(series[1].domain.is_none());
}

#[test]
fn cohort_series_is_omitted_without_baselines() {
    let assessment = assessment_for(&healthy_intake());

    let series = build_series(&assessment, 45, None);

    assert_eq!(series.len(), 2);
    assert!(series
        .iter()
        .all(|chart| chart.kind != ChartKind::AgeCohort));
}

#[test]
fn cohort_series_compares_against_age_bracket() {
    let mut raw = healthy_intake();
    raw.age = 67;
    let assessment = assessment_for(&raw);
    let baselines = baseline_table();

    let series = build_series(&assessment, 67, Some(&baselines));
    let cohort = series.last().expect("cohort series present");

    assert_eq!(cohort.kind, ChartKind::AgeCohort);
    assert_eq!(cohort.values(), vec![15.0, 30.0]);
    assert_eq!(cohort.points[1].label, "Age 60-74 baseline");
}

#[test]
fn cohort_series_is_omitted_when_bracket_missing() {
    let baselines = AgeBaselineTable::new(vec![AgeBaseline {
        min_age: 18,
        max_age: 39,
        label: "18-39".to_string(),
        baseline_score: 1,
        baseline_percentage: 5.0,
    }])
    .expect("table valid");
    let assessment = assessment_for(&healthy_intake());

    let series = build_series(&assessment, 45, Some(&baselines));

    assert_eq!(series.len(), 2);
}

#[test]
fn baseline_lookup_respects_inclusive_bounds() {
    let baselines = baseline_table();

    assert_eq!(baselines.brackets().len(), 4);
    assert_eq!(baselines.bracket_for(18).map(|b| b.label.as_str()), Some("18-39"));
    assert_eq!(baselines.bracket_for(59).map(|b| b.label.as_str()), Some("40-59"));
    assert_eq!(baselines.bracket_for(75).map(|b| b.label.as_str()), Some("75+"));
    assert!(baselines.bracket_for(12).is_none());
}

#[test]
fn baseline_table_rejects_bad_rows() {
    let overlapping = "min_age,max_age,label,baseline_score,baseline_percentage\n\
                       18,50,young,1,5.0\n\
                       40,60,middle,3,15.0\n";
    assert!(matches!(
        AgeBaselineTable::from_reader(overlapping.as_bytes()),
        Err(BaselineError::Overlap { .. })
    ));

    let inverted = "min_age,max_age,label,baseline_score,baseline_percentage\n\
                    60,40,backwards,1,5.0\n";
    assert!(matches!(
        AgeBaselineTable::from_reader(inverted.as_bytes()),
        Err(BaselineError::InvertedBracket { .. })
    ));

    let percentage = "min_age,max_age,label,baseline_score,baseline_percentage\n\
                      18,40,young,1,140.0\n";
    assert!(matches!(
        AgeBaselineTable::from_reader(percentage.as_bytes()),
        Err(BaselineError::PercentageOutOfRange { .. })
    ));

    let malformed = "min_age,max_age,label,baseline_score,baseline_percentage\n\
                     eighteen,40,young,1,5.0\n";
    assert!(matches!(
        AgeBaselineTable::from_reader(malformed.as_bytes()),
        Err(BaselineError::Csv(_))
    ));

    let empty = "min_age,max_age,label,baseline_score,baseline_percentage\n";
    assert!(matches!(
        AgeBaselineTable::from_reader(empty.as_bytes()),
        Err(BaselineError::Empty)
    ));
}
