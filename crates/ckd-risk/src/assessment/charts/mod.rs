//! Chart-ready series derived from a finished assessment. Nothing here adds risk logic; every
//! value is read straight off the assessment or the host's baseline table.

mod baseline;

pub use baseline::{AgeBaseline, AgeBaselineTable, BaselineError};

use serde::{Deserialize, Serialize};

use super::report::RiskAssessment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    LevelGauge,
    FactorBreakdown,
    AgeCohort,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    pub points: Vec<ChartPoint>,
}

impl ChartSeries {
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.value).collect()
    }
}

/// Build the gauge and factor series, plus the age-cohort comparison when `baselines` covers
/// `age`. A missing table or bracket omits the cohort series.
pub fn build_series(
    assessment: &RiskAssessment,
    age: u8,
    baselines: Option<&AgeBaselineTable>,
) -> Vec<ChartSeries> {
    let mut series = vec![level_gauge(assessment), factor_breakdown(assessment)];

    if let Some(cohort) = baselines.and_then(|table| age_cohort(assessment, age, table)) {
        series.push(cohort);
    }

    series
}

fn level_gauge(assessment: &RiskAssessment) -> ChartSeries {
    ChartSeries {
        kind: ChartKind::LevelGauge,
        title: format!("{} risk", assessment.level.label()),
        domain: Some([0.0, 100.0]),
        points: vec![ChartPoint {
            label: assessment.level.as_str().to_string(),
            value: assessment.percentage,
        }],
    }
}

fn factor_breakdown(assessment: &RiskAssessment) -> ChartSeries {
    let max_weight = assessment.factors.iter().map(|factor| factor.weight).max();

    ChartSeries {
        kind: ChartKind::FactorBreakdown,
        title: "Contributing factors".to_string(),
        domain: max_weight.map(|weight| [0.0, f64::from(weight)]),
        points: assessment
            .factors
            .iter()
            .map(|factor| ChartPoint {
                label: factor.label.clone(),
                value: f64::from(factor.weight),
            })
            .collect(),
    }
}

fn age_cohort(
    assessment: &RiskAssessment,
    age: u8,
    baselines: &AgeBaselineTable,
) -> Option<ChartSeries> {
    let bracket = baselines.bracket_for(age)?;

    Some(ChartSeries {
        kind: ChartKind::AgeCohort,
        title: format!("Compared with ages {}", bracket.label),
        domain: Some([0.0, 100.0]),
        points: vec![
            ChartPoint {
                label: "Your risk".to_string(),
                value: assessment.percentage,
            },
            ChartPoint {
                label: format!("Age {} baseline", bracket.label),
                value: bracket.baseline_percentage,
            },
        ],
    })
}
