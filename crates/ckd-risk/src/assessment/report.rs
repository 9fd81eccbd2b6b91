use serde::{Deserialize, Serialize};

use super::charts::ChartSeries;
use super::classifier::{classify, RiskLevel};
use super::scoring::{RiskFactor, ScoreBreakdown, MAX_SCORE};

/// Final, immutable result of scoring one intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub score: u8,
    pub level: RiskLevel,
    pub percentage: f64,
    pub factors: Vec<RiskFactor>,
}

impl RiskAssessment {
    pub fn from_breakdown(breakdown: ScoreBreakdown) -> Self {
        let classification = classify(breakdown.total);
        Self {
            score: breakdown.total,
            level: classification.level,
            percentage: classification.percentage,
            factors: breakdown.factors,
        }
    }

    /// Percentage formatted for display, e.g. `"35%"`.
    pub fn formatted_percentage(&self) -> String {
        format!("{:.0}%", self.percentage)
    }

    pub fn summary(&self) -> String {
        let mut summary = format!(
            "{} risk: score {}/{}, {} estimated 5-year probability",
            self.level.label(),
            self.score,
            MAX_SCORE,
            self.formatted_percentage()
        );

        if self.factors.is_empty() {
            summary.push_str(", no contributing factors");
        } else {
            let labels: Vec<&str> = self
                .factors
                .iter()
                .map(|factor| factor.label.as_str())
                .collect();
            summary.push_str(&format!(" ({})", labels.join(", ")));
        }

        summary
    }
}

/// Assessment bundled with the chart series derived from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentReport {
    pub assessment: RiskAssessment,
    pub charts: Vec<ChartSeries>,
}
