use tracing::{debug, info};

use super::charts::{build_series, AgeBaselineTable};
use super::intake::{RawIntake, ValidatedIntake};
use super::report::{AssessmentReport, RiskAssessment};
use super::rules::RuleTable;
use super::scoring::ScoringEngine;
use super::validation::{validate, ValidationErrors};

/// Facade composing validation, scoring, classification and chart building.
///
/// Holds only immutable configuration, so one instance can be shared behind an `Arc` across
/// any number of concurrent requests.
#[derive(Debug, Clone, Default)]
pub struct RiskAssessor {
    engine: ScoringEngine,
    baselines: Option<AgeBaselineTable>,
}

impl RiskAssessor {
    pub fn new(table: RuleTable) -> Self {
        Self {
            engine: ScoringEngine::new(table),
            baselines: None,
        }
    }

    pub fn with_baselines(mut self, baselines: AgeBaselineTable) -> Self {
        self.baselines = Some(baselines);
        self
    }

    pub fn rule_table(&self) -> &RuleTable {
        self.engine.table()
    }

    pub fn baselines(&self) -> Option<&AgeBaselineTable> {
        self.baselines.as_ref()
    }

    /// Validate and score a raw intake.
    pub fn assess(&self, raw: &RawIntake) -> Result<AssessmentReport, ValidationErrors> {
        let intake = validate(raw).inspect_err(|errors| {
            info!(
                violations = errors.violations.len(),
                "intake rejected by validation"
            );
        })?;
        Ok(self.assess_validated(&intake))
    }

    pub fn assess_validated(&self, intake: &ValidatedIntake) -> AssessmentReport {
        let assessment = RiskAssessment::from_breakdown(self.engine.score(intake));
        let charts = build_series(&assessment, intake.age(), self.baselines.as_ref());

        debug!(
            score = assessment.score,
            level = assessment.level.as_str(),
            charts = charts.len(),
            "assessment complete"
        );

        AssessmentReport { assessment, charts }
    }
}
