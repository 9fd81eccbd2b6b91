//! CKD risk assessment pipeline.
//!
//! Raw intake flows through [`validate`], the [`ScoringEngine`] (driven by a [`RuleTable`]),
//! [`classify`], and finally [`build_series`]. Every stage is a pure function of its inputs;
//! [`RiskAssessor`] wires them together and [`assessment_router`] serves them over HTTP.

pub mod charts;
pub mod classifier;
pub mod intake;
pub mod metadata;
pub mod report;
pub mod router;
pub mod rules;
pub mod scoring;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use charts::{
    build_series, AgeBaseline, AgeBaselineTable, BaselineError, ChartKind, ChartPoint,
    ChartSeries,
};
pub use classifier::{classify, Classification, RiskLevel};
pub use intake::{
    FamilyDisease, IntakeField, Race, RawIntake, Sex, SmokingStatus, Symptom, ValidatedIntake,
};
pub use metadata::{ToolMetadata, TOOL_METADATA};
pub use report::{AssessmentReport, RiskAssessment};
pub use router::{assessment_router, AssessmentResponse};
pub use rules::{RiskRule, RuleTable, RuleTableDocument, RuleTableError, RuleTrigger};
pub use scoring::{RiskFactor, ScoreBreakdown, ScoringEngine, MAX_SCORE};
pub use service::RiskAssessor;
pub use validation::{validate, ValidationError, ValidationErrors, ViolationKind};
