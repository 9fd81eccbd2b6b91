use std::sync::Arc;

use crate::assessment::charts::AgeBaselineTable;
use crate::assessment::intake::{RawIntake, ValidatedIntake};
use crate::assessment::rules::{RiskRule, RuleTable, RuleTrigger};
use crate::assessment::scoring::ScoringEngine;
use crate::assessment::service::RiskAssessor;
use crate::assessment::validation::validate;

pub(super) const BASELINES_CSV: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/age_baselines.csv"));

pub(super) const RULES_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/rules.json"));

/// Intake that triggers no canonical rule.
pub(super) fn healthy_intake() -> RawIntake {
    RawIntake {
        age: 45,
        sex: "female".to_string(),
        race: "white".to_string(),
        hypertension: false,
        hypertension_duration_years: 0,
        diabetes: false,
        family_history: false,
        family_diseases: Vec::new(),
        bmi: 24.0,
        smoking: "never".to_string(),
        cardiovascular_disease: false,
        symptoms: Vec::new(),
        ..RawIntake::default()
    }
}

/// Intake that triggers every canonical rule that can fire together.
pub(super) fn every_signal_intake() -> RawIntake {
    RawIntake {
        age: 80,
        sex: "male".to_string(),
        race: "black".to_string(),
        hypertension: true,
        hypertension_duration_years: 10,
        diabetes: true,
        family_history: true,
        family_diseases: vec!["ckd".to_string(), "diabetes".to_string()],
        bmi: 35.0,
        smoking: "current".to_string(),
        cardiovascular_disease: true,
        symptoms: vec![
            "swelling".to_string(),
            "fatigue".to_string(),
            "blood-in-urine".to_string(),
        ],
        ..RawIntake::default()
    }
}

pub(super) fn validated(raw: &RawIntake) -> ValidatedIntake {
    validate(raw).expect("fixture intake is valid")
}

pub(super) fn engine() -> ScoringEngine {
    ScoringEngine::new(RuleTable::canonical())
}

pub(super) fn baseline_table() -> AgeBaselineTable {
    AgeBaselineTable::from_reader(BASELINES_CSV.as_bytes()).expect("baseline fixture parses")
}

pub(super) fn assessor() -> Arc<RiskAssessor> {
    Arc::new(RiskAssessor::new(RuleTable::canonical()).with_baselines(baseline_table()))
}

pub(super) fn custom_rule(
    id: &str,
    weight: u8,
    trigger: RuleTrigger,
    supersedes: &[&str],
) -> RiskRule {
    RiskRule {
        id: id.to_string(),
        label: format!("{id} label"),
        description: format!("{id} description"),
        weight,
        trigger,
        supersedes: supersedes.iter().map(|target| target.to_string()).collect(),
    }
}

pub(super) fn factor_ids(factors: &[crate::assessment::scoring::RiskFactor]) -> Vec<&str> {
    factors.iter().map(|factor| factor.id.as_str()).collect()
}
