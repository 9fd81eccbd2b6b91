use serde::{Deserialize, Serialize};

use super::super::intake::{FamilyDisease, Race, Sex, SmokingStatus, ValidatedIntake};

/// Predicate vocabulary available to rule tables loaded as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum RuleTrigger {
    AgeAtLeast { years: u8 },
    Diabetes,
    HypertensionAtLeast { years: u32 },
    HypertensionUnder { years: u32 },
    FamilyDisease { disease: FamilyDisease },
    BmiAtLeast { value: f64 },
    Smoking { status: SmokingStatus },
    CardiovascularDisease,
    SymptomCountAtLeast { count: usize },
    RaceIn { races: Vec<Race> },
    Sex { sex: Sex },
}

impl RuleTrigger {
    pub fn fires(&self, intake: &ValidatedIntake) -> bool {
        match self {
            RuleTrigger::AgeAtLeast { years } => intake.age() >= *years,
            RuleTrigger::Diabetes => intake.diabetes(),
            RuleTrigger::HypertensionAtLeast { years } => intake
                .hypertension_duration_years()
                .is_some_and(|duration| duration >= *years),
            RuleTrigger::HypertensionUnder { years } => intake
                .hypertension_duration_years()
                .is_some_and(|duration| duration < *years),
            RuleTrigger::FamilyDisease { disease } => {
                intake.family_history() && intake.family_diseases().contains(disease)
            }
            RuleTrigger::BmiAtLeast { value } => intake.bmi() >= *value,
            RuleTrigger::Smoking { status } => intake.smoking() == *status,
            RuleTrigger::CardiovascularDisease => intake.cardiovascular_disease(),
            RuleTrigger::SymptomCountAtLeast { count } => intake.symptoms().len() >= *count,
            RuleTrigger::RaceIn { races } => races.contains(intake.race()),
            RuleTrigger::Sex { sex } => intake.sex() == *sex,
        }
    }

    /// Human-readable condition, used when listing the active rule table.
    pub fn describe(&self) -> String {
        match self {
            RuleTrigger::AgeAtLeast { years } => format!("age >= {years}"),
            RuleTrigger::Diabetes => "diabetes".to_string(),
            RuleTrigger::HypertensionAtLeast { years } => {
                format!("hypertension for >= {years} years")
            }
            RuleTrigger::HypertensionUnder { years } => {
                format!("hypertension for < {years} years")
            }
            RuleTrigger::FamilyDisease { disease } => {
                format!("family history of {}", disease.as_str())
            }
            RuleTrigger::BmiAtLeast { value } => format!("bmi >= {value:.1}"),
            RuleTrigger::Smoking { status } => format!("smoking = {}", status.as_str()),
            RuleTrigger::CardiovascularDisease => "cardiovascular disease".to_string(),
            RuleTrigger::SymptomCountAtLeast { count } => format!("{count}+ symptoms"),
            RuleTrigger::RaceIn { races } => {
                let names: Vec<&str> = races.iter().map(Race::as_str).collect();
                format!("race in [{}]", names.join(", "))
            }
            RuleTrigger::Sex { sex } => format!("sex = {}", sex.as_str()),
        }
    }
}
