use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::intake::{
    FamilyDisease, IntakeField, Race, RawIntake, Sex, SmokingStatus, Symptom, ValidatedIntake,
};

pub const MIN_AGE: i64 = 18;
pub const MAX_AGE: i64 = 120;

/// Category tag attached to every intake violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    OutOfRange,
    InvalidEnum,
    InconsistentField,
}

/// One violated intake field, suitable for rendering next to the offending form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: IntakeField,
    pub kind: ViolationKind,
    pub message: String,
}

impl ValidationError {
    fn out_of_range(field: IntakeField, message: String) -> Self {
        Self {
            field,
            kind: ViolationKind::OutOfRange,
            message,
        }
    }

    fn invalid_enum(field: IntakeField, value: &str) -> Self {
        Self {
            field,
            kind: ViolationKind::InvalidEnum,
            message: format!("unrecognized value '{}'", value.trim()),
        }
    }

    fn invalid_members(field: IntakeField, values: &[&str]) -> Self {
        let quoted: Vec<String> = values
            .iter()
            .map(|value| format!("'{}'", value.trim()))
            .collect();
        Self {
            field,
            kind: ViolationKind::InvalidEnum,
            message: format!("unrecognized values {}", quoted.join(", ")),
        }
    }

    fn inconsistent(field: IntakeField, governing: IntakeField) -> Self {
        Self {
            field,
            kind: ViolationKind::InconsistentField,
            message: format!("must be empty when {governing} is false"),
        }
    }

    /// A value of the wrong JSON type. Numeric fields report it as out of range, the rest as an
    /// unrecognized value.
    fn malformed(field: IntakeField, value: &str) -> Self {
        match field {
            IntakeField::Age | IntakeField::HypertensionDurationYears | IntakeField::Bmi => Self {
                field,
                kind: ViolationKind::OutOfRange,
                message: format!("expected a number, got {value}"),
            },
            _ => Self {
                field,
                kind: ViolationKind::InvalidEnum,
                message: format!("unrecognized value {value}"),
            },
        }
    }
}

/// Every violation found in a single pass over the intake.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("intake failed validation with {} violation(s)", .violations.len())]
pub struct ValidationErrors {
    pub violations: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn fields(&self) -> Vec<IntakeField> {
        self.violations
            .iter()
            .map(|violation| violation.field)
            .collect()
    }
}

/// Range-check and normalize a raw intake, collecting all violations instead of stopping at the
/// first one. Each field contributes at most one violation.
pub fn validate(raw: &RawIntake) -> Result<ValidatedIntake, ValidationErrors> {
    let mut violations = Vec::new();

    let age = if malformed(raw, IntakeField::Age, &mut violations) {
        None
    } else if (MIN_AGE..=MAX_AGE).contains(&raw.age) {
        u8::try_from(raw.age).ok()
    } else {
        violations.push(ValidationError::out_of_range(
            IntakeField::Age,
            format!("age {} outside {MIN_AGE}-{MAX_AGE}", raw.age),
        ));
        None
    };

    let sex = parse_required(raw, IntakeField::Sex, &raw.sex, Sex::parse, &mut violations);
    let race = parse_required(raw, IntakeField::Race, &raw.race, Race::parse, &mut violations);
    let smoking = parse_required(
        raw,
        IntakeField::Smoking,
        &raw.smoking,
        SmokingStatus::parse,
        &mut violations,
    );

    let hypertension = flag(
        raw,
        IntakeField::Hypertension,
        raw.hypertension,
        &mut violations,
    );
    let hypertension_duration_years =
        if malformed(raw, IntakeField::HypertensionDurationYears, &mut violations) {
            None
        } else {
            match hypertension {
                // governing flag already reported
                None => None,
                Some(true) => match u32::try_from(raw.hypertension_duration_years) {
                    Ok(years) => Some(Some(years)),
                    Err(_) => {
                        violations.push(ValidationError::out_of_range(
                            IntakeField::HypertensionDurationYears,
                            format!(
                                "duration {} must be a non-negative number of years",
                                raw.hypertension_duration_years
                            ),
                        ));
                        None
                    }
                },
                Some(false) if raw.hypertension_duration_years != 0 => {
                    violations.push(ValidationError::inconsistent(
                        IntakeField::HypertensionDurationYears,
                        IntakeField::Hypertension,
                    ));
                    None
                }
                Some(false) => Some(None),
            }
        };

    let diabetes = flag(raw, IntakeField::Diabetes, raw.diabetes, &mut violations);

    let family_history = flag(
        raw,
        IntakeField::FamilyHistory,
        raw.family_history,
        &mut violations,
    );
    let family_diseases = match family_history {
        None => None,
        Some(false)
            if !raw.family_diseases.is_empty()
                && raw.malformed_value(IntakeField::FamilyDiseases).is_none() =>
        {
            violations.push(ValidationError::inconsistent(
                IntakeField::FamilyDiseases,
                IntakeField::FamilyHistory,
            ));
            None
        }
        Some(_) => parse_set(
            raw,
            IntakeField::FamilyDiseases,
            &raw.family_diseases,
            FamilyDisease::parse,
            &mut violations,
        ),
    };

    let bmi = if malformed(raw, IntakeField::Bmi, &mut violations) {
        None
    } else if raw.bmi.is_finite() && raw.bmi > 0.0 {
        Some(raw.bmi)
    } else {
        violations.push(ValidationError::out_of_range(
            IntakeField::Bmi,
            format!("bmi {} must be a positive number", raw.bmi),
        ));
        None
    };

    let cardiovascular_disease = flag(
        raw,
        IntakeField::CardiovascularDisease,
        raw.cardiovascular_disease,
        &mut violations,
    );

    let symptoms = parse_set(
        raw,
        IntakeField::Symptoms,
        &raw.symptoms,
        Symptom::parse,
        &mut violations,
    );

    debug!(violations = violations.len(), "intake validated");

    match (
        age,
        sex,
        race,
        hypertension_duration_years,
        diabetes,
        family_history,
        family_diseases,
        bmi,
        smoking,
        cardiovascular_disease,
        symptoms,
    ) {
        (
            Some(age),
            Some(sex),
            Some(race),
            Some(hypertension_duration_years),
            Some(diabetes),
            Some(family_history),
            Some(family_diseases),
            Some(bmi),
            Some(smoking),
            Some(cardiovascular_disease),
            Some(symptoms),
        ) if violations.is_empty() => Ok(ValidatedIntake::new(
            age,
            sex,
            race,
            hypertension_duration_years,
            diabetes,
            family_history,
            family_diseases,
            bmi,
            smoking,
            cardiovascular_disease,
            symptoms,
        )),
        _ => Err(ValidationErrors { violations }),
    }
}

/// Records a violation when `field` arrived with a value of the wrong type.
fn malformed(raw: &RawIntake, field: IntakeField, violations: &mut Vec<ValidationError>) -> bool {
    match raw.malformed_value(field) {
        Some(value) => {
            violations.push(ValidationError::malformed(field, value));
            true
        }
        None => false,
    }
}

fn flag(
    raw: &RawIntake,
    field: IntakeField,
    value: bool,
    violations: &mut Vec<ValidationError>,
) -> Option<bool> {
    (!malformed(raw, field, violations)).then_some(value)
}

fn parse_required<T>(
    raw: &RawIntake,
    field: IntakeField,
    value: &str,
    parse: impl Fn(&str) -> Option<T>,
    violations: &mut Vec<ValidationError>,
) -> Option<T> {
    if malformed(raw, field, violations) {
        return None;
    }
    let parsed = parse(value);
    if parsed.is_none() {
        violations.push(ValidationError::invalid_enum(field, value));
    }
    parsed
}

fn parse_set<T: Ord>(
    raw: &RawIntake,
    field: IntakeField,
    values: &[String],
    parse: impl Fn(&str) -> Option<T>,
    violations: &mut Vec<ValidationError>,
) -> Option<BTreeSet<T>> {
    if malformed(raw, field, violations) {
        return None;
    }

    let mut parsed = BTreeSet::new();
    let mut unrecognized = Vec::new();

    for value in values {
        match parse(value) {
            Some(member) => {
                parsed.insert(member);
            }
            None => unrecognized.push(value.as_str()),
        }
    }

    match unrecognized.as_slice() {
        [] => Some(parsed),
        [single] => {
            violations.push(ValidationError::invalid_enum(field, single));
            None
        }
        many => {
            violations.push(ValidationError::invalid_members(field, many));
            None
        }
    }
}
