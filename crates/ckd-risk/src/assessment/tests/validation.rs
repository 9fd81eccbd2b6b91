use super::common::*;
use crate::assessment::intake::{FamilyDisease, IntakeField, Race, RawIntake, Sex, Symptom};
use crate::assessment::validation::{validate, ViolationKind};

#[test]
fn accepts_well_formed_intake() {
    let intake = validate(&healthy_intake()).expect("healthy intake validates");

    assert_eq!(intake.age(), 45);
    assert_eq!(intake.sex(), Sex::Female);
    assert_eq!(intake.race(), &Race::White);
    assert!(!intake.has_hypertension());
    assert_eq!(intake.hypertension_duration_years(), None);
    assert!(intake.family_diseases().is_empty());
    assert!(intake.symptoms().is_empty());
}

#[test]
fn reports_out_of_range_age_and_inconsistent_duration_together() {
    let mut raw = healthy_intake();
    raw.age = 200;
    raw.hypertension = false;
    raw.hypertension_duration_years = 3;

    let errors = validate(&raw).expect_err("intake is invalid");

    assert_eq!(errors.violations.len(), 2);
    assert_eq!(errors.violations[0].field, IntakeField::Age);
    assert_eq!(errors.violations[0].kind, ViolationKind::OutOfRange);
    assert_eq!(
        errors.violations[1].field,
        IntakeField::HypertensionDurationYears
    );
    assert_eq!(errors.violations[1].kind, ViolationKind::InconsistentField);
}

#[test]
fn age_bounds_are_inclusive() {
    for age in [18, 120] {
        let mut raw = healthy_intake();
        raw.age = age;
        assert!(validate(&raw).is_ok(), "age {age} should validate");
    }

    for age in [17, 121, -4] {
        let mut raw = healthy_intake();
        raw.age = age;
        let errors = validate(&raw).expect_err("age outside range");
        assert_eq!(errors.fields(), vec![IntakeField::Age]);
    }
}

#[test]
fn flags_every_unrecognized_enum_value() {
    let mut raw = healthy_intake();
    raw.sex = "unknown".to_string();
    raw.smoking = "sometimes".to_string();
    raw.symptoms = vec!["swelling".to_string(), "hiccups".to_string()];

    let errors = validate(&raw).expect_err("intake is invalid");

    assert_eq!(
        errors.fields(),
        vec![IntakeField::Sex, IntakeField::Smoking, IntakeField::Symptoms]
    );
    assert!(errors
        .violations
        .iter()
        .all(|violation| violation.kind == ViolationKind::InvalidEnum));
    assert!(errors.violations[2].message.contains("hiccups"));
}

#[test]
fn race_is_an_open_set_but_must_be_present() {
    let mut raw = healthy_intake();
    raw.race = "Pacific Islander".to_string();
    let intake = validate(&raw).expect("unlisted race is accepted");
    assert_eq!(intake.race(), &Race::Other("pacific-islander".to_string()));

    raw.race = "   ".to_string();
    let errors = validate(&raw).expect_err("blank race rejected");
    assert_eq!(errors.fields(), vec![IntakeField::Race]);
    assert_eq!(errors.violations[0].kind, ViolationKind::InvalidEnum);
}

#[test]
fn family_diseases_require_family_history() {
    let mut raw = healthy_intake();
    raw.family_diseases = vec!["ckd".to_string()];

    let errors = validate(&raw).expect_err("inconsistent family history");

    assert_eq!(errors.violations.len(), 1);
    assert_eq!(errors.violations[0].field, IntakeField::FamilyDiseases);
    assert_eq!(errors.violations[0].kind, ViolationKind::InconsistentField);
}

#[test]
fn inconsistent_family_diseases_are_not_also_reported_as_invalid() {
    let mut raw = healthy_intake();
    raw.family_diseases = vec!["gout".to_string()];

    let errors = validate(&raw).expect_err("inconsistent family history");

    assert_eq!(errors.violations.len(), 1);
    assert_eq!(errors.violations[0].kind, ViolationKind::InconsistentField);
}

#[test]
fn negative_hypertension_duration_is_out_of_range() {
    let mut raw = healthy_intake();
    raw.hypertension = true;
    raw.hypertension_duration_years = -1;

    let errors = validate(&raw).expect_err("negative duration");

    assert_eq!(errors.fields(), vec![IntakeField::HypertensionDurationYears]);
    assert_eq!(errors.violations[0].kind, ViolationKind::OutOfRange);
}

#[test]
fn bmi_must_be_positive_and_finite() {
    for bmi in [0.0, -3.5, f64::NAN, f64::INFINITY] {
        let mut raw = healthy_intake();
        raw.bmi = bmi;
        let errors = validate(&raw).expect_err("bmi rejected");
        assert_eq!(errors.fields(), vec![IntakeField::Bmi]);
        assert_eq!(errors.violations[0].kind, ViolationKind::OutOfRange);
    }
}

#[test]
fn normalizes_case_separators_and_duplicates() {
    let mut raw = healthy_intake();
    raw.sex = " MALE ".to_string();
    raw.smoking = "Current".to_string();
    raw.family_history = true;
    raw.family_diseases = vec!["CKD".to_string(), "ckd".to_string()];
    raw.symptoms = vec![
        "Frequent_Urination".to_string(),
        "blood in urine".to_string(),
        "frequent-urination".to_string(),
    ];

    let intake = validate(&raw).expect("normalized intake validates");

    assert_eq!(intake.sex(), Sex::Male);
    assert_eq!(intake.family_diseases().len(), 1);
    assert!(intake.family_diseases().contains(&FamilyDisease::Ckd));
    assert_eq!(
        intake.symptoms().iter().copied().collect::<Vec<_>>(),
        vec![Symptom::FrequentUrination, Symptom::BloodInUrine]
    );
}

#[test]
fn empty_record_reports_every_missing_field() {
    let errors = validate(&RawIntake::default()).expect_err("empty intake is invalid");

    assert_eq!(
        errors.fields(),
        vec![
            IntakeField::Age,
            IntakeField::Sex,
            IntakeField::Race,
            IntakeField::Smoking,
            IntakeField::Bmi,
        ]
    );
}

#[test]
fn deserializes_camel_case_form_payload() {
    let raw: RawIntake = serde_json::from_str(
        r#"{
            "age": 62,
            "sex": "male",
            "race": "asian",
            "hypertension": true,
            "hypertensionDurationYears": 2,
            "familyHistory": false,
            "bmi": 27.5,
            "smoking": "former",
            "cardiovascularDisease": true
        }"#,
    )
    .expect("payload parses");

    let intake = validate(&raw).expect("payload validates");

    assert_eq!(intake.hypertension_duration_years(), Some(2));
    assert!(intake.cardiovascular_disease());
    assert!(!intake.diabetes());
}

#[test]
fn validation_errors_serialize_with_kind_tags() {
    let mut raw = healthy_intake();
    raw.age = 5;

    let errors = validate(&raw).expect_err("intake is invalid");
    let json = serde_json::to_value(&errors).expect("errors serialize");

    assert_eq!(json["violations"][0]["field"], "age");
    assert_eq!(json["violations"][0]["kind"], "OutOfRange");
}

#[test]
fn unrecognized_set_members_collapse_into_one_violation() {
    let mut raw = healthy_intake();
    raw.symptoms = vec![
        "fatigue".to_string(),
        "hiccups".to_string(),
        "burping".to_string(),
    ];

    let errors = validate(&raw).expect_err("intake is invalid");

    assert_eq!(errors.fields(), vec![IntakeField::Symptoms]);
    assert_eq!(errors.violations[0].kind, ViolationKind::InvalidEnum);
    assert_eq!(
        errors.violations[0].message,
        "unrecognized values 'hiccups', 'burping'"
    );
}

#[test]
fn form_strings_coerce_into_numbers_and_flags() {
    let raw: RawIntake = serde_json::from_str(
        r#"{
            "age": " 71 ",
            "sex": "female",
            "race": "black",
            "hypertension": "yes",
            "hypertensionDurationYears": "3",
            "diabetes": 1,
            "familyHistory": "",
            "bmi": "31.2",
            "smoking": "current",
            "cardiovascularDisease": null,
            "symptoms": "swelling"
        }"#,
    )
    .expect("payload parses");

    let intake = validate(&raw).expect("coerced payload validates");

    assert_eq!(intake.age(), 71);
    assert_eq!(intake.hypertension_duration_years(), Some(3));
    assert!(intake.diabetes());
    assert!(!intake.family_history());
    assert_eq!(intake.bmi(), 31.2);
    assert!(!intake.cardiovascular_disease());
    assert_eq!(intake.symptoms().len(), 1);
}

#[test]
fn values_of_the_wrong_type_become_field_violations() {
    let raw: RawIntake = serde_json::from_str(
        r#"{
            "age": "old",
            "sex": 7,
            "race": "asian",
            "hypertension": "maybe",
            "hypertensionDurationYears": 4,
            "familyHistory": true,
            "familyDiseases": {"ckd": true},
            "bmi": [22],
            "smoking": "never"
        }"#,
    )
    .expect("lenient payload parses");

    assert_eq!(raw.malformed_value(IntakeField::Age), Some("\"old\""));

    let errors = validate(&raw).expect_err("intake is invalid");

    let tagged: Vec<(IntakeField, ViolationKind)> = errors
        .violations
        .iter()
        .map(|violation| (violation.field, violation.kind))
        .collect();
    assert_eq!(
        tagged,
        vec![
            (IntakeField::Age, ViolationKind::OutOfRange),
            (IntakeField::Sex, ViolationKind::InvalidEnum),
            (IntakeField::Hypertension, ViolationKind::InvalidEnum),
            (IntakeField::FamilyDiseases, ViolationKind::InvalidEnum),
            (IntakeField::Bmi, ViolationKind::OutOfRange),
        ]
    );
    assert_eq!(errors.violations[0].message, "expected a number, got \"old\"");
}
