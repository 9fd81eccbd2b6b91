use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Patient intake exactly as the form layer submits it, before any range or enum checks.
///
/// Enum fields travel as strings and counts as signed integers so the validator can report every
/// malformed value instead of failing at deserialization. Deserialization is lenient: numbers and
/// booleans may arrive as strings (the form posts its input state verbatim), missing or `null`
/// fields fall back to their defaults, and values of the wrong type are remembered so that
/// validation reports them against their field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "FormIntake")]
pub struct RawIntake {
    pub age: i64,
    pub sex: String,
    pub race: String,
    pub hypertension: bool,
    pub hypertension_duration_years: i64,
    pub diabetes: bool,
    pub family_history: bool,
    pub family_diseases: Vec<String>,
    pub bmi: f64,
    pub smoking: String,
    pub cardiovascular_disease: bool,
    pub symptoms: Vec<String>,
    #[serde(skip)]
    pub(crate) malformed: Vec<(IntakeField, String)>,
}

impl RawIntake {
    /// JSON text of a value that could not be coerced into `field`'s type, if any.
    pub fn malformed_value(&self, field: IntakeField) -> Option<&str> {
        self.malformed
            .iter()
            .find(|(candidate, _)| *candidate == field)
            .map(|(_, value)| value.as_str())
    }
}

/// Loose wire shape; every field is taken as arbitrary JSON and coerced afterwards.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct FormIntake {
    age: Value,
    sex: Value,
    race: Value,
    hypertension: Value,
    hypertension_duration_years: Value,
    diabetes: Value,
    family_history: Value,
    family_diseases: Value,
    bmi: Value,
    smoking: Value,
    cardiovascular_disease: Value,
    symptoms: Value,
}

impl From<FormIntake> for RawIntake {
    fn from(form: FormIntake) -> Self {
        let mut coercion = Coercion::default();

        let age = coercion.integer(IntakeField::Age, form.age);
        let sex = coercion.text(IntakeField::Sex, form.sex);
        let race = coercion.text(IntakeField::Race, form.race);
        let hypertension = coercion.flag(IntakeField::Hypertension, form.hypertension);
        let hypertension_duration_years = coercion.integer(
            IntakeField::HypertensionDurationYears,
            form.hypertension_duration_years,
        );
        let diabetes = coercion.flag(IntakeField::Diabetes, form.diabetes);
        let family_history = coercion.flag(IntakeField::FamilyHistory, form.family_history);
        let family_diseases = coercion.list(IntakeField::FamilyDiseases, form.family_diseases);
        let bmi = coercion.float(IntakeField::Bmi, form.bmi);
        let smoking = coercion.text(IntakeField::Smoking, form.smoking);
        let cardiovascular_disease = coercion.flag(
            IntakeField::CardiovascularDisease,
            form.cardiovascular_disease,
        );
        let symptoms = coercion.list(IntakeField::Symptoms, form.symptoms);

        RawIntake {
            age,
            sex,
            race,
            hypertension,
            hypertension_duration_years,
            diabetes,
            family_history,
            family_diseases,
            bmi,
            smoking,
            cardiovascular_disease,
            symptoms,
            malformed: coercion.malformed,
        }
    }
}

#[derive(Default)]
struct Coercion {
    malformed: Vec<(IntakeField, String)>,
}

impl Coercion {
    fn reject<T: Default>(&mut self, field: IntakeField, value: &Value) -> T {
        self.malformed.push((field, value.to_string()));
        T::default()
    }

    fn integer(&mut self, field: IntakeField, value: Value) -> i64 {
        match &value {
            Value::Null => 0,
            Value::Number(number) => match number.as_i64() {
                Some(parsed) => parsed,
                None => self.reject(field, &value),
            },
            Value::String(text) if text.trim().is_empty() => 0,
            Value::String(text) => match text.trim().parse() {
                Ok(parsed) => parsed,
                Err(_) => self.reject(field, &value),
            },
            _ => self.reject(field, &value),
        }
    }

    fn float(&mut self, field: IntakeField, value: Value) -> f64 {
        match &value {
            Value::Null => 0.0,
            Value::Number(number) => match number.as_f64() {
                Some(parsed) => parsed,
                None => self.reject(field, &value),
            },
            Value::String(text) if text.trim().is_empty() => 0.0,
            Value::String(text) => match text.trim().parse() {
                Ok(parsed) => parsed,
                Err(_) => self.reject(field, &value),
            },
            _ => self.reject(field, &value),
        }
    }

    fn flag(&mut self, field: IntakeField, value: Value) -> bool {
        match &value {
            Value::Null => false,
            Value::Bool(flag) => *flag,
            Value::Number(number) => match number.as_u64() {
                Some(0) => false,
                Some(1) => true,
                _ => self.reject(field, &value),
            },
            Value::String(text) => match normalize_token(text).as_str() {
                "true" | "yes" | "on" | "1" => true,
                "false" | "no" | "off" | "0" | "" => false,
                _ => self.reject(field, &value),
            },
            _ => self.reject(field, &value),
        }
    }

    fn text(&mut self, field: IntakeField, value: Value) -> String {
        match value {
            Value::Null => String::new(),
            Value::String(text) => text,
            other => self.reject(field, &other),
        }
    }

    fn list(&mut self, field: IntakeField, value: Value) -> Vec<String> {
        match value {
            Value::Null => Vec::new(),
            Value::String(text) if text.trim().is_empty() => Vec::new(),
            Value::String(text) => vec![text],
            Value::Array(items) if items.iter().all(Value::is_string) => items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(text) => Some(text),
                    _ => None,
                })
                .collect(),
            other => self.reject(field, &other),
        }
    }
}

/// Intake fields as named in the external record, used to key validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntakeField {
    Age,
    Sex,
    Race,
    Hypertension,
    HypertensionDurationYears,
    Diabetes,
    FamilyHistory,
    FamilyDiseases,
    Bmi,
    Smoking,
    CardiovascularDisease,
    Symptoms,
}

impl IntakeField {
    pub const fn name(self) -> &'static str {
        match self {
            IntakeField::Age => "age",
            IntakeField::Sex => "sex",
            IntakeField::Race => "race",
            IntakeField::Hypertension => "hypertension",
            IntakeField::HypertensionDurationYears => "hypertensionDurationYears",
            IntakeField::Diabetes => "diabetes",
            IntakeField::FamilyHistory => "familyHistory",
            IntakeField::FamilyDiseases => "familyDiseases",
            IntakeField::Bmi => "bmi",
            IntakeField::Smoking => "smoking",
            IntakeField::CardiovascularDisease => "cardiovascularDisease",
            IntakeField::Symptoms => "symptoms",
        }
    }
}

impl fmt::Display for IntakeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lower-cases and trims a form value, accepting `_` or spaces in place of `-`.
pub(crate) fn normalize_token(raw: &str) -> String {
    raw.trim()
        .to_ascii_lowercase()
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "male" | "m" => Some(Self::Male),
            "female" | "f" => Some(Self::Female),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }
}

/// Self-reported race. The set is open: unrecognized non-empty values are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Race {
    Black,
    White,
    Asian,
    Hispanic,
    Other(String),
}

impl Race {
    pub fn parse(raw: &str) -> Option<Self> {
        let token = normalize_token(raw);
        match token.as_str() {
            "" => None,
            "black" | "african-american" => Some(Self::Black),
            "white" | "caucasian" => Some(Self::White),
            "asian" => Some(Self::Asian),
            "hispanic" | "latino" | "latina" => Some(Self::Hispanic),
            _ => Some(Self::Other(token)),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Race::Black => "black",
            Race::White => "white",
            Race::Asian => "asian",
            Race::Hispanic => "hispanic",
            Race::Other(value) => value,
        }
    }
}

impl TryFrom<String> for Race {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Race::parse(&value).ok_or_else(|| "race must not be empty".to_string())
    }
}

impl From<Race> for String {
    fn from(value: Race) -> Self {
        value.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SmokingStatus {
    Never,
    Former,
    Current,
}

impl SmokingStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "never" => Some(Self::Never),
            "former" => Some(Self::Former),
            "current" => Some(Self::Current),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            SmokingStatus::Never => "never",
            SmokingStatus::Former => "former",
            SmokingStatus::Current => "current",
        }
    }
}

/// Conditions reported in first-degree relatives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FamilyDisease {
    Ckd,
    Diabetes,
    Hypertension,
    Other,
}

impl FamilyDisease {
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "ckd" | "kidney-disease" => Some(Self::Ckd),
            "diabetes" => Some(Self::Diabetes),
            "hypertension" => Some(Self::Hypertension),
            "other" => Some(Self::Other),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            FamilyDisease::Ckd => "ckd",
            FamilyDisease::Diabetes => "diabetes",
            FamilyDisease::Hypertension => "hypertension",
            FamilyDisease::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Symptom {
    Swelling,
    Fatigue,
    FrequentUrination,
    BloodInUrine,
    FoamyUrine,
    ShortnessOfBreath,
    Nausea,
    Itching,
    MuscleCramps,
    PoorAppetite,
}

impl Symptom {
    pub fn parse(raw: &str) -> Option<Self> {
        match normalize_token(raw).as_str() {
            "swelling" => Some(Self::Swelling),
            "fatigue" => Some(Self::Fatigue),
            "frequent-urination" => Some(Self::FrequentUrination),
            "blood-in-urine" => Some(Self::BloodInUrine),
            "foamy-urine" => Some(Self::FoamyUrine),
            "shortness-of-breath" => Some(Self::ShortnessOfBreath),
            "nausea" => Some(Self::Nausea),
            "itching" => Some(Self::Itching),
            "muscle-cramps" => Some(Self::MuscleCramps),
            "poor-appetite" => Some(Self::PoorAppetite),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Symptom::Swelling => "swelling",
            Symptom::Fatigue => "fatigue",
            Symptom::FrequentUrination => "frequent-urination",
            Symptom::BloodInUrine => "blood-in-urine",
            Symptom::FoamyUrine => "foamy-urine",
            Symptom::ShortnessOfBreath => "shortness-of-breath",
            Symptom::Nausea => "nausea",
            Symptom::Itching => "itching",
            Symptom::MuscleCramps => "muscle-cramps",
            Symptom::PoorAppetite => "poor-appetite",
        }
    }
}

/// Range-checked intake. Only [`validate`](super::validation::validate) can build one, so the
/// scoring pipeline never sees out-of-domain values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedIntake {
    age: u8,
    sex: Sex,
    race: Race,
    hypertension_duration_years: Option<u32>,
    diabetes: bool,
    family_history: bool,
    family_diseases: BTreeSet<FamilyDisease>,
    bmi: f64,
    smoking: SmokingStatus,
    cardiovascular_disease: bool,
    symptoms: BTreeSet<Symptom>,
}

impl ValidatedIntake {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn new(
        age: u8,
        sex: Sex,
        race: Race,
        hypertension_duration_years: Option<u32>,
        diabetes: bool,
        family_history: bool,
        family_diseases: BTreeSet<FamilyDisease>,
        bmi: f64,
        smoking: SmokingStatus,
        cardiovascular_disease: bool,
        symptoms: BTreeSet<Symptom>,
    ) -> Self {
        Self {
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
        }
    }

    pub fn age(&self) -> u8 {
        self.age
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    pub fn race(&self) -> &Race {
        &self.race
    }

    pub fn has_hypertension(&self) -> bool {
        self.hypertension_duration_years.is_some()
    }

    /// Years since hypertension diagnosis; `None` when the patient has no hypertension.
    pub fn hypertension_duration_years(&self) -> Option<u32> {
        self.hypertension_duration_years
    }

    pub fn diabetes(&self) -> bool {
        self.diabetes
    }

    pub fn family_history(&self) -> bool {
        self.family_history
    }

    pub fn family_diseases(&self) -> &BTreeSet<FamilyDisease> {
        &self.family_diseases
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }

    pub fn smoking(&self) -> SmokingStatus {
        self.smoking
    }

    pub fn cardiovascular_disease(&self) -> bool {
        self.cardiovascular_disease
    }

    pub fn symptoms(&self) -> &BTreeSet<Symptom> {
        &self.symptoms
    }
}
