use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::super::intake::{FamilyDisease, SmokingStatus};
use super::trigger::RuleTrigger;

/// A single weighted risk signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskRule {
    pub id: String,
    pub label: String,
    pub description: String,
    pub weight: u8,
    pub trigger: RuleTrigger,
    /// Rules this one replaces when both fire, e.g. a higher age band over a lower one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub supersedes: Vec<String>,
}

/// Serialized form of a rule table, as stored in `CKD_RULES_PATH` files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleTableDocument {
    pub rules: Vec<RiskRule>,
}

#[derive(Debug, thiserror::Error)]
pub enum RuleTableError {
    #[error("rule table must contain at least one rule")]
    Empty,
    #[error("rule at position {position} has a blank id")]
    BlankId { position: usize },
    #[error("rule id '{0}' appears more than once")]
    DuplicateId(String),
    #[error("rule '{0}' must carry a weight greater than zero")]
    ZeroWeight(String),
    #[error("rule '{rule}' supersedes unknown rule '{target}'")]
    UnknownSupersession { rule: String, target: String },
    #[error("rule '{0}' cannot supersede itself")]
    SelfSupersession(String),
    #[error("supersession cycle detected through rule '{0}'")]
    SupersessionCycle(String),
    #[error("failed to read rule table: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid rule table document: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered, validated rule collection with its supersession closure resolved up front.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTable {
    rules: Vec<RiskRule>,
    superseded: Vec<BTreeSet<usize>>,
}

impl RuleTable {
    pub fn new(rules: Vec<RiskRule>) -> Result<Self, RuleTableError> {
        if rules.is_empty() {
            return Err(RuleTableError::Empty);
        }

        let mut positions = HashMap::with_capacity(rules.len());
        for (position, rule) in rules.iter().enumerate() {
            if rule.id.trim().is_empty() {
                return Err(RuleTableError::BlankId { position });
            }
            if rule.weight == 0 {
                return Err(RuleTableError::ZeroWeight(rule.id.clone()));
            }
            if positions.insert(rule.id.as_str(), position).is_some() {
                return Err(RuleTableError::DuplicateId(rule.id.clone()));
            }
        }

        let mut edges = Vec::with_capacity(rules.len());
        for rule in &rules {
            let mut targets = Vec::with_capacity(rule.supersedes.len());
            for target in &rule.supersedes {
                if *target == rule.id {
                    return Err(RuleTableError::SelfSupersession(rule.id.clone()));
                }
                let index = positions.get(target.as_str()).copied().ok_or_else(|| {
                    RuleTableError::UnknownSupersession {
                        rule: rule.id.clone(),
                        target: target.clone(),
                    }
                })?;
                targets.push(index);
            }
            edges.push(targets);
        }

        let superseded = supersession_closure(&rules, &edges)?;

        Ok(Self { rules, superseded })
    }

    pub fn from_document(document: RuleTableDocument) -> Result<Self, RuleTableError> {
        Self::new(document.rules)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, RuleTableError> {
        let document: RuleTableDocument = serde_json::from_str(raw)?;
        Self::from_document(document)
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, RuleTableError> {
        let document: RuleTableDocument = serde_json::from_reader(reader)?;
        Self::from_document(document)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, RuleTableError> {
        let file = File::open(path)?;
        Self::from_json_reader(BufReader::new(file))
    }

    /// Reference rule set used when no table is configured. Weights are illustrative.
    pub fn canonical() -> Self {
        let rules = vec![
            rule(
                "age-60-plus",
                "Age 60 or older",
                "Kidney function declines with age; risk rises noticeably from 60.",
                3,
                RuleTrigger::AgeAtLeast { years: 60 },
                &[],
            ),
            rule(
                "age-75-plus",
                "Age 75 or older",
                "Advanced age is among the strongest predictors of reduced kidney function.",
                5,
                RuleTrigger::AgeAtLeast { years: 75 },
                &["age-60-plus"],
            ),
            rule(
                "diabetes",
                "Diabetes",
                "Diabetes is the leading cause of chronic kidney disease.",
                4,
                RuleTrigger::Diabetes,
                &[],
            ),
            rule(
                "hypertension-long",
                "Long-standing hypertension",
                "High blood pressure for five or more years damages kidney blood vessels.",
                4,
                RuleTrigger::HypertensionAtLeast { years: 5 },
                &[],
            ),
            rule(
                "hypertension-short",
                "Recent hypertension",
                "High blood pressure diagnosed within the last five years.",
                2,
                RuleTrigger::HypertensionUnder { years: 5 },
                &[],
            ),
            rule(
                "family-history",
                "Family history of kidney disease",
                "A first-degree relative with chronic kidney disease raises inherited risk.",
                3,
                RuleTrigger::FamilyDisease {
                    disease: FamilyDisease::Ckd,
                },
                &[],
            ),
            rule(
                "obesity",
                "Obesity (BMI 30+)",
                "Obesity increases the workload on the kidneys and the risk of diabetes.",
                2,
                RuleTrigger::BmiAtLeast { value: 30.0 },
                &[],
            ),
            rule(
                "smoking-current",
                "Current smoker",
                "Smoking slows blood flow to the kidneys and accelerates decline.",
                2,
                RuleTrigger::Smoking {
                    status: SmokingStatus::Current,
                },
                &[],
            ),
            rule(
                "cardiovascular",
                "Cardiovascular disease",
                "Heart and vascular disease share risk pathways with kidney disease.",
                3,
                RuleTrigger::CardiovascularDisease,
                &[],
            ),
            rule(
                "symptomatic",
                "Multiple kidney-related symptoms",
                "Two or more reported symptoms may indicate reduced kidney function.",
                2,
                RuleTrigger::SymptomCountAtLeast { count: 2 },
                &[],
            ),
        ];

        match Self::new(rules) {
            Ok(table) => table,
            Err(err) => unreachable!("canonical rule table is invalid: {err}"),
        }
    }

    pub fn rules(&self) -> &[RiskRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&RiskRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// Positions of every rule transitively superseded by the rule at `position`.
    pub(crate) fn superseded_by(&self, position: usize) -> &BTreeSet<usize> {
        &self.superseded[position]
    }

    pub fn document(&self) -> RuleTableDocument {
        RuleTableDocument {
            rules: self.rules.clone(),
        }
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::canonical()
    }
}

fn rule(
    id: &str,
    label: &str,
    description: &str,
    weight: u8,
    trigger: RuleTrigger,
    supersedes: &[&str],
) -> RiskRule {
    RiskRule {
        id: id.to_string(),
        label: label.to_string(),
        description: description.to_string(),
        weight,
        trigger,
        supersedes: supersedes.iter().map(|id| id.to_string()).collect(),
    }
}

fn supersession_closure(
    rules: &[RiskRule],
    edges: &[Vec<usize>],
) -> Result<Vec<BTreeSet<usize>>, RuleTableError> {
    let mut closure = Vec::with_capacity(rules.len());

    for (origin, rule) in rules.iter().enumerate() {
        let mut reached = BTreeSet::new();
        let mut pending = edges[origin].clone();

        while let Some(next) = pending.pop() {
            if next == origin {
                return Err(RuleTableError::SupersessionCycle(rule.id.clone()));
            }
            if reached.insert(next) {
                pending.extend(edges[next].iter().copied());
            }
        }

        closure.push(reached);
    }

    Ok(closure)
}
