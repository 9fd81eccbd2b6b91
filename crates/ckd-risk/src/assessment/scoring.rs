use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::intake::ValidatedIntake;
use super::rules::{RiskRule, RuleTable};

/// Upper bound of the reported score scale.
pub const MAX_SCORE: u8 = 20;

/// Contribution of one surviving rule to an assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactor {
    pub id: String,
    pub label: String,
    pub weight: u8,
    pub description: String,
}

impl From<&RiskRule> for RiskFactor {
    fn from(rule: &RiskRule) -> Self {
        Self {
            id: rule.id.clone(),
            label: rule.label.clone(),
            weight: rule.weight,
            description: rule.description.clone(),
        }
    }
}

/// Scoring output before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBreakdown {
    /// Sum of surviving weights clamped to [`MAX_SCORE`].
    pub total: u8,
    /// Unclamped sum of surviving weights.
    pub raw_total: u32,
    /// Surviving factors, weight descending then id ascending.
    pub factors: Vec<RiskFactor>,
}

/// Stateless evaluator that applies a rule table to validated intakes.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    table: RuleTable,
}

impl ScoringEngine {
    pub fn new(table: RuleTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn score(&self, intake: &ValidatedIntake) -> ScoreBreakdown {
        let rules = self.table.rules();
        let fired: Vec<usize> = rules
            .iter()
            .enumerate()
            .filter(|(_, rule)| rule.trigger.fires(intake))
            .map(|(position, _)| position)
            .collect();

        let suppressed: BTreeSet<usize> = fired
            .iter()
            .flat_map(|&position| self.table.superseded_by(position).iter().copied())
            .collect();

        let mut factors: Vec<RiskFactor> = fired
            .iter()
            .filter(|position| !suppressed.contains(position))
            .map(|&position| RiskFactor::from(&rules[position]))
            .collect();
        factors.sort_by(|a, b| b.weight.cmp(&a.weight).then_with(|| a.id.cmp(&b.id)));

        let raw_total: u32 = factors.iter().map(|factor| u32::from(factor.weight)).sum();
        let total = raw_total.min(u32::from(MAX_SCORE)) as u8;

        debug!(
            fired = fired.len(),
            surviving = factors.len(),
            raw_total,
            total,
            "intake scored"
        );

        ScoreBreakdown {
            total,
            raw_total,
            factors,
        }
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(RuleTable::canonical())
    }
}
