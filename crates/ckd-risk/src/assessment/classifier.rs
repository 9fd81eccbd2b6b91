use serde::{Deserialize, Serialize};

use super::scoring::MAX_SCORE;

/// Categorical banding of the score scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    VeryHigh,
}

impl RiskLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
            RiskLevel::VeryHigh => "very-high",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Moderate => "Moderate",
            RiskLevel::High => "High",
            RiskLevel::VeryHigh => "Very High",
        }
    }

    /// Inclusive score band covered by this level.
    pub const fn score_band(self) -> (u8, u8) {
        match self {
            RiskLevel::Low => (0, 5),
            RiskLevel::Moderate => (6, 10),
            RiskLevel::High => (11, 15),
            RiskLevel::VeryHigh => (16, MAX_SCORE),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub level: RiskLevel,
    pub percentage: f64,
}

/// Map a capped total onto its risk level and estimated probability.
///
/// Band edges belong to the lower band. Totals above [`MAX_SCORE`] can only come from a broken
/// scoring contract; debug builds assert, release builds clamp.
pub fn classify(total: u8) -> Classification {
    debug_assert!(total <= MAX_SCORE, "score {total} exceeds scale maximum");
    let total = total.min(MAX_SCORE);

    let level = match total {
        0..=5 => RiskLevel::Low,
        6..=10 => RiskLevel::Moderate,
        11..=15 => RiskLevel::High,
        _ => RiskLevel::VeryHigh,
    };

    Classification {
        level,
        percentage: percentage_for(total),
    }
}

fn percentage_for(total: u8) -> f64 {
    (f64::from(total) * 5.0).min(100.0)
}
