use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::super::scoring::MAX_SCORE;

/// Expected score for the general population in one age bracket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeBaseline {
    pub min_age: u8,
    pub max_age: u8,
    pub label: String,
    pub baseline_score: u8,
    pub baseline_percentage: f64,
}

impl AgeBaseline {
    pub fn contains(&self, age: u8) -> bool {
        (self.min_age..=self.max_age).contains(&age)
    }
}

/// Host-supplied baseline lookup keyed by age bracket. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct AgeBaselineTable {
    brackets: Vec<AgeBaseline>,
}

#[derive(Debug)]
pub enum BaselineError {
    Io(std::io::Error),
    Csv(csv::Error),
    Empty,
    InvertedBracket { label: String },
    Overlap { first: String, second: String },
    ScoreOutOfRange { label: String, score: u8 },
    PercentageOutOfRange { label: String, percentage: f64 },
}

impl fmt::Display for BaselineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BaselineError::Io(err) => write!(f, "failed to read age baseline table: {err}"),
            BaselineError::Csv(err) => write!(f, "invalid age baseline CSV data: {err}"),
            BaselineError::Empty => write!(f, "age baseline table has no brackets"),
            BaselineError::InvertedBracket { label } => {
                write!(f, "bracket '{label}' has min_age greater than max_age")
            }
            BaselineError::Overlap { first, second } => {
                write!(f, "brackets '{first}' and '{second}' overlap")
            }
            BaselineError::ScoreOutOfRange { label, score } => write!(
                f,
                "bracket '{label}' baseline score {score} exceeds {MAX_SCORE}"
            ),
            BaselineError::PercentageOutOfRange { label, percentage } => write!(
                f,
                "bracket '{label}' baseline percentage {percentage} outside 0-100"
            ),
        }
    }
}

impl std::error::Error for BaselineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BaselineError::Io(err) => Some(err),
            BaselineError::Csv(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BaselineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for BaselineError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

impl AgeBaselineTable {
    pub fn new(mut brackets: Vec<AgeBaseline>) -> Result<Self, BaselineError> {
        if brackets.is_empty() {
            return Err(BaselineError::Empty);
        }

        for bracket in &brackets {
            if bracket.min_age > bracket.max_age {
                return Err(BaselineError::InvertedBracket {
                    label: bracket.label.clone(),
                });
            }
            if bracket.baseline_score > MAX_SCORE {
                return Err(BaselineError::ScoreOutOfRange {
                    label: bracket.label.clone(),
                    score: bracket.baseline_score,
                });
            }
            if !(0.0..=100.0).contains(&bracket.baseline_percentage) {
                return Err(BaselineError::PercentageOutOfRange {
                    label: bracket.label.clone(),
                    percentage: bracket.baseline_percentage,
                });
            }
        }

        brackets.sort_by_key(|bracket| bracket.min_age);
        for pair in brackets.windows(2) {
            if pair[1].min_age <= pair[0].max_age {
                return Err(BaselineError::Overlap {
                    first: pair[0].label.clone(),
                    second: pair[1].label.clone(),
                });
            }
        }

        Ok(Self { brackets })
    }

    /// Parse a CSV export with `min_age,max_age,label,baseline_score,baseline_percentage` headers.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, BaselineError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut brackets = Vec::new();

        for record in csv_reader.deserialize::<AgeBaseline>() {
            brackets.push(record?);
        }

        Self::new(brackets)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BaselineError> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    pub fn bracket_for(&self, age: u8) -> Option<&AgeBaseline> {
        self.brackets.iter().find(|bracket| bracket.contains(age))
    }

    pub fn brackets(&self) -> &[AgeBaseline] {
        &self.brackets
    }
}
