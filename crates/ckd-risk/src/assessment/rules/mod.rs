mod table;
mod trigger;

pub use table::{RiskRule, RuleTable, RuleTableDocument, RuleTableError};
pub use trigger::RuleTrigger;
