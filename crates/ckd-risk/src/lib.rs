//! Chronic kidney disease risk scoring.
//!
//! The [`assessment`] module holds the pure scoring pipeline: intake validation, the rule table,
//! the scoring engine, the risk classifier and the chart series builder. The remaining modules
//! carry the configuration, error, and telemetry plumbing shared with the HTTP service.

pub mod assessment;
pub mod config;
pub mod error;
pub mod telemetry;
