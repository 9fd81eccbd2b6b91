use ckd_risk::assessment::{AgeBaselineTable, RawIntake, RiskAssessor, RuleTable};
use ckd_risk::config::EngineConfig;
use ckd_risk::error::AppError;
use metrics_exporter_prometheus::PrometheusHandle;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Apply command-line data file overrides on top of the environment configuration.
pub(crate) fn engine_config_with_overrides(
    mut config: EngineConfig,
    rules: Option<PathBuf>,
    baselines: Option<PathBuf>,
) -> EngineConfig {
    if rules.is_some() {
        config.rules_path = rules;
    }
    if baselines.is_some() {
        config.age_baselines_path = baselines;
    }
    config
}

pub(crate) fn load_rule_table(config: &EngineConfig) -> Result<RuleTable, AppError> {
    match &config.rules_path {
        Some(path) => {
            let table = RuleTable::from_path(path)?;
            info!(path = %path.display(), rules = table.len(), "loaded rule table");
            Ok(table)
        }
        None => Ok(RuleTable::canonical()),
    }
}

/// Build the shared assessor from the configured rule table and optional baseline table.
pub(crate) fn load_assessor(config: &EngineConfig) -> Result<RiskAssessor, AppError> {
    let assessor = RiskAssessor::new(load_rule_table(config)?);

    match &config.age_baselines_path {
        Some(path) => {
            let baselines = AgeBaselineTable::from_path(path)?;
            info!(
                path = %path.display(),
                brackets = baselines.brackets().len(),
                "loaded age baseline table"
            );
            Ok(assessor.with_baselines(baselines))
        }
        None => {
            warn!("no age baseline table configured; cohort charts disabled");
            Ok(assessor)
        }
    }
}

pub(crate) fn read_intake(path: &Path) -> Result<RawIntake, AppError> {
    let file = File::open(path)?;
    let intake = serde_json::from_reader(BufReader::new(file))?;
    Ok(intake)
}
