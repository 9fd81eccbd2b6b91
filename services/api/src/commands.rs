use crate::infra::{engine_config_with_overrides, load_assessor, load_rule_table, read_intake};
use chrono::Local;
use ckd_risk::assessment::{
    AssessmentReport, AssessmentResponse, RawIntake, RiskAssessor, ValidationErrors,
    MAX_SCORE, TOOL_METADATA,
};
use ckd_risk::config::AppConfig;
use ckd_risk::error::AppError;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// Intake record in the form layer's JSON shape
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Rule table JSON overriding CKD_RULES_PATH
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Age baseline CSV overriding CKD_AGE_BASELINES_PATH
    #[arg(long)]
    pub(crate) baselines: Option<PathBuf>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RulesArgs {
    /// Rule table JSON overriding CKD_RULES_PATH
    #[arg(long)]
    pub(crate) rules: Option<PathBuf>,
    /// Print the table as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Age baseline CSV overriding CKD_AGE_BASELINES_PATH
    #[arg(long)]
    pub(crate) baselines: Option<PathBuf>,
    /// Print the report as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let AssessArgs {
        input,
        rules,
        baselines,
        json,
    } = args;

    let config = AppConfig::load()?;
    let engine = engine_config_with_overrides(config.engine, rules, baselines);
    let assessor = load_assessor(&engine)?;
    let intake = read_intake(&input)?;

    assess_and_print(&assessor, &intake, json)
}

pub(crate) fn run_rules(args: RulesArgs) -> Result<(), AppError> {
    let RulesArgs { rules, json } = args;

    let config = AppConfig::load()?;
    let engine = engine_config_with_overrides(config.engine, rules, None);
    let table = load_rule_table(&engine)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&table.document())?);
        return Ok(());
    }

    println!("Active rule table ({} rules, score capped at {MAX_SCORE})", table.len());
    for rule in table.rules() {
        let supersedes = if rule.supersedes.is_empty() {
            String::new()
        } else {
            format!(" | supersedes {}", rule.supersedes.join(", "))
        };
        println!(
            "- {} (+{}): {} | when {}{}",
            rule.id,
            rule.weight,
            rule.label,
            rule.trigger.describe(),
            supersedes
        );
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs { baselines, json } = args;

    let config = AppConfig::load()?;
    let engine = engine_config_with_overrides(config.engine, None, baselines);
    let assessor = load_assessor(&engine)?;

    if !json {
        println!("CKD risk assessment demo (synthetic patient)");
    }
    assess_and_print(&assessor, &demo_intake(), json)
}

fn assess_and_print(
    assessor: &RiskAssessor,
    intake: &RawIntake,
    json: bool,
) -> Result<(), AppError> {
    let report = match assessor.assess(intake) {
        Ok(report) => report,
        Err(errors) => {
            render_violations(&errors);
            return Err(AppError::Validation(errors));
        }
    };

    if json {
        let response = AssessmentResponse::from_report(report);
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        render_report(&report);
    }

    Ok(())
}

fn render_violations(errors: &ValidationErrors) {
    eprintln!("Intake rejected ({} problem(s))", errors.violations.len());
    for violation in &errors.violations {
        eprintln!(
            "- {} [{:?}]: {}",
            violation.field, violation.kind, violation.message
        );
    }
}

pub(crate) fn render_report(report: &AssessmentReport) {
    let assessment = &report.assessment;

    println!("{} (v{})", TOOL_METADATA.title, TOOL_METADATA.version);
    println!("Generated {}", Local::now().format("%Y-%m-%d %H:%M"));

    println!("\nRisk summary");
    println!("- Risk score: {}/{}", assessment.score, MAX_SCORE);
    println!("- Risk level: {}", assessment.level.label());
    println!(
        "- 5-year risk probability: {}",
        assessment.formatted_percentage()
    );

    if assessment.factors.is_empty() {
        println!("\nContributing factors: none");
    } else {
        println!("\nContributing factors");
        for factor in &assessment.factors {
            println!(
                "- {} (+{}): {}",
                factor.label, factor.weight, factor.description
            );
        }
    }

    println!("\nChart data");
    for chart in &report.charts {
        let points: Vec<String> = chart
            .points
            .iter()
            .map(|point| format!("{}={:.1}", point.label, point.value))
            .collect();
        println!("- {}: {}", chart.title, points.join(", "));
    }

    println!("\nUnderstanding your results");
    println!("{}", TOOL_METADATA.note);
    println!("\nDisclaimer: {}", TOOL_METADATA.disclaimer);
}

fn demo_intake() -> RawIntake {
    let mut intake = RawIntake::default();
    intake.age = 64;
    intake.sex = "male".to_string();
    intake.race = "hispanic".to_string();
    intake.hypertension = true;
    intake.hypertension_duration_years = 3;
    intake.diabetes = true;
    intake.family_history = true;
    intake.family_diseases = vec!["diabetes".to_string()];
    intake.bmi = 29.1;
    intake.smoking = "former".to_string();
    intake.symptoms = vec!["fatigue".to_string()];
    intake
}
