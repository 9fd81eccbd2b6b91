use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::charts::ChartSeries;
use super::intake::RawIntake;
use super::metadata::TOOL_METADATA;
use super::report::{AssessmentReport, RiskAssessment};
use super::rules::RuleTableDocument;
use super::service::RiskAssessor;
use crate::error::AppError;

/// Response envelope for a completed assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResponse {
    pub generated_at: DateTime<Utc>,
    pub summary: String,
    pub assessment: RiskAssessment,
    pub charts: Vec<ChartSeries>,
}

impl AssessmentResponse {
    pub fn from_report(report: AssessmentReport) -> Self {
        Self {
            generated_at: Utc::now(),
            summary: report.assessment.summary(),
            assessment: report.assessment,
            charts: report.charts,
        }
    }
}

/// Router builder exposing assessment, rule table and metadata endpoints.
pub fn assessment_router(assessor: Arc<RiskAssessor>) -> Router {
    Router::new()
        .route("/api/v1/assessments", post(assess_handler))
        .route("/api/v1/rules", get(rules_handler))
        .route("/api/v1/about", get(about_handler))
        .with_state(assessor)
}

/// The body is decoded by hand rather than through the `Json` extractor so that unreadable
/// payloads still get the JSON error envelope of [`AppError`].
pub(crate) async fn assess_handler(
    State(assessor): State<Arc<RiskAssessor>>,
    body: Bytes,
) -> Result<Json<AssessmentResponse>, AppError> {
    let intake: RawIntake = serde_json::from_slice(&body)?;
    let report = assessor.assess(&intake)?;
    Ok(Json(AssessmentResponse::from_report(report)))
}

pub(crate) async fn rules_handler(
    State(assessor): State<Arc<RiskAssessor>>,
) -> Json<RuleTableDocument> {
    Json(assessor.rule_table().document())
}

pub(crate) async fn about_handler() -> Response {
    (StatusCode::OK, Json(TOOL_METADATA)).into_response()
}
