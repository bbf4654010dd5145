//! Assessment Routes

use applicant_validator::ApplicantForm;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::{DateTime, Utc};
use risk_assessment::{AssessmentError, RiskOutcome};
use serde::Serialize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

use crate::{ApiError, AppState};

/// Response for a completed assessment
#[derive(Debug, Serialize)]
pub struct AssessmentResponse {
    pub id: String,
    /// 0 = low risk, 1 = high risk
    pub label: u8,
    pub risk: &'static str,
    pub outcome: RiskOutcome,
    /// Plain-text rendering of the outcome
    pub summary: String,
    pub assessed_at: DateTime<Utc>,
}

/// Assess a form submission
pub async fn create_assessment(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ApplicantForm>, JsonRejection>,
) -> Result<Json<AssessmentResponse>, ApiError> {
    let started = std::time::Instant::now();

    let Json(form) = body.map_err(|rejection| {
        metrics::counter!("assessment_rejections_total", "reason" => "malformed").increment(1);
        ApiError::from(rejection)
    })?;

    let assessment = match state.context.assess_form(&form) {
        Ok(assessment) => assessment,
        Err(e) => {
            metrics::counter!("assessment_rejections_total", "reason" => rejection_reason(&e))
                .increment(1);
            return Err(e.into());
        }
    };

    state.assessments.fetch_add(1, Ordering::Relaxed);
    metrics::counter!("assessments_total", "label" => assessment.label.as_str()).increment(1);
    metrics::histogram!("assessment_duration_seconds").record(started.elapsed().as_secs_f64());

    info!(
        "Assessment {} completed: {} risk",
        assessment.id,
        assessment.label.as_str()
    );

    Ok(Json(AssessmentResponse {
        id: assessment.id.to_string(),
        label: assessment.label.code(),
        risk: assessment.label.as_str(),
        summary: assessment.outcome.render(),
        outcome: assessment.outcome,
        assessed_at: assessment.assessed_at,
    }))
}

fn rejection_reason(error: &AssessmentError) -> &'static str {
    match error {
        AssessmentError::Validation(_) => "validation",
        AssessmentError::Feature(_) => "unknown_category",
        AssessmentError::Inference(_) => "inference",
        AssessmentError::Artifact(_) => "artifact",
    }
}
