//! API error responses

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use risk_assessment::AssessmentError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

/// Errors surfaced by the API layer
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Assessment(#[from] AssessmentError),

    #[error("Invalid request body: {}", .0.body_text())]
    InvalidBody(#[from] JsonRejection),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Metrics recorder error: {0}")]
    Metrics(String),

    #[error("Rate limit configuration error: {0}")]
    RateLimit(String),
}

/// JSON body for failed requests
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Assessment(e) if e.is_user_error() => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    error: e.to_string(),
                    field: e.field(),
                },
            ),
            ApiError::InvalidBody(rejection) => (
                rejection.status(),
                ErrorResponse {
                    error: rejection.body_text(),
                    field: None,
                },
            ),
            _ => {
                error!("Request failed: {}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse {
                        error: "Risk assessment is currently unavailable".to_string(),
                        field: None,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
