//! Risk Assessment
//!
//! Ties validation, feature preparation and inference together behind a
//! single immutable context, and renders the outcome shown to applicants.

mod context;
mod options;
mod outcome;

pub use context::{ArtifactPaths, Assessment, AssessmentContext};
pub use options::{form_options, unsupported_options};
pub use outcome::{RiskOutcome, MODEL_NOTICE, QUICK_TIPS};

use applicant_validator::ValidationError;
use feature_engine::{ArtifactError, FeatureError};
use inference_engine::InferenceError;
use thiserror::Error;

/// Errors while assessing a submission or loading the context
#[derive(Debug, Error)]
pub enum AssessmentError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Feature(#[from] FeatureError),
    #[error(transparent)]
    Inference(#[from] InferenceError),
    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

impl AssessmentError {
    /// Whether the applicant can fix this by changing the submission
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            AssessmentError::Validation(_) | AssessmentError::Feature(_)
        )
    }

    /// The form field at fault, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            AssessmentError::Validation(e) => e.field(),
            AssessmentError::Feature(FeatureError::UnknownCategory { field, .. }) => {
                Some(field.display_name())
            }
            AssessmentError::Inference(_) | AssessmentError::Artifact(_) => None,
        }
    }
}
