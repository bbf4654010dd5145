//! Assessment context and pipeline

use crate::options::unsupported_options;
use crate::outcome::RiskOutcome;
use crate::AssessmentError;
use applicant_validator::{ApplicantForm, ApplicantRecord, ValidationConfig, Validator};
use chrono::{DateTime, Utc};
use feature_engine::{CategoricalField, FeatureAdapter};
use inference_engine::{InferenceEngine, RiskLabel};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Locations of the pre-fit artifacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactPaths {
    /// Label encoder table (JSON)
    pub encoders: PathBuf,
    /// Scaler parameters (JSON)
    pub scaler: PathBuf,
    /// Classifier (ONNX or JSON)
    pub model: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            encoders: PathBuf::from("models/label_encoders.json"),
            scaler: PathBuf::from("models/scaler.json"),
            model: PathBuf::from("models/ensemble_model.json"),
        }
    }
}

/// Outcome of one submission
#[derive(Debug, Clone, Serialize)]
pub struct Assessment {
    pub id: Uuid,
    pub label: RiskLabel,
    pub outcome: RiskOutcome,
    pub assessed_at: DateTime<Utc>,
    pub latency_us: u64,
}

/// Everything needed to assess a submission
///
/// Built once at startup; every method takes `&self` and nothing inside
/// changes afterwards.
#[derive(Debug)]
pub struct AssessmentContext {
    validator: Validator,
    adapter: FeatureAdapter,
    engine: InferenceEngine,
}

impl AssessmentContext {
    pub fn new(validator: Validator, adapter: FeatureAdapter, engine: InferenceEngine) -> Self {
        Self {
            validator,
            adapter,
            engine,
        }
    }

    /// Load all artifacts from disk
    pub fn load(
        paths: &ArtifactPaths,
        validation: ValidationConfig,
    ) -> Result<Self, AssessmentError> {
        let adapter = FeatureAdapter::load(&paths.encoders, &paths.scaler)?;
        let engine = InferenceEngine::load(&paths.model)?;
        info!(
            "Assessment context loaded (model={}, scaler={:?})",
            engine.model_name(),
            adapter.scaler().method()
        );
        for field in CategoricalField::ALL {
            debug!("{} classes: {:?}", field, adapter.encoders().classes(field));
        }
        for (field, label) in unsupported_options(adapter.encoders()) {
            warn!("Form option {:?} for {} is not known to the encoders", label, field);
        }
        Ok(Self::new(Validator::new(validation), adapter, engine))
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn adapter(&self) -> &FeatureAdapter {
        &self.adapter
    }

    pub fn engine(&self) -> &InferenceEngine {
        &self.engine
    }

    /// Validate a raw submission and assess it
    pub fn assess_form(&self, form: &ApplicantForm) -> Result<Assessment, AssessmentError> {
        let record = self.validator.validate(form).map_err(|e| {
            warn!("Submission rejected: {}", e);
            e
        })?;
        self.assess(&record)
    }

    /// Assess a validated record
    ///
    /// An unknown category ends the submission before the model is called.
    pub fn assess(&self, record: &ApplicantRecord) -> Result<Assessment, AssessmentError> {
        let features = self.adapter.prepare(record).map_err(|e| {
            warn!("Submission rejected: {}", e);
            e
        })?;
        let result = self.engine.predict(&features)?;

        let assessment = Assessment {
            id: Uuid::new_v4(),
            label: result.label,
            outcome: RiskOutcome::for_label(result.label),
            assessed_at: Utc::now(),
            latency_us: result.latency_us,
        };
        debug!("Assessment {} -> {}", assessment.id, assessment.label.as_str());

        Ok(assessment)
    }
}
