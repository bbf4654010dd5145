//! Inference Engine Implementation

use crate::classifier::{Classifier, ModelSpec};
use crate::onnx::OnnxClassifier;
use crate::InferenceError;
use feature_engine::ScaledFeatures;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Binary risk label produced by the classifier
///
/// The model's positive class is treated as high risk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLabel {
    Low = 0,
    High = 1,
}

impl RiskLabel {
    /// Map a raw model output onto a label
    pub fn from_code(code: i64) -> Result<Self, InferenceError> {
        match code {
            0 => Ok(RiskLabel::Low),
            1 => Ok(RiskLabel::High),
            other => Err(InferenceError::InvalidLabel(other)),
        }
    }

    pub fn code(&self) -> u8 {
        *self as u8
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Low => "low",
            RiskLabel::High => "high",
        }
    }
}

/// Result of inference operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferenceResult {
    /// The predicted label
    pub label: RiskLabel,
    /// Inference latency in microseconds
    pub latency_us: u64,
}

/// Inference engine wrapping the loaded classifier
pub struct InferenceEngine {
    classifier: Box<dyn Classifier>,
    model_path: String,
}

impl InferenceEngine {
    /// Wrap an already constructed classifier
    pub fn new(classifier: impl Classifier + 'static) -> Self {
        Self::from_boxed(Box::new(classifier), "memory".to_string())
    }

    fn from_boxed(classifier: Box<dyn Classifier>, model_path: String) -> Self {
        info!(
            "Inference engine ready: model={}, source={}",
            classifier.name(),
            model_path
        );
        Self {
            classifier,
            model_path,
        }
    }

    /// Load a model artifact, choosing the format from the file extension
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        info!("Loading risk model from {}", path.display());

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let classifier: Box<dyn Classifier> = match extension.as_deref() {
            Some("onnx") => Box::new(OnnxClassifier::load(path)?),
            Some("json") => {
                let contents = std::fs::read_to_string(path).map_err(|e| {
                    InferenceError::ModelLoadError(format!("{}: {}", path.display(), e))
                })?;
                ModelSpec::from_json_str(&contents)?.build()?
            }
            _ => {
                return Err(InferenceError::UnsupportedFormat(
                    path.display().to_string(),
                ))
            }
        };

        Ok(Self::from_boxed(classifier, path.display().to_string()))
    }

    /// Run inference on one scaled feature vector
    pub fn predict(&self, features: &ScaledFeatures) -> Result<InferenceResult, InferenceError> {
        let start = Instant::now();
        let label = self.classifier.predict(features)?;
        let latency_us = start.elapsed().as_micros() as u64;

        debug!(
            "Prediction: {} (model={}, latency={}us)",
            label.as_str(),
            self.classifier.name(),
            latency_us
        );

        Ok(InferenceResult { label, latency_us })
    }

    pub fn model_name(&self) -> String {
        self.classifier.name()
    }

    pub fn model_path(&self) -> &str {
        &self.model_path
    }
}

impl std::fmt::Debug for InferenceEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InferenceEngine")
            .field("model", &self.classifier.name())
            .field("model_path", &self.model_path)
            .finish()
    }
}
