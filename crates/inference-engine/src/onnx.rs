//! ONNX classifier executed with tract

use crate::classifier::Classifier;
use crate::engine::RiskLabel;
use crate::InferenceError;
use feature_engine::{ScaledFeatures, FEATURE_DIMENSION};
use std::path::Path;
use tract_onnx::prelude::*;
use tracing::info;

/// Classifier exported to ONNX
///
/// Expects a float32 input of shape `[1, 9]` and reads the predicted label
/// from the first output, as produced by the usual scikit-learn exporters.
pub struct OnnxClassifier {
    plan: TypedRunnableModel<TypedModel>,
}

impl OnnxClassifier {
    /// Load and optimize the ONNX graph
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InferenceError> {
        let path = path.as_ref();
        let load_error =
            |e: TractError| InferenceError::ModelLoadError(format!("{}: {}", path.display(), e));

        let plan = tract_onnx::onnx()
            .model_for_path(path)
            .and_then(|model| {
                model.with_input_fact(0, f32::fact([1, FEATURE_DIMENSION]).into())
            })
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(load_error)?;

        info!("ONNX model loaded from {}", path.display());
        Ok(Self { plan })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &ScaledFeatures) -> Result<RiskLabel, InferenceError> {
        let failed = |e: TractError| InferenceError::InferenceFailed(e.to_string());

        let input = Tensor::from_shape(&[1, FEATURE_DIMENSION], &features.to_f32()[..]).map_err(failed)?;
        let outputs = self.plan.run(tvec!(input.into())).map_err(failed)?;

        let labels = outputs.first().ok_or_else(|| {
            InferenceError::InferenceFailed("model produced no outputs".to_string())
        })?;
        let labels = labels.cast_to::<i64>().map_err(failed)?;
        let codes = labels.as_slice::<i64>().map_err(failed)?;

        match codes {
            [code] => RiskLabel::from_code(*code),
            _ => Err(InferenceError::InvalidInputShape {
                expected: "1 label".to_string(),
                actual: format!("{} labels", codes.len()),
            }),
        }
    }

    fn name(&self) -> String {
        "onnx".to_string()
    }
}
