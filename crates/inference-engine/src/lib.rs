//! Risk Classifier Inference
//!
//! Runs the pre-trained risk classifier on scaled feature vectors. Models
//! are loaded once, either as ONNX graphs executed with tract-onnx or as
//! JSON-exported linear models and voting ensembles of them.

mod classifier;
mod engine;
mod onnx;

pub use classifier::{Classifier, LogisticClassifier, ModelSpec, VotingClassifier};
pub use engine::{InferenceEngine, InferenceResult, RiskLabel};
pub use onnx::OnnxClassifier;

use thiserror::Error;

/// Errors during inference
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Model load failed: {0}")]
    ModelLoadError(String),
    #[error("Inference failed: {0}")]
    InferenceFailed(String),
    #[error("Invalid input shape: expected {expected}, got {actual}")]
    InvalidInputShape { expected: String, actual: String },
    #[error("Model returned label {0}, expected 0 or 1")]
    InvalidLabel(i64),
    #[error("Unsupported model format: {0}")]
    UnsupportedFormat(String),
}
