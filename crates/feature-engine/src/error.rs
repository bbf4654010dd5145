//! Feature preparation and artifact errors

use crate::columns::CategoricalField;
use thiserror::Error;

/// Per-submission failure while preparing features
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FeatureError {
    /// Categorical value absent from the training-time vocabulary
    #[error("Invalid value for {field}. Please select a valid option.")]
    UnknownCategory {
        field: CategoricalField,
        value: String,
    },
}

/// Failure while loading the encoder or scaler artifacts
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Failed to read artifact {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse artifact: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No encoder provided for {0}")]
    MissingEncoder(CategoricalField),

    #[error("More than one encoder provided for {0}")]
    DuplicateEncoder(CategoricalField),

    #[error("Encoder for {0} has no classes")]
    EmptyEncoder(CategoricalField),

    #[error("Encoder for {field} lists {label:?} more than once")]
    DuplicateLabel {
        field: CategoricalField,
        label: String,
    },

    #[error("Encoder for {field} assigns code {code} to more than one label")]
    DuplicateCode { field: CategoricalField, code: i64 },

    #[error("Scaler {parameter} has {actual} entries, expected {expected}")]
    DimensionMismatch {
        parameter: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid scaler parameter: {0}")]
    InvalidParameter(String),
}
