//! Feature scaling with pre-fit parameters

use crate::columns::FEATURE_DIMENSION;
use crate::error::ArtifactError;
use crate::features::{FeatureVector, ScaledFeatures};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Scaling method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalingMethod {
    /// Z-score: (x - mean) / scale
    Standard,
    /// Range mapping: x * scale + min
    MinMax,
    /// No scaling
    Identity,
}

/// Scaler parameters as stored in the artifact file
#[derive(Debug, Clone, Deserialize)]
struct ScalerFile {
    method: ScalingMethod,
    #[serde(default)]
    mean: Vec<f64>,
    #[serde(default)]
    min: Vec<f64>,
    #[serde(default)]
    scale: Vec<f64>,
}

/// Pre-fit per-column scaler
///
/// Parameters are held in feature column order and never change after
/// loading.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "ScalerFile")]
pub enum Scaler {
    Standard {
        mean: [f64; FEATURE_DIMENSION],
        scale: [f64; FEATURE_DIMENSION],
    },
    MinMax {
        min: [f64; FEATURE_DIMENSION],
        scale: [f64; FEATURE_DIMENSION],
    },
    Identity,
}

impl Scaler {
    /// Build a standard scaler; zero scale entries are treated as 1.0
    pub fn standard(
        mean: [f64; FEATURE_DIMENSION],
        mut scale: [f64; FEATURE_DIMENSION],
    ) -> Self {
        for s in scale.iter_mut() {
            if *s == 0.0 {
                *s = 1.0;
            }
        }
        Scaler::Standard { mean, scale }
    }

    /// Load scaler parameters from a JSON artifact
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        info!("Loading scaler from {}", path.display());

        let contents = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ArtifactError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn method(&self) -> ScalingMethod {
        match self {
            Scaler::Standard { .. } => ScalingMethod::Standard,
            Scaler::MinMax { .. } => ScalingMethod::MinMax,
            Scaler::Identity => ScalingMethod::Identity,
        }
    }

    /// Apply the per-column transform
    pub fn transform(&self, features: &FeatureVector) -> ScaledFeatures {
        let x = features.values();
        let scaled = match self {
            Scaler::Standard { mean, scale } => {
                std::array::from_fn(|i| (x[i] - mean[i]) / scale[i])
            }
            Scaler::MinMax { min, scale } => std::array::from_fn(|i| x[i] * scale[i] + min[i]),
            Scaler::Identity => *x,
        };
        ScaledFeatures::new(scaled)
    }
}

impl TryFrom<ScalerFile> for Scaler {
    type Error = ArtifactError;

    fn try_from(file: ScalerFile) -> Result<Self, Self::Error> {
        match file.method {
            ScalingMethod::Standard => Ok(Scaler::standard(
                column_array("mean", file.mean)?,
                column_array("scale", file.scale)?,
            )),
            ScalingMethod::MinMax => Ok(Scaler::MinMax {
                min: column_array("min", file.min)?,
                scale: column_array("scale", file.scale)?,
            }),
            ScalingMethod::Identity => Ok(Scaler::Identity),
        }
    }
}

fn column_array(
    parameter: &'static str,
    values: Vec<f64>,
) -> Result<[f64; FEATURE_DIMENSION], ArtifactError> {
    if let Some(bad) = values.iter().find(|v| !v.is_finite()) {
        return Err(ArtifactError::InvalidParameter(format!(
            "{parameter} contains non-finite value {bad}"
        )));
    }

    let actual = values.len();
    values
        .try_into()
        .map_err(|_| ArtifactError::DimensionMismatch {
            parameter,
            expected: FEATURE_DIMENSION,
            actual,
        })
}
