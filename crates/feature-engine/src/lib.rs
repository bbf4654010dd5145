//! Feature Engineering Engine
//!
//! Maps validated applicant records onto the numeric layout the risk model
//! was trained on: label encoding of categorical columns, fixed column
//! order, and scaling with pre-fit parameters.

mod columns;
mod encoder;
mod error;
mod features;
mod scaler;

pub use columns::{CategoricalField, FeatureColumn, FEATURE_DIMENSION};
pub use encoder::EncoderTable;
pub use error::{ArtifactError, FeatureError};
pub use features::{FeatureAdapter, FeatureVector, ScaledFeatures};
pub use scaler::{Scaler, ScalingMethod};
