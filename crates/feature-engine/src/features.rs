//! Feature Vector Assembly

use crate::columns::{CategoricalField, FeatureColumn, FEATURE_DIMENSION};
use crate::encoder::EncoderTable;
use crate::error::{ArtifactError, FeatureError};
use crate::scaler::Scaler;
use applicant_validator::ApplicantRecord;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Encoded feature vector, before scaling
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector([f64; FEATURE_DIMENSION]);

impl FeatureVector {
    pub fn new(values: [f64; FEATURE_DIMENSION]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; FEATURE_DIMENSION] {
        &self.0
    }

    pub fn get(&self, column: FeatureColumn) -> f64 {
        self.0[column.index()]
    }
}

/// Scaled feature vector, ready for the classifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaledFeatures([f64; FEATURE_DIMENSION]);

impl ScaledFeatures {
    pub fn new(values: [f64; FEATURE_DIMENSION]) -> Self {
        Self(values)
    }

    pub fn values(&self) -> &[f64; FEATURE_DIMENSION] {
        &self.0
    }

    pub fn get(&self, column: FeatureColumn) -> f64 {
        self.0[column.index()]
    }

    /// Single-precision copy for models with float32 inputs
    pub fn to_f32(&self) -> [f32; FEATURE_DIMENSION] {
        self.0.map(|v| v as f32)
    }
}

/// Maps validated applicant records onto the model's input layout
///
/// Holds only the immutable encoder and scaler artifacts.
#[derive(Debug, Clone)]
pub struct FeatureAdapter {
    encoders: EncoderTable,
    scaler: Scaler,
}

impl FeatureAdapter {
    pub fn new(encoders: EncoderTable, scaler: Scaler) -> Self {
        Self { encoders, scaler }
    }

    /// Load encoder and scaler artifacts from disk
    pub fn load(
        encoders_path: impl AsRef<Path>,
        scaler_path: impl AsRef<Path>,
    ) -> Result<Self, ArtifactError> {
        let encoders = EncoderTable::from_path(encoders_path)?;
        let scaler = Scaler::from_path(scaler_path)?;
        Ok(Self::new(encoders, scaler))
    }

    pub fn encoders(&self) -> &EncoderTable {
        &self.encoders
    }

    pub fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    /// Encode a record into column order
    ///
    /// Stops at the first categorical value the encoders do not know.
    pub fn encode(&self, record: &ApplicantRecord) -> Result<FeatureVector, FeatureError> {
        let mut values = [0.0; FEATURE_DIMENSION];

        for column in FeatureColumn::ALL {
            values[column.index()] = match column.categorical() {
                Some(field) => self.encoders.encode(field, label_of(field, record))? as f64,
                None => numeric_value(column, record),
            };
        }

        Ok(FeatureVector::new(values))
    }

    /// Scale an encoded vector
    pub fn scale(&self, features: &FeatureVector) -> ScaledFeatures {
        self.scaler.transform(features)
    }

    /// Encode then scale
    pub fn prepare(&self, record: &ApplicantRecord) -> Result<ScaledFeatures, FeatureError> {
        let encoded = self.encode(record)?;
        debug!("Encoded features: {:?}", encoded.values());
        Ok(self.scale(&encoded))
    }
}

fn label_of(field: CategoricalField, record: &ApplicantRecord) -> &str {
    match field {
        CategoricalField::Sex => record.sex(),
        CategoricalField::Housing => record.housing(),
        CategoricalField::SavingAccounts => record.saving_accounts(),
        CategoricalField::CheckingAccount => record.checking_account(),
        CategoricalField::Purpose => record.purpose(),
    }
}

fn numeric_value(column: FeatureColumn, record: &ApplicantRecord) -> f64 {
    match column {
        FeatureColumn::Age => f64::from(record.age()),
        FeatureColumn::Job => f64::from(record.job()),
        FeatureColumn::CreditAmount => f64::from(record.credit_amount()),
        FeatureColumn::Duration => f64::from(record.duration()),
        // Categorical columns are filled from the encoders.
        FeatureColumn::Sex
        | FeatureColumn::Housing
        | FeatureColumn::SavingAccounts
        | FeatureColumn::CheckingAccount
        | FeatureColumn::Purpose => 0.0,
    }
}
