//! Label encoders for the categorical columns

use crate::columns::CategoricalField;
use crate::error::{ArtifactError, FeatureError};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info};

/// One encoder as it appears in the artifact file
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EncoderSpec {
    /// Fitted classes; the code is the position in the list
    Classes(Vec<String>),
    /// Explicit label to code mapping
    Mapping(BTreeMap<String, i64>),
}

/// Fitted vocabulary of a single categorical column
#[derive(Debug, Clone, Default)]
pub struct LabelEncoder {
    codes: HashMap<String, i64>,
    /// Labels ordered by code
    classes: Vec<String>,
}

impl LabelEncoder {
    fn from_spec(field: CategoricalField, spec: EncoderSpec) -> Result<Self, ArtifactError> {
        let pairs: Vec<(String, i64)> = match spec {
            EncoderSpec::Classes(classes) => classes
                .into_iter()
                .enumerate()
                .map(|(code, label)| (label, code as i64))
                .collect(),
            EncoderSpec::Mapping(mapping) => mapping.into_iter().collect(),
        };

        if pairs.is_empty() {
            return Err(ArtifactError::EmptyEncoder(field));
        }

        let mut codes = HashMap::with_capacity(pairs.len());
        let mut by_code = BTreeMap::new();
        for (label, code) in pairs {
            if by_code.insert(code, label.clone()).is_some() {
                return Err(ArtifactError::DuplicateCode { field, code });
            }
            if codes.insert(label.clone(), code).is_some() {
                return Err(ArtifactError::DuplicateLabel { field, label });
            }
        }

        Ok(Self {
            codes,
            classes: by_code.into_values().collect(),
        })
    }

    /// Code for a label, if the label was seen at training time
    pub fn encode(&self, label: &str) -> Option<i64> {
        self.codes.get(label).copied()
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

/// Label encoders for every categorical column
///
/// Holds exactly one encoder per `CategoricalField`, so looking up a field
/// cannot fail; only an unseen label can.
#[derive(Debug, Clone)]
pub struct EncoderTable {
    encoders: [LabelEncoder; CategoricalField::COUNT],
}

impl EncoderTable {
    /// Load the encoder table from a JSON artifact
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        info!("Loading label encoders from {}", path.display());

        let contents = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Parse the encoder table from JSON
    ///
    /// Keys naming columns other than the five categorical features (for
    /// example the training target) are skipped.
    pub fn from_json_str(json: &str) -> Result<Self, ArtifactError> {
        let raw: BTreeMap<String, EncoderSpec> = serde_json::from_str(json)?;

        let specs = raw.into_iter().filter_map(|(key, spec)| match key.parse::<CategoricalField>() {
            Ok(field) => Some((field, spec)),
            Err(()) => {
                debug!("Ignoring encoder for non-feature column {:?}", key);
                None
            }
        });
        Self::from_specs(specs)
    }

    /// Build a table from in-memory class lists (code = position)
    pub fn from_classes<I, S>(
        classes: impl IntoIterator<Item = (CategoricalField, I)>,
    ) -> Result<Self, ArtifactError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_specs(classes.into_iter().map(|(field, labels)| {
            (
                field,
                EncoderSpec::Classes(labels.into_iter().map(Into::into).collect()),
            )
        }))
    }

    /// Fill one slot per field; every field must be given exactly once
    fn from_specs(
        specs: impl IntoIterator<Item = (CategoricalField, EncoderSpec)>,
    ) -> Result<Self, ArtifactError> {
        let mut slots: [Option<LabelEncoder>; CategoricalField::COUNT] = Default::default();
        for (field, spec) in specs {
            let slot = &mut slots[field.index()];
            if slot.is_some() {
                return Err(ArtifactError::DuplicateEncoder(field));
            }
            *slot = Some(LabelEncoder::from_spec(field, spec)?);
        }

        if let Some(missing) = CategoricalField::ALL
            .into_iter()
            .find(|field| slots[field.index()].is_none())
        {
            return Err(ArtifactError::MissingEncoder(missing));
        }

        Ok(Self {
            encoders: slots.map(Option::unwrap_or_default),
        })
    }

    /// Encode a label for the given field
    pub fn encode(&self, field: CategoricalField, label: &str) -> Result<i64, FeatureError> {
        self.encoders[field.index()]
            .encode(label)
            .ok_or_else(|| FeatureError::UnknownCategory {
                field,
                value: label.to_string(),
            })
    }

    /// Known labels for a field, ordered by code
    pub fn classes(&self, field: CategoricalField) -> &[String] {
        self.encoders[field.index()].classes()
    }
}
