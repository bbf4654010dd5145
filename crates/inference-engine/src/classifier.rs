//! Classifier trait and JSON-exported models

use crate::engine::RiskLabel;
use crate::InferenceError;
use feature_engine::{ScaledFeatures, FEATURE_DIMENSION};
use serde::Deserialize;

/// A pre-trained binary classifier
///
/// Implementations are immutable once constructed and may be shared
/// across request handlers.
pub trait Classifier: Send + Sync {
    /// Predict the label for a single row
    fn predict(&self, features: &ScaledFeatures) -> Result<RiskLabel, InferenceError>;

    /// Short model description for logs and health output
    fn name(&self) -> String;
}

/// Linear decision function; high risk when the score is positive
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticClassifier {
    coefficients: [f64; FEATURE_DIMENSION],
    intercept: f64,
}

impl LogisticClassifier {
    pub fn new(coefficients: [f64; FEATURE_DIMENSION], intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Raw decision score
    pub fn decision(&self, features: &ScaledFeatures) -> f64 {
        self.coefficients
            .iter()
            .zip(features.values())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept
    }
}

impl Classifier for LogisticClassifier {
    fn predict(&self, features: &ScaledFeatures) -> Result<RiskLabel, InferenceError> {
        let score = self.decision(features);
        if !score.is_finite() {
            return Err(InferenceError::InferenceFailed(format!(
                "decision score is {score}"
            )));
        }
        Ok(if score > 0.0 {
            RiskLabel::High
        } else {
            RiskLabel::Low
        })
    }

    fn name(&self) -> String {
        "logistic".to_string()
    }
}

/// Hard-voting ensemble
///
/// Each member casts its (optionally weighted) vote; ties go to the lower
/// label, so an even split is low risk.
pub struct VotingClassifier {
    members: Vec<Box<dyn Classifier>>,
    weights: Vec<f64>,
}

impl VotingClassifier {
    pub fn new(members: Vec<Box<dyn Classifier>>) -> Result<Self, InferenceError> {
        let weights = vec![1.0; members.len()];
        Self::weighted(members, weights)
    }

    pub fn weighted(
        members: Vec<Box<dyn Classifier>>,
        weights: Vec<f64>,
    ) -> Result<Self, InferenceError> {
        if members.is_empty() {
            return Err(InferenceError::ModelLoadError(
                "voting ensemble has no members".to_string(),
            ));
        }
        if weights.len() != members.len() {
            return Err(InferenceError::ModelLoadError(format!(
                "voting ensemble has {} members but {} weights",
                members.len(),
                weights.len()
            )));
        }
        if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(InferenceError::ModelLoadError(format!(
                "voting weight {bad} must be finite and non-negative"
            )));
        }
        Ok(Self { members, weights })
    }
}

impl Classifier for VotingClassifier {
    fn predict(&self, features: &ScaledFeatures) -> Result<RiskLabel, InferenceError> {
        let mut votes = [0.0; 2];
        for (member, weight) in self.members.iter().zip(&self.weights) {
            votes[member.predict(features)?.code() as usize] += weight;
        }
        Ok(if votes[1] > votes[0] {
            RiskLabel::High
        } else {
            RiskLabel::Low
        })
    }

    fn name(&self) -> String {
        format!("voting({})", self.members.len())
    }
}

/// JSON model artifact
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelSpec {
    Logistic {
        coefficients: Vec<f64>,
        intercept: f64,
    },
    Voting {
        members: Vec<ModelSpec>,
        #[serde(default)]
        weights: Option<Vec<f64>>,
    },
}

impl ModelSpec {
    pub fn from_json_str(json: &str) -> Result<Self, InferenceError> {
        serde_json::from_str(json).map_err(|e| InferenceError::ModelLoadError(e.to_string()))
    }

    /// Instantiate the described classifier
    pub fn build(self) -> Result<Box<dyn Classifier>, InferenceError> {
        match self {
            ModelSpec::Logistic {
                coefficients,
                intercept,
            } => {
                let actual = coefficients.len();
                let coefficients: [f64; FEATURE_DIMENSION] =
                    coefficients
                        .try_into()
                        .map_err(|_| InferenceError::InvalidInputShape {
                            expected: FEATURE_DIMENSION.to_string(),
                            actual: actual.to_string(),
                        })?;
                Ok(Box::new(LogisticClassifier::new(coefficients, intercept)))
            }
            ModelSpec::Voting { members, weights } => {
                let members = members
                    .into_iter()
                    .map(ModelSpec::build)
                    .collect::<Result<Vec<_>, _>>()?;
                let voting = match weights {
                    Some(weights) => VotingClassifier::weighted(members, weights)?,
                    None => VotingClassifier::new(members)?,
                };
                Ok(Box::new(voting))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always returns the same label
    struct Fixed(RiskLabel);

    impl Classifier for Fixed {
        fn predict(&self, _: &ScaledFeatures) -> Result<RiskLabel, InferenceError> {
            Ok(self.0)
        }

        fn name(&self) -> String {
            "fixed".to_string()
        }
    }

    fn zeros() -> ScaledFeatures {
        ScaledFeatures::new([0.0; FEATURE_DIMENSION])
    }

    #[test]
    fn test_logistic_boundary_is_low_risk() {
        let model = LogisticClassifier::new([1.0; FEATURE_DIMENSION], 0.0);
        assert_eq!(model.decision(&zeros()), 0.0);
        assert_eq!(model.predict(&zeros()).unwrap(), RiskLabel::Low);

        let model = LogisticClassifier::new([1.0; FEATURE_DIMENSION], 0.1);
        assert_eq!(model.predict(&zeros()).unwrap(), RiskLabel::High);
    }

    #[test]
    fn test_majority_vote() {
        let voting = VotingClassifier::new(vec![
            Box::new(Fixed(RiskLabel::High)),
            Box::new(Fixed(RiskLabel::Low)),
            Box::new(Fixed(RiskLabel::High)),
        ])
        .unwrap();
        assert_eq!(voting.predict(&zeros()).unwrap(), RiskLabel::High);
    }

    #[test]
    fn test_tied_vote_is_low_risk() {
        let voting = VotingClassifier::new(vec![
            Box::new(Fixed(RiskLabel::High)),
            Box::new(Fixed(RiskLabel::Low)),
        ])
        .unwrap();
        assert_eq!(voting.predict(&zeros()).unwrap(), RiskLabel::Low);
    }

    #[test]
    fn test_weighted_vote() {
        let voting = VotingClassifier::weighted(
            vec![
                Box::new(Fixed(RiskLabel::High)),
                Box::new(Fixed(RiskLabel::Low)),
                Box::new(Fixed(RiskLabel::Low)),
            ],
            vec![3.0, 1.0, 1.0],
        )
        .unwrap();
        assert_eq!(voting.predict(&zeros()).unwrap(), RiskLabel::High);
    }

    #[test]
    fn test_invalid_ensembles() {
        assert!(VotingClassifier::new(Vec::new()).is_err());
        assert!(VotingClassifier::weighted(vec![Box::new(Fixed(RiskLabel::Low))], vec![]).is_err());
    }

    #[test]
    fn test_bad_weights_rejected() {
        for weight in [f64::NAN, f64::INFINITY, -1.0] {
            let voting = VotingClassifier::weighted(
                vec![Box::new(Fixed(RiskLabel::High)), Box::new(Fixed(RiskLabel::Low))],
                vec![1.0, weight],
            );
            assert!(matches!(voting, Err(InferenceError::ModelLoadError(_))));
        }

        let spec = ModelSpec::from_json_str(
            r#"{
                "kind": "voting",
                "weights": [-2.0],
                "members": [
                    {"kind": "logistic", "coefficients": [0,0,0,0,0,0,0,0,0], "intercept": 1.0}
                ]
            }"#,
        )
        .unwrap();
        assert!(matches!(spec.build(), Err(InferenceError::ModelLoadError(_))));
    }

    #[test]
    fn test_model_spec_parsing() {
        let spec = ModelSpec::from_json_str(
            r#"{
                "kind": "voting",
                "weights": [1.0, 2.0],
                "members": [
                    {"kind": "logistic", "coefficients": [0,0,0,0,0,0,0,0,0], "intercept": 1.0},
                    {"kind": "logistic", "coefficients": [0,0,0,0,0,0,0,0,0], "intercept": -1.0}
                ]
            }"#,
        )
        .unwrap();
        let model = spec.build().unwrap();
        assert_eq!(model.name(), "voting(2)");
        assert_eq!(model.predict(&zeros()).unwrap(), RiskLabel::Low);
    }

    #[test]
    fn test_wrong_coefficient_count() {
        let spec = ModelSpec::Logistic {
            coefficients: vec![1.0, 2.0],
            intercept: 0.0,
        };
        assert!(matches!(
            spec.build(),
            Err(InferenceError::InvalidInputShape { .. })
        ));
    }

    #[test]
    fn test_unknown_kind_rejected() {
        assert!(matches!(
            ModelSpec::from_json_str(r#"{"kind": "random_forest"}"#),
            Err(InferenceError::ModelLoadError(_))
        ));
    }
}
