use serde::Deserialize;
use shared::{Algorithm, JobId, ModelConfig};
use std::str::FromStr;
use strum::IntoEnumIterator;
use thiserror::Error;

pub fn supported_algorithms() -> String {
    Algorithm::iter()
        .map(|algorithm| algorithm.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TrainingError {
    #[error("Invalid algorithm '{0}'. Must be one of: {supported}", supported = supported_algorithms())]
    InvalidAlgorithm(String),
    #[error("Invalid hyperparameter: {0}")]
    InvalidHyperparameter(String),
    #[error("Training dataset is empty")]
    EmptyDataset,
    #[error("Training job not found: {0}")]
    NotFound(JobId),
    #[error("Job {id} cannot move from {from} to {to}")]
    InvalidTransition {
        id: JobId,
        from: shared::JobStatus,
        to: shared::JobStatus,
    },
}

impl TrainingError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TrainingError::InvalidAlgorithm(_) | TrainingError::InvalidHyperparameter(_)
        )
    }
}

/// Body of a train request. Every field is optional and missing ones take the
/// `ModelConfig::default()` values.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainRequest {
    pub algorithm: Option<String>,
    pub n_estimators: Option<u32>,
    pub max_depth: Option<u32>,
    pub learning_rate: Option<f64>,
    pub hidden_layers: Option<Vec<u32>>,
    pub regularization: Option<f64>,
    pub test_size: Option<f64>,
    pub random_state: Option<u64>,
}

impl TrainRequest {
    pub fn into_config(self) -> Result<ModelConfig, TrainingError> {
        let defaults = ModelConfig::default();
        let algorithm = match self.algorithm {
            Some(name) => {
                Algorithm::from_str(&name).map_err(|_| TrainingError::InvalidAlgorithm(name))?
            }
            None => defaults.algorithm,
        };

        Ok(ModelConfig {
            algorithm,
            n_estimators: self.n_estimators.or(defaults.n_estimators),
            max_depth: self.max_depth.or(defaults.max_depth),
            learning_rate: self.learning_rate.or(defaults.learning_rate),
            hidden_layers: self.hidden_layers.or(defaults.hidden_layers),
            regularization: self.regularization.or(defaults.regularization),
            test_size: self.test_size.unwrap_or(defaults.test_size),
            random_state: self.random_state.unwrap_or(defaults.random_state),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_request_gets_defaults() {
        let config = TrainRequest::default().into_config().unwrap();
        assert_eq!(config, ModelConfig::default());
        assert_eq!(config.n_estimators, Some(100));
        assert_eq!(config.hidden_layers, Some(vec![64, 32]));
        assert_eq!(config.random_state, 42);
    }

    #[test]
    fn test_supplied_fields_override_defaults() {
        let request: TrainRequest = serde_json::from_str(
            r#"{"algorithm": "neural_network", "learningRate": 0.001, "hiddenLayers": [128]}"#,
        )
        .unwrap();
        let config = request.into_config().unwrap();
        assert_eq!(config.algorithm, Algorithm::NeuralNetwork);
        assert_eq!(config.learning_rate, Some(0.001));
        assert_eq!(config.hidden_layers, Some(vec![128]));
        assert_eq!(config.max_depth, Some(10));
    }

    #[test]
    fn test_unknown_algorithm_is_a_validation_error() {
        let request = TrainRequest {
            algorithm: Some("decision_tree".into()),
            ..Default::default()
        };
        let error = request.into_config().unwrap_err();
        assert_eq!(error, TrainingError::InvalidAlgorithm("decision_tree".into()));
        assert!(error.is_validation());
        assert_eq!(
            error.to_string(),
            "Invalid algorithm 'decision_tree'. Must be one of: random_forest, neural_network, svm, gradient_boosting"
        );
    }
}
