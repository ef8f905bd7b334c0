use log::{debug, info};
use shared::{ModelConfig, ModelMetrics};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use super::model::TrainingError;
use crate::catalog::TRAINING_DATA;
use crate::config::TrainingConfig;

const SIMULATED_ACCURACY: f64 = 0.95;

pub type FitFuture<'a> =
    Pin<Box<dyn Future<Output = Result<ModelMetrics, TrainingError>> + Send + 'a>>;

/// The fit step run by the job registry for each accepted job.
pub trait Trainer: Send + Sync {
    fn fit<'a>(&'a self, config: &'a ModelConfig) -> FitFuture<'a>;
}

/// Stands in for a real model fit: validates the hyperparameters, waits for
/// the configured duration and reports fixed metrics.
#[derive(Debug, Clone)]
pub struct SimulatedTrainer {
    duration: Duration,
    dataset_size: usize,
}

impl SimulatedTrainer {
    pub fn new(duration: Duration, dataset_size: usize) -> Self {
        Self {
            duration,
            dataset_size,
        }
    }

    pub fn from_config(config: &TrainingConfig) -> Self {
        Self::new(config.simulated_duration(), TRAINING_DATA.len())
    }
}

impl Trainer for SimulatedTrainer {
    fn fit<'a>(&'a self, config: &'a ModelConfig) -> FitFuture<'a> {
        Box::pin(async move {
            validate_hyperparameters(config)?;
            if self.dataset_size == 0 {
                return Err(TrainingError::EmptyDataset);
            }

            info!(
                "Fitting {} model on {} cases (test size {})",
                config.algorithm, self.dataset_size, config.test_size
            );
            tokio::time::sleep(self.duration).await;

            let metrics = simulated_metrics(self.dataset_size);
            debug!("Simulated fit finished with accuracy {}", metrics.accuracy);
            Ok(metrics)
        })
    }
}

pub fn validate_hyperparameters(config: &ModelConfig) -> Result<(), TrainingError> {
    if !(config.test_size > 0.0 && config.test_size < 1.0) {
        return Err(TrainingError::InvalidHyperparameter(format!(
            "testSize must be in (0, 1), got {}",
            config.test_size
        )));
    }
    if let Some(rate) = config.learning_rate {
        if !(rate > 0.0) {
            return Err(TrainingError::InvalidHyperparameter(format!(
                "learningRate must be positive, got {}",
                rate
            )));
        }
    }
    if config.n_estimators == Some(0) {
        return Err(TrainingError::InvalidHyperparameter(
            "nEstimators must be at least 1".into(),
        ));
    }
    if config.max_depth == Some(0) {
        return Err(TrainingError::InvalidHyperparameter(
            "maxDepth must be at least 1".into(),
        ));
    }
    if let Some(layers) = &config.hidden_layers {
        if layers.iter().any(|&width| width == 0) {
            return Err(TrainingError::InvalidHyperparameter(
                "hiddenLayers must not contain empty layers".into(),
            ));
        }
    }
    Ok(())
}

pub fn simulated_metrics(dataset_size: usize) -> ModelMetrics {
    let total = dataset_size as u32;
    let correct = (dataset_size as f64 * SIMULATED_ACCURACY).floor() as u32;
    let wrong = total - correct;

    ModelMetrics {
        accuracy: SIMULATED_ACCURACY,
        precision: 0.93,
        recall: 0.96,
        f1_score: 0.945,
        confusion_matrix: [[correct, wrong], [wrong, correct]],
        training_loss: vec![0.6, 0.4, 0.25, 0.15, 0.08],
        validation_loss: vec![0.65, 0.45, 0.28, 0.18, 0.12],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_for_shipped_dataset() {
        let metrics = simulated_metrics(12);
        assert_eq!(metrics.accuracy, 0.95);
        assert_eq!(metrics.confusion_matrix, [[11, 1], [1, 11]]);
        assert!(metrics
            .training_loss
            .windows(2)
            .all(|pair| pair[0] > pair[1]));
    }

    #[test]
    fn test_hyperparameter_validation() {
        assert!(validate_hyperparameters(&ModelConfig::default()).is_ok());
        assert!(validate_hyperparameters(&ModelConfig::neural_network()).is_ok());

        let mut config = ModelConfig::default();
        config.test_size = 1.0;
        assert!(matches!(
            validate_hyperparameters(&config),
            Err(TrainingError::InvalidHyperparameter(_))
        ));

        let mut config = ModelConfig::default();
        config.learning_rate = Some(0.0);
        assert!(validate_hyperparameters(&config).is_err());

        let mut config = ModelConfig::default();
        config.hidden_layers = Some(vec![64, 0]);
        assert!(validate_hyperparameters(&config).is_err());
    }

    #[actix_web::test]
    async fn test_fit_rejects_empty_dataset() {
        let trainer = SimulatedTrainer::new(Duration::ZERO, 0);
        let result = trainer.fit(&ModelConfig::default()).await;
        assert_eq!(result, Err(TrainingError::EmptyDataset));
    }

    #[actix_web::test]
    async fn test_fit_returns_metrics() {
        let trainer = SimulatedTrainer::new(Duration::from_millis(5), 20);
        let metrics = trainer.fit(&ModelConfig::default()).await.unwrap();
        assert_eq!(metrics.confusion_matrix, [[19, 1], [1, 19]]);
    }
}
