use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub training: TrainingConfig,
    pub prediction: PredictionConfig,
    pub facilities: FacilitiesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_max_age: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8081,
            cors_max_age: 3600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingConfig {
    pub simulated_duration_ms: u64,
    pub model_dir: String,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            simulated_duration_ms: 2000,
            model_dir: "models".to_string(),
        }
    }
}

impl TrainingConfig {
    pub fn simulated_duration(&self) -> Duration {
        Duration::from_millis(self.simulated_duration_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictionConfig {
    pub max_results: usize,
    /// Minimum unrounded score for a disease to be scored at all.
    pub inclusion_threshold: f64,
    /// Minimum final probability for a result to be returned.
    pub display_threshold: f64,
    pub probability_cap: f64,
}

impl Default for PredictionConfig {
    fn default() -> Self {
        Self {
            max_results: 5,
            inclusion_threshold: 25.0,
            display_threshold: 20.0,
            probability_cap: 95.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FacilitiesConfig {
    pub default_radius_miles: f64,
    pub max_results: usize,
}

impl Default for FacilitiesConfig {
    fn default() -> Self {
        Self {
            default_radius_miles: 10.0,
            max_results: 50,
        }
    }
}

impl AppConfig {
    /// Loads `$APP_CONFIG`, or `config/app.yaml` next to the workspace root.
    /// A missing file yields the defaults; `HOST` and `PORT` override the server section.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();
        let mut config = if path.exists() {
            log::info!("Loading configuration from {}", path.display());
            Self::from_file(&path)?
        } else {
            log::warn!(
                "No configuration file at {}, using defaults",
                path.display()
            );
            Self::default()
        };

        if let Ok(host) = std::env::var("HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| ConfigError::Invalid(format!("PORT is not a valid port: {}", port)))?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config_str = std::fs::read_to_string(path)?;
        Self::from_yaml(&config_str)
    }

    pub fn from_yaml(config_str: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = serde_yaml::from_str(config_str)?;
        config.validate()?;
        Ok(config)
    }

    fn config_path() -> PathBuf {
        if let Ok(path) = std::env::var("APP_CONFIG") {
            return PathBuf::from(path);
        }
        match std::env::var("CARGO_MANIFEST_DIR") {
            Ok(manifest_dir) => PathBuf::from(format!("{}/../config/app.yaml", manifest_dir)),
            Err(_) => PathBuf::from("config/app.yaml"),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        let prediction = &self.prediction;
        if !(prediction.probability_cap > 0.0 && prediction.probability_cap <= 100.0) {
            return Err(ConfigError::Invalid(
                "prediction.probability_cap must be in (0, 100]".into(),
            ));
        }
        for (name, value) in [
            ("inclusion_threshold", prediction.inclusion_threshold),
            ("display_threshold", prediction.display_threshold),
        ] {
            if !(0.0..=prediction.probability_cap).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "prediction.{} must be within [0, probability_cap]",
                    name
                )));
            }
        }
        if prediction.max_results == 0 {
            return Err(ConfigError::Invalid(
                "prediction.max_results must be at least 1".into(),
            ));
        }
        if self.facilities.default_radius_miles <= 0.0 {
            return Err(ConfigError::Invalid(
                "facilities.default_radius_miles must be positive".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = AppConfig::from_yaml(
            r#"
training:
  simulated_duration_ms: 50
prediction:
  max_results: 3
"#,
        )
        .unwrap();
        assert_eq!(config.training.simulated_duration(), Duration::from_millis(50));
        assert_eq!(config.training.model_dir, "models");
        assert_eq!(config.prediction.max_results, 3);
        assert_eq!(config.prediction.probability_cap, 95.0);
        assert_eq!(config.server.port, 8081);
    }

    #[test]
    fn test_threshold_above_cap_is_rejected() {
        let result = AppConfig::from_yaml(
            r#"
prediction:
  probability_cap: 90
  display_threshold: 92
"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let result = AppConfig::from_yaml("server: [not, a, map");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_shipped_config_file_is_valid() {
        let path = PathBuf::from(format!(
            "{}/../config/app.yaml",
            env!("CARGO_MANIFEST_DIR")
        ));
        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.prediction.max_results, 5);
    }
}
