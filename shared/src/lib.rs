use chrono::{DateTime, Utc};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use strum_macros::{EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SymptomSeverity {
    Mild,
    Moderate,
    Severe,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DiseaseSeverity {
    Low,
    Medium,
    High,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Symptom {
    pub id: String,
    pub name: String,
    pub category: String,
    pub severity: SymptomSeverity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Disease {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
    pub severity: DiseaseSeverity,
    /// Ids into the symptom table.
    pub symptoms: Vec<String>,
    pub treatments: Vec<String>,
    pub prevention: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Confirmed,
    RuledOut,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingDataPoint {
    pub id: String,
    pub symptoms: Vec<String>,
    pub disease: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    pub outcome: Outcome,
    pub confidence: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionRequest {
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub age: Option<f64>,
    #[serde(default)]
    pub gender: Option<Gender>,
    /// Accepted for forward compatibility; not used by scoring.
    #[serde(default)]
    pub medical_history: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeDiagnosis {
    pub disease: String,
    pub probability: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub disease: String,
    /// Rounded percentage shown to callers.
    pub probability: u32,
    /// Pre-rounding score in [0, 0.95].
    pub confidence: f64,
    pub description: String,
    pub severity: DiseaseSeverity,
    pub recommendations: Vec<String>,
    pub alternative_diagnoses: Vec<AlternativeDiagnosis>,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Algorithm {
    RandomForest,
    NeuralNetwork,
    Svm,
    GradientBoosting,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelConfig {
    pub algorithm: Algorithm,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_estimators: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub learning_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden_layers: Option<Vec<u32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regularization: Option<f64>,
    pub test_size: f64,
    pub random_state: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::RandomForest,
            n_estimators: Some(100),
            max_depth: Some(10),
            learning_rate: Some(0.01),
            hidden_layers: Some(vec![64, 32]),
            regularization: Some(0.01),
            test_size: 0.2,
            random_state: 42,
        }
    }
}

impl ModelConfig {
    pub fn neural_network() -> Self {
        Self {
            algorithm: Algorithm::NeuralNetwork,
            n_estimators: None,
            max_depth: None,
            learning_rate: Some(0.001),
            hidden_layers: Some(vec![64, 32, 16]),
            regularization: Some(0.01),
            test_size: 0.2,
            random_state: 42,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub confusion_matrix: [[u32; 2]; 2],
    pub training_loss: Vec<f64>,
    pub validation_loss: Vec<f64>,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JobStatus {
    #[default]
    Pending,
    Training,
    Completed,
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Jobs only move forward: pending -> training -> completed | failed.
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::Pending, JobStatus::Training)
                | (JobStatus::Training, JobStatus::Completed)
                | (JobStatus::Training, JobStatus::Failed)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
pub struct JobId(pub String);

impl JobId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for JobId {
    fn from(id: &str) -> Self {
        JobId(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingJob {
    pub id: JobId,
    pub status: JobStatus,
    pub config: ModelConfig,
    pub metrics: Option<ModelMetrics>,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
    pub model_path: Option<String>,
}

/// List view of a job; metrics and the full config are left out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    pub id: JobId,
    pub status: JobStatus,
    pub algorithm: Algorithm,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

impl From<&TrainingJob> for JobSummary {
    fn from(job: &TrainingJob) -> Self {
        Self {
            id: job.id.clone(),
            status: job.status,
            algorithm: job.config.algorithm,
            created_at: job.created_at,
            completed_at: job.completed_at,
            error: job.error.clone(),
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FacilityType {
    Clinic,
    Pharmacy,
    Hospital,
    MedicalShop,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthcareFacility {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub facility_type: FacilityType,
    pub address: String,
    pub phone: String,
    pub rating: f64,
    pub distance: String,
    pub is_open: bool,
    pub open_hours: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub specialties: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub services: Vec<String>,
    pub coordinates: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_algorithm_string_forms() {
        assert_eq!(Algorithm::GradientBoosting.to_string(), "gradient_boosting");
        assert_eq!(Algorithm::from_str("svm").unwrap(), Algorithm::Svm);
        assert!(Algorithm::from_str("decision_tree").is_err());
    }

    #[test]
    fn test_job_status_transitions_only_move_forward() {
        assert!(JobStatus::Pending.can_transition_to(JobStatus::Training));
        assert!(JobStatus::Training.can_transition_to(JobStatus::Completed));
        assert!(JobStatus::Training.can_transition_to(JobStatus::Failed));
        assert!(!JobStatus::Pending.can_transition_to(JobStatus::Completed));
        assert!(!JobStatus::Completed.can_transition_to(JobStatus::Training));
        assert!(!JobStatus::Failed.can_transition_to(JobStatus::Pending));
        assert!(JobStatus::Failed.is_terminal());
        assert!(!JobStatus::Training.is_terminal());
        assert_eq!(JobStatus::default(), JobStatus::Pending);
    }

    #[test]
    fn test_model_config_uses_camel_case_and_skips_missing_fields() {
        let json = serde_json::to_value(ModelConfig::neural_network()).unwrap();
        assert_eq!(json["algorithm"], "neural_network");
        assert_eq!(json["hiddenLayers"], serde_json::json!([64, 32, 16]));
        assert_eq!(json["testSize"], 0.2);
        assert!(json.get("nEstimators").is_none());
    }

    #[test]
    fn test_prediction_request_fields_are_optional() {
        let request: PredictionRequest =
            serde_json::from_str(r#"{"symptoms": ["fever"], "gender": "female"}"#).unwrap();
        assert_eq!(request.symptoms, vec!["fever".to_string()]);
        assert_eq!(request.gender, Some(Gender::Female));
        assert!(request.age.is_none());
        assert!(request.medical_history.is_empty());
    }

    #[test]
    fn test_facility_type_serializes_under_type_key() {
        let facility = HealthcareFacility {
            id: "1".into(),
            name: "Test".into(),
            facility_type: FacilityType::MedicalShop,
            address: "1 Road".into(),
            phone: "555".into(),
            rating: 4.0,
            distance: "1 mile".into(),
            is_open: true,
            open_hours: "24 Hours".into(),
            specialties: vec![],
            services: vec!["Delivery".into()],
            coordinates: Coordinates { lat: 1.0, lng: 2.0 },
            website: None,
            email: None,
            description: None,
        };
        let json = serde_json::to_value(&facility).unwrap();
        assert_eq!(json["type"], "medical_shop");
        assert_eq!(json["isOpen"], true);
        assert!(json.get("specialties").is_none());
    }
}
