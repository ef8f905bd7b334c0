use actix_web::{error::InternalError, web, HttpResponse};
use chrono::Utc;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use shared::{JobStatus, JobSummary, PredictionRequest};
use std::str::FromStr;

use crate::catalog::{self, DISEASES, SYMPTOMS, TRAINING_DATA};
use crate::facilities;
use crate::prediction::{PredictionError, ScoringEngine};
use crate::training::{JobRegistry, TrainRequest};

#[derive(Serialize)]
pub(crate) struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }

    pub fn with_details(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: Some(details.into()),
        }
    }
}

/// `{action, data}` envelope used by the POST lookup endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct ActionRequest {
    pub action: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Deserialize)]
struct SymptomIdsData {
    #[serde(rename = "symptomIds", default)]
    symptom_ids: Vec<String>,
}

#[derive(Deserialize)]
struct CategoryData {
    category: String,
}

#[derive(Deserialize)]
struct DiseaseData {
    #[serde(rename = "diseaseId")]
    disease_id: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JobListParams {
    status: Option<String>,
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let details = err.to_string();
        warn!("Rejected request body: {}", details);
        let response =
            HttpResponse::BadRequest().json(ErrorResponse::with_details("Invalid request body", details));
        InternalError::from_response(err, response).into()
    })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let details = err.to_string();
        warn!("Rejected query string: {}", details);
        let response =
            HttpResponse::BadRequest().json(ErrorResponse::with_details("Invalid query string", details));
        InternalError::from_response(err, response).into()
    })
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config()).app_data(query_config()).service(
        web::scope("/api")
            .service(web::resource("/health").route(web::get().to(health)))
            .service(
                web::scope("/ml")
                    .service(
                        web::resource("/predict")
                            .route(web::post().to(predict))
                            .route(web::get().to(predict_usage)),
                    )
                    .service(
                        web::resource("/train")
                            .route(web::post().to(create_training_job))
                            .route(web::get().to(list_training_jobs)),
                    )
                    .service(web::resource("/jobs/{job_id}").route(web::get().to(get_training_job)))
                    .service(
                        web::resource("/dataset")
                            .route(web::get().to(get_dataset))
                            .route(web::post().to(dataset_action)),
                    ),
            )
            .configure(facilities::routes::configure),
    );
}

async fn health(registry: web::Data<JobRegistry>) -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "jobs": registry.status_counts(),
    }))
}

async fn predict(
    engine: web::Data<ScoringEngine>,
    body: web::Json<PredictionRequest>,
) -> HttpResponse {
    let request = body.into_inner();
    info!("Prediction requested for {} symptom(s)", request.symptoms.len());

    match web::block(move || engine.predict(&request)).await {
        Ok(Ok(predictions)) => HttpResponse::Ok().json(json!({
            "success": true,
            "predictions": predictions,
            "timestamp": Utc::now().to_rfc3339(),
        })),
        Ok(Err(PredictionError::EmptySymptoms)) => {
            warn!("Prediction rejected: no symptoms supplied");
            HttpResponse::BadRequest().json(ErrorResponse::new(
                "Symptoms array is required and must not be empty",
            ))
        }
        Ok(Err(e)) if e.is_validation() => {
            warn!("Prediction rejected: {}", e);
            HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()))
        }
        Ok(Err(e)) => {
            error!("Prediction failed: {}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::with_details("Failed to make prediction", e.to_string()))
        }
        Err(e) => {
            error!("Prediction error: {:?}", e);
            HttpResponse::InternalServerError()
                .json(ErrorResponse::with_details("Failed to make prediction", e.to_string()))
        }
    }
}

async fn predict_usage() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Disease prediction endpoint",
        "method": "POST",
        "requiredFields": {
            "symptoms": "string[] (required)",
            "age": "number (optional)",
            "gender": "string (optional)",
            "medicalHistory": "string[] (optional)",
        },
        "example": {
            "symptoms": ["fever", "cough", "fatigue"],
            "age": 30,
            "gender": "male",
        },
    }))
}

async fn create_training_job(
    registry: web::Data<JobRegistry>,
    body: web::Json<TrainRequest>,
) -> HttpResponse {
    let config = match body.into_inner().into_config() {
        Ok(config) => config,
        Err(e) if e.is_validation() => {
            warn!("Training job rejected: {}", e);
            return HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()));
        }
        Err(e) => {
            error!("Failed to create training job: {}", e);
            return HttpResponse::InternalServerError()
                .json(ErrorResponse::with_details("Failed to create training job", e.to_string()));
        }
    };

    let job_id = registry.create_job(config);
    info!("Accepted training job {}", job_id);
    HttpResponse::Ok().json(json!({
        "success": true,
        "jobId": job_id,
        "message": "Training job created successfully",
        "status": "pending",
    }))
}

async fn list_training_jobs(
    registry: web::Data<JobRegistry>,
    params: web::Query<JobListParams>,
) -> HttpResponse {
    let status_filter = params.into_inner().status.filter(|status| !status.is_empty());
    let jobs = match status_filter.as_deref() {
        Some(name) => match JobStatus::from_str(name) {
            Ok(status) => registry.get_jobs_by_status(status),
            Err(_) => {
                warn!("Unknown job status filter: {}", name);
                return HttpResponse::BadRequest().json(ErrorResponse::new(format!(
                    "Invalid status '{}'. Must be one of: pending, training, completed, failed",
                    name
                )));
            }
        },
        None => registry.get_all_jobs(),
    };
    let jobs: Vec<JobSummary> = jobs.iter().map(JobSummary::from).collect();
    info!("Listing {} training job(s)", jobs.len());
    HttpResponse::Ok().json(json!({
        "success": true,
        "jobs": jobs,
        "counts": registry.status_counts(),
    }))
}

async fn get_training_job(
    registry: web::Data<JobRegistry>,
    path: web::Path<String>,
) -> HttpResponse {
    let job_id = path.into_inner();
    match registry.get_job(&job_id) {
        Some(job) => {
            info!("Retrieved training job {}", job_id);
            HttpResponse::Ok().json(json!({ "success": true, "job": job }))
        }
        None => {
            warn!("Training job {} not found", job_id);
            HttpResponse::NotFound().json(ErrorResponse::new("Training job not found"))
        }
    }
}

async fn get_dataset() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "success": true,
        "data": {
            "symptoms": &*SYMPTOMS,
            "diseases": &*DISEASES,
            "statistics": {
                "totalSymptoms": SYMPTOMS.len(),
                "totalDiseases": DISEASES.len(),
                "totalTrainingCases": TRAINING_DATA.len(),
                "categories": {
                    "symptoms": catalog::symptom_categories(),
                    "diseases": catalog::disease_categories(),
                },
            },
        },
    }))
}

fn invalid_action_data(action: &str, e: serde_json::Error) -> HttpResponse {
    warn!("Invalid data for action {}: {}", action, e);
    HttpResponse::BadRequest().json(ErrorResponse::with_details(
        format!("Invalid data for action '{}'", action),
        e.to_string(),
    ))
}

async fn dataset_action(body: web::Json<ActionRequest>) -> HttpResponse {
    let ActionRequest { action, data } = body.into_inner();
    info!("Dataset action requested: {}", action);

    match action.as_str() {
        "validate_symptoms" => match serde_json::from_value::<SymptomIdsData>(data) {
            Ok(data) => HttpResponse::Ok().json(json!({
                "success": true,
                "validation": catalog::validate_symptom_ids(&data.symptom_ids),
            })),
            Err(e) => invalid_action_data(&action, e),
        },
        "get_symptoms_by_category" => match serde_json::from_value::<CategoryData>(data) {
            Ok(data) => HttpResponse::Ok().json(json!({
                "success": true,
                "symptoms": catalog::symptoms_by_category(&data.category),
            })),
            Err(e) => invalid_action_data(&action, e),
        },
        "get_diseases_by_category" => match serde_json::from_value::<CategoryData>(data) {
            Ok(data) => HttpResponse::Ok().json(json!({
                "success": true,
                "diseases": catalog::diseases_by_category(&data.category),
            })),
            Err(e) => invalid_action_data(&action, e),
        },
        "get_training_data" => match serde_json::from_value::<DiseaseData>(data) {
            Ok(data) if catalog::is_known_disease(&data.disease_id) => HttpResponse::Ok().json(json!({
                "success": true,
                "trainingData": catalog::training_data_by_disease(&data.disease_id),
            })),
            Ok(data) => {
                warn!("Training data requested for unknown disease {}", data.disease_id);
                HttpResponse::NotFound().json(ErrorResponse::with_details(
                    format!("Unknown disease '{}'", data.disease_id),
                    format!("Known diseases: {}", catalog::all_disease_ids().join(", ")),
                ))
            }
            Err(e) => invalid_action_data(&action, e),
        },
        _ => {
            warn!("Unknown dataset action: {}", action);
            HttpResponse::BadRequest().json(ErrorResponse::new(
                "Invalid action. Supported actions: validate_symptoms, get_symptoms_by_category, get_diseases_by_category, get_training_data",
            ))
        }
    }
}
