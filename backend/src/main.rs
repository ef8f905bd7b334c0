mod catalog;
mod config;
mod facilities;
mod prediction;
mod routes;
mod training;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use config::AppConfig;
use facilities::FacilityDirectory;
use prediction::ScoringEngine;
use routes::configure_routes;
use std::env;
use training::{JobRegistry, SimulatedTrainer};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    } else {
        log::error!("Failed to get the current working directory.");
    }

    let app_config = match AppConfig::load() {
        Ok(app_config) => app_config,
        Err(e) => {
            log::error!("Failed to load configuration: {}", e);
            return Err(std::io::Error::new(
                std::io::ErrorKind::Other,
                format!("Configuration loading failed: {}", e),
            ));
        }
    };

    let violations = catalog::catalog_integrity_violations();
    if violations.is_empty() {
        log::info!(
            "Catalog loaded: {} symptoms, {} diseases, {} training cases",
            catalog::SYMPTOMS.len(),
            catalog::DISEASES.len(),
            catalog::TRAINING_DATA.len()
        );
    } else {
        for (owner, symptom) in &violations {
            log::warn!("Catalog entry {} references unknown symptom {}", owner, symptom);
        }
    }

    let engine = ScoringEngine::new(app_config.prediction.clone());
    let registry = JobRegistry::new(
        SimulatedTrainer::from_config(&app_config.training),
        app_config.training.model_dir.clone(),
    );
    let directory = FacilityDirectory::new(app_config.facilities.clone());

    let bind_address = format!("{}:{}", app_config.server.host, app_config.server.port);
    let cors_max_age = app_config.server.cors_max_age;

    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::AUTHORIZATION,
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(cors_max_age),
            )
            .app_data(web::Data::new(engine.clone()))
            .app_data(web::Data::new(registry.clone()))
            .app_data(web::Data::new(directory.clone()))
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
