use actix_web::{web, HttpResponse};
use log::{info, warn};
use serde::Deserialize;
use serde_json::json;
use shared::HealthcareFacility;

use super::directory::{parse_type_filter, FacilityDirectory, FacilityError, FacilityQuery};
use crate::routes::{ActionRequest, ErrorResponse};

/// Raw query string of the listing; numbers are parsed leniently afterwards.
#[derive(Debug, Default, Deserialize)]
pub struct FacilityParams {
    lat: Option<String>,
    lng: Option<String>,
    radius: Option<String>,
    #[serde(rename = "type")]
    facility_type: Option<String>,
    query: Option<String>,
}

impl From<FacilityParams> for FacilityQuery {
    fn from(params: FacilityParams) -> Self {
        FacilityQuery::from_params(
            params.lat.as_deref(),
            params.lng.as_deref(),
            params.radius.as_deref(),
            params.facility_type.as_deref(),
            params.query.as_deref(),
        )
    }
}

#[derive(Deserialize)]
struct SearchData {
    query: String,
}

#[derive(Deserialize)]
struct NearbyData {
    lat: f64,
    lng: f64,
    radius: Option<f64>,
    #[serde(rename = "type")]
    facility_type: Option<String>,
}

#[derive(Deserialize)]
struct SpecialtyData {
    specialty: String,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/healthcare-facilities")
            .route(web::get().to(list_facilities))
            .route(web::post().to(facility_action)),
    )
    .service(web::resource("/healthcare-facilities/{id}").route(web::get().to(get_facility)));
}

fn unknown_type(e: FacilityError) -> HttpResponse {
    warn!("Facility request rejected: {}", e);
    HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()))
}

pub async fn list_facilities(
    directory: web::Data<FacilityDirectory>,
    params: web::Query<FacilityParams>,
) -> HttpResponse {
    let query = FacilityQuery::from(params.into_inner());
    match directory.query(&query) {
        Ok(result) => {
            info!(
                "Facility listing returned {} of {} match(es)",
                result.facilities.len(),
                result.total
            );
            let location = match query.location() {
                Some((lat, lng)) => json!({ "lat": lat, "lng": lng }),
                None => serde_json::Value::Null,
            };
            HttpResponse::Ok().json(json!({
                "success": true,
                "facilities": result.facilities,
                "total": result.total,
                "location": location,
            }))
        }
        Err(e) => unknown_type(e),
    }
}

fn invalid_action_data(action: &str, e: serde_json::Error) -> HttpResponse {
    warn!("Invalid data for facility action {}: {}", action, e);
    HttpResponse::BadRequest().json(ErrorResponse::with_details(
        format!("Invalid data for action '{}'", action),
        e.to_string(),
    ))
}

pub async fn facility_action(
    directory: web::Data<FacilityDirectory>,
    body: web::Json<ActionRequest>,
) -> HttpResponse {
    let ActionRequest { action, data } = body.into_inner();
    info!("Facility action requested: {}", action);

    let facilities: Vec<HealthcareFacility> = match action.as_str() {
        "search" => match serde_json::from_value::<SearchData>(data) {
            Ok(data) => directory.search(&data.query),
            Err(e) => return invalid_action_data(&action, e),
        },
        "nearby" => {
            let data = match serde_json::from_value::<NearbyData>(data) {
                Ok(data) => data,
                Err(e) => return invalid_action_data(&action, e),
            };
            let type_filter = match parse_type_filter(data.facility_type.as_deref()) {
                Ok(type_filter) => type_filter,
                Err(e) => return unknown_type(e),
            };
            let mut found = directory.near(data.lat, data.lng, data.radius);
            if let Some(facility_type) = type_filter {
                found.retain(|facility| facility.facility_type == facility_type);
            }
            found
        }
        "by_specialty" => match serde_json::from_value::<SpecialtyData>(data) {
            Ok(data) => directory.by_specialty(&data.specialty),
            Err(e) => return invalid_action_data(&action, e),
        },
        "open_now" => directory.open_now(),
        _ => {
            warn!("Unknown facility action: {}", action);
            return HttpResponse::BadRequest().json(ErrorResponse::new(
                "Invalid action. Supported actions: search, nearby, by_specialty, open_now",
            ));
        }
    };

    HttpResponse::Ok().json(json!({
        "success": true,
        "total": facilities.len(),
        "facilities": facilities,
    }))
}

pub async fn get_facility(
    directory: web::Data<FacilityDirectory>,
    path: web::Path<String>,
) -> HttpResponse {
    let id = path.into_inner();
    match directory.by_id(&id) {
        Some(facility) => HttpResponse::Ok().json(json!({
            "success": true,
            "facility": facility,
        })),
        None => {
            warn!("Facility {} not found", id);
            HttpResponse::NotFound().json(ErrorResponse::new("Facility not found"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{configure_routes, tests::fast_registry};
    use crate::prediction::ScoringEngine;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::Value;

    macro_rules! init_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(ScoringEngine::default()))
                    .app_data(web::Data::new(fast_registry()))
                    .app_data(web::Data::new(FacilityDirectory::default()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    fn ids(body: &Value) -> Vec<String> {
        body["facilities"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["id"].as_str().unwrap().to_string())
            .collect()
    }

    #[actix_web::test]
    async fn test_listing_without_filters() {
        let app = init_app!();
        let req = test::TestRequest::get().uri("/api/healthcare-facilities").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["total"], 11);
        assert_eq!(body["facilities"].as_array().unwrap().len(), 11);
        assert!(body["location"].is_null());
        assert_eq!(body["facilities"][0]["type"], "clinic");
        assert_eq!(body["facilities"][0]["isOpen"], true);
    }

    #[actix_web::test]
    async fn test_listing_with_location_type_and_text() {
        let app = init_app!();
        let req = test::TestRequest::get()
            .uri("/api/healthcare-facilities?lat=40.7505&lng=-73.9934&type=hospital&query=surgery")
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ids(&body), vec!["10", "11"]);
        assert_eq!(body["location"]["lat"], 40.7505);
    }

    #[actix_web::test]
    async fn test_listing_rejects_unknown_type() {
        let app = init_app!();
        let req = test::TestRequest::get()
            .uri("/api/healthcare-facilities?type=spa")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Unknown facility type: spa");
    }

    #[actix_web::test]
    async fn test_listing_ignores_unparsable_location() {
        let app = init_app!();
        let req = test::TestRequest::get()
            .uri("/api/healthcare-facilities?lat=abc&lng=-74.0060")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["total"], 11);
        assert!(body["location"].is_null());
    }

    #[actix_web::test]
    async fn test_listing_empty_radius_uses_default() {
        let app = init_app!();
        let req = test::TestRequest::get()
            .uri("/api/healthcare-facilities?lat=40.7128&lng=-74.0060&radius=")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["total"], 11);
        assert_eq!(ids(&body)[0], "1");
        assert_eq!(body["location"]["lng"], -74.006);
    }

    #[actix_web::test]
    async fn test_listing_empty_type_is_no_filter() {
        let app = init_app!();
        let req = test::TestRequest::get()
            .uri("/api/healthcare-facilities?type=&query=pharmacy")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(ids(&body), vec!["4", "5", "6"]);
    }

    #[actix_web::test]
    async fn test_actions() {
        let app = init_app!();
        let req = test::TestRequest::post()
            .uri("/api/healthcare-facilities")
            .set_json(json!({ "action": "search", "data": { "query": "pharmacy" } }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ids(&body), vec!["4", "5", "6"]);

        let req = test::TestRequest::post()
            .uri("/api/healthcare-facilities")
            .set_json(json!({ "action": "by_specialty", "data": { "specialty": "pediatrics" } }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ids(&body), vec!["2", "11"]);

        let req = test::TestRequest::post()
            .uri("/api/healthcare-facilities")
            .set_json(json!({
                "action": "nearby",
                "data": { "lat": 40.7128, "lng": -74.0060, "radius": 2.0, "type": "clinic" },
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(ids(&body)[0], "1");
        assert!(body["facilities"]
            .as_array()
            .unwrap()
            .iter()
            .all(|f| f["type"] == "clinic"));
    }

    #[actix_web::test]
    async fn test_invalid_actions() {
        let app = init_app!();
        let req = test::TestRequest::post()
            .uri("/api/healthcare-facilities")
            .set_json(json!({ "action": "book", "data": {} }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/healthcare-facilities")
            .set_json(json!({ "action": "nearby", "data": { "lat": 40.7 } }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = test::TestRequest::post()
            .uri("/api/healthcare-facilities")
            .set_json(json!({
                "action": "nearby",
                "data": { "lat": 40.7128, "lng": -74.0060, "type": "spa" },
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Unknown facility type: spa");
    }

    #[actix_web::test]
    async fn test_open_now_action() {
        let app = init_app!();
        let req = test::TestRequest::post()
            .uri("/api/healthcare-facilities")
            .set_json(json!({ "action": "open_now" }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total"], 9);
        assert!(!ids(&body).contains(&"2".to_string()));
    }

    #[actix_web::test]
    async fn test_facility_by_id() {
        let app = init_app!();
        let req = test::TestRequest::get().uri("/api/healthcare-facilities/10").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["facility"]["name"], "Metropolitan Hospital");

        let req = test::TestRequest::get().uri("/api/healthcare-facilities/404").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
