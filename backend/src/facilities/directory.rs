use shared::{FacilityType, HealthcareFacility};
use std::str::FromStr;
use thiserror::Error;

use super::data::FACILITIES;
use crate::config::FacilitiesConfig;

const EARTH_RADIUS_MILES: f64 = 3959.0;

/// Great-circle distance in miles (haversine).
pub fn distance_miles(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_MILES * c
}

fn contains_ignore_case(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn matches_query(facility: &HealthcareFacility, query_lower: &str) -> bool {
    contains_ignore_case(&facility.name, query_lower)
        || contains_ignore_case(&facility.address, query_lower)
        || facility
            .specialties
            .iter()
            .any(|specialty| contains_ignore_case(specialty, query_lower))
        || facility
            .services
            .iter()
            .any(|service| contains_ignore_case(service, query_lower))
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FacilityError {
    #[error("Unknown facility type: {0}")]
    UnknownType(String),
}

/// Parses a type filter. Missing, empty and `all` mean no filter.
pub fn parse_type_filter(raw: Option<&str>) -> Result<Option<FacilityType>, FacilityError> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") => Ok(None),
        Some(name) => FacilityType::from_str(name)
            .map(Some)
            .map_err(|_| FacilityError::UnknownType(name.to_string())),
    }
}

/// Lenient numeric parameter: empty, unparsable and non-finite values are absent.
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// Filters for the facility listing.
#[derive(Debug, Clone, Default)]
pub struct FacilityQuery {
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub radius: Option<f64>,
    pub facility_type: Option<String>,
    pub query: Option<String>,
}

impl FacilityQuery {
    /// Builds a query from raw query-string values.
    pub fn from_params(
        lat: Option<&str>,
        lng: Option<&str>,
        radius: Option<&str>,
        facility_type: Option<&str>,
        query: Option<&str>,
    ) -> Self {
        Self {
            lat: parse_number(lat),
            lng: parse_number(lng),
            radius: parse_number(radius),
            facility_type: facility_type.map(str::to_string),
            query: query.map(str::to_string),
        }
    }

    pub fn location(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat.is_finite() && lng.is_finite() => Some((lat, lng)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FacilitySearch {
    pub facilities: Vec<HealthcareFacility>,
    /// Match count before truncation to `max_results`.
    pub total: usize,
}

#[derive(Clone)]
pub struct FacilityDirectory {
    config: FacilitiesConfig,
}

impl FacilityDirectory {
    pub fn new(config: FacilitiesConfig) -> Self {
        Self { config }
    }

    pub fn all(&self) -> Vec<HealthcareFacility> {
        FACILITIES.clone()
    }

    pub fn by_id(&self, id: &str) -> Option<HealthcareFacility> {
        FACILITIES.iter().find(|facility| facility.id == id).cloned()
    }

    pub fn by_type(&self, facility_type: FacilityType) -> Vec<HealthcareFacility> {
        FACILITIES
            .iter()
            .filter(|facility| facility.facility_type == facility_type)
            .cloned()
            .collect()
    }

    pub fn open_now(&self) -> Vec<HealthcareFacility> {
        FACILITIES
            .iter()
            .filter(|facility| facility.is_open)
            .cloned()
            .collect()
    }

    /// Case-insensitive substring match over name, address, specialties and services.
    pub fn search(&self, query: &str) -> Vec<HealthcareFacility> {
        let query_lower = query.to_lowercase();
        FACILITIES
            .iter()
            .filter(|facility| matches_query(facility, &query_lower))
            .cloned()
            .collect()
    }

    pub fn by_specialty(&self, specialty: &str) -> Vec<HealthcareFacility> {
        let specialty_lower = specialty.to_lowercase();
        FACILITIES
            .iter()
            .filter(|facility| {
                facility
                    .specialties
                    .iter()
                    .any(|s| contains_ignore_case(s, &specialty_lower))
            })
            .cloned()
            .collect()
    }

    /// Facilities within `radius_miles`, nearest first.
    pub fn near(&self, lat: f64, lng: f64, radius_miles: Option<f64>) -> Vec<HealthcareFacility> {
        let radius = radius_miles.unwrap_or(self.config.default_radius_miles);
        let mut nearby: Vec<(f64, &HealthcareFacility)> = FACILITIES
            .iter()
            .map(|facility| {
                let distance =
                    distance_miles(lat, lng, facility.coordinates.lat, facility.coordinates.lng);
                (distance, facility)
            })
            .filter(|(distance, _)| *distance <= radius)
            .collect();
        nearby.sort_by(|a, b| a.0.total_cmp(&b.0));
        nearby.into_iter().map(|(_, facility)| facility.clone()).collect()
    }

    /// Type filter, then location filter, then text search; sorted by distance
    /// when a location is given and truncated to `max_results`.
    pub fn query(&self, query: &FacilityQuery) -> Result<FacilitySearch, FacilityError> {
        let mut facilities = match parse_type_filter(query.facility_type.as_deref())? {
            Some(facility_type) => self.by_type(facility_type),
            None => self.all(),
        };

        if let Some((lat, lng)) = query.location() {
            let radius = query.radius.unwrap_or(self.config.default_radius_miles);
            let mut nearby: Vec<(f64, HealthcareFacility)> = facilities
                .into_iter()
                .map(|facility| {
                    let distance =
                        distance_miles(lat, lng, facility.coordinates.lat, facility.coordinates.lng);
                    (distance, facility)
                })
                .filter(|(distance, _)| *distance <= radius)
                .collect();
            nearby.sort_by(|a, b| a.0.total_cmp(&b.0));
            facilities = nearby.into_iter().map(|(_, facility)| facility).collect();
        }

        if let Some(text) = query.query.as_deref().filter(|text| !text.is_empty()) {
            let query_lower = text.to_lowercase();
            facilities.retain(|facility| matches_query(facility, &query_lower));
        }

        let total = facilities.len();
        facilities.truncate(self.config.max_results);
        Ok(FacilitySearch { facilities, total })
    }
}

impl Default for FacilityDirectory {
    fn default() -> Self {
        Self::new(FacilitiesConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(facilities: &[HealthcareFacility]) -> Vec<&str> {
        facilities.iter().map(|f| f.id.as_str()).collect()
    }

    #[test]
    fn test_distance_is_zero_for_same_point_and_symmetric() {
        assert_eq!(distance_miles(40.7, -74.0, 40.7, -74.0), 0.0);
        let there = distance_miles(40.7128, -74.0060, 40.7831, -73.9712);
        let back = distance_miles(40.7831, -73.9712, 40.7128, -74.0060);
        assert!((there - back).abs() < 1e-9);
        assert!(there > 5.0 && there < 6.0);
    }

    #[test]
    fn test_search_is_case_insensitive_across_fields() {
        let directory = FacilityDirectory::default();
        assert_eq!(ids(&directory.search("PHARMACY")), vec!["4", "5", "6"]);
        assert_eq!(ids(&directory.search("telehealth")), vec!["2"]);
        assert!(directory.search("veterinary").is_empty());
    }

    #[test]
    fn test_by_specialty_and_type() {
        let directory = FacilityDirectory::default();
        assert_eq!(ids(&directory.by_specialty("cardio")), vec!["1", "10"]);
        assert_eq!(directory.by_type(FacilityType::Hospital).len(), 2);
        assert_eq!(directory.open_now().len(), 9);
        assert_eq!(directory.by_id("7").unwrap().name, "MedSupply Plus");
        assert!(directory.by_id("99").is_none());
    }

    #[test]
    fn test_near_sorts_by_distance_and_respects_radius() {
        let directory = FacilityDirectory::default();
        let nearby = directory.near(40.7128, -74.0060, Some(2.0));
        assert_eq!(nearby[0].id, "1");
        let distances: Vec<f64> = nearby
            .iter()
            .map(|f| distance_miles(40.7128, -74.0060, f.coordinates.lat, f.coordinates.lng))
            .collect();
        assert!(distances.windows(2).all(|pair| pair[0] <= pair[1]));
        assert!(distances.iter().all(|d| *d <= 2.0));
        assert!(ids(&nearby).iter().all(|id| *id != "5" && *id != "9"));
    }

    #[test]
    fn test_query_combines_filters() {
        let directory = FacilityDirectory::default();
        let result = directory
            .query(&FacilityQuery {
                lat: Some(40.7505),
                lng: Some(-73.9934),
                facility_type: Some("hospital".into()),
                query: Some("surgery".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(ids(&result.facilities), vec!["10", "11"]);
        assert_eq!(result.total, 2);
    }

    #[test]
    fn test_query_all_type_and_truncation() {
        let directory = FacilityDirectory::new(FacilitiesConfig {
            default_radius_miles: 10.0,
            max_results: 4,
        });
        let result = directory
            .query(&FacilityQuery {
                facility_type: Some("all".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(result.facilities.len(), 4);
        assert_eq!(result.total, 11);
    }

    #[test]
    fn test_query_rejects_unknown_type() {
        let directory = FacilityDirectory::default();
        let result = directory.query(&FacilityQuery {
            facility_type: Some("spa".into()),
            ..Default::default()
        });
        assert_eq!(result.unwrap_err(), FacilityError::UnknownType("spa".into()));
    }

    #[test]
    fn test_type_filter_parsing() {
        assert_eq!(parse_type_filter(None), Ok(None));
        assert_eq!(parse_type_filter(Some("")), Ok(None));
        assert_eq!(parse_type_filter(Some("all")), Ok(None));
        assert_eq!(
            parse_type_filter(Some("medical_shop")),
            Ok(Some(FacilityType::MedicalShop))
        );
        assert!(parse_type_filter(Some("spa")).is_err());
    }

    #[test]
    fn test_raw_params_are_parsed_leniently() {
        let query = FacilityQuery::from_params(Some("abc"), Some("-73.99"), Some(""), Some(""), None);
        assert_eq!(query.lat, None);
        assert_eq!(query.lng, Some(-73.99));
        assert_eq!(query.radius, None);
        assert!(query.location().is_none());
        assert_eq!(parse_number(Some(" 2.5 ")), Some(2.5));
        assert_eq!(parse_number(Some("NaN")), None);

        let directory = FacilityDirectory::default();
        let result = directory.query(&query).unwrap();
        assert_eq!(result.total, 11);
    }

    #[test]
    fn test_query_empty_radius_falls_back_to_default() {
        let directory = FacilityDirectory::default();
        let query =
            FacilityQuery::from_params(Some("40.7128"), Some("-74.0060"), Some(""), None, None);
        let result = directory.query(&query).unwrap();
        assert_eq!(result.total, 11);
        assert_eq!(result.facilities[0].id, "1");
    }
}
