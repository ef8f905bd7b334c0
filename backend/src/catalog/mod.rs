//! Read-only lookups over the static symptom, disease and training tables.

pub mod tables;

use serde::Serialize;
use shared::{Disease, Symptom, TrainingDataPoint};

pub use tables::{DISEASES, SYMPTOMS, TRAINING_DATA};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymptomValidation {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

pub fn symptom_by_id(id: &str) -> Option<&'static Symptom> {
    SYMPTOMS.iter().find(|symptom| symptom.id == id)
}

pub fn disease_by_id(id: &str) -> Option<&'static Disease> {
    DISEASES.iter().find(|disease| disease.id == id)
}

pub fn symptoms_by_category(category: &str) -> Vec<&'static Symptom> {
    SYMPTOMS
        .iter()
        .filter(|symptom| symptom.category == category)
        .collect()
}

pub fn diseases_by_category(category: &str) -> Vec<&'static Disease> {
    DISEASES
        .iter()
        .filter(|disease| disease.category == category)
        .collect()
}

pub fn training_data_by_disease(disease_id: &str) -> Vec<&'static TrainingDataPoint> {
    TRAINING_DATA
        .iter()
        .filter(|point| point.disease == disease_id)
        .collect()
}

pub fn all_symptom_ids() -> Vec<&'static str> {
    SYMPTOMS.iter().map(|symptom| symptom.id.as_str()).collect()
}

pub fn all_disease_ids() -> Vec<&'static str> {
    DISEASES.iter().map(|disease| disease.id.as_str()).collect()
}

pub fn is_known_symptom(id: &str) -> bool {
    symptom_by_id(id).is_some()
}

pub fn is_known_disease(id: &str) -> bool {
    disease_by_id(id).is_some()
}

/// Splits ids into known and unknown, keeping request order in both halves.
pub fn validate_symptom_ids<S: AsRef<str>>(ids: &[S]) -> SymptomValidation {
    let (valid, invalid): (Vec<String>, Vec<String>) = ids
        .iter()
        .map(|id| id.as_ref().to_string())
        .partition(|id| is_known_symptom(id));
    SymptomValidation { valid, invalid }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        if !seen.iter().any(|existing| existing == value) {
            seen.push(value.to_string());
        }
    }
    seen
}

pub fn symptom_categories() -> Vec<String> {
    distinct(SYMPTOMS.iter().map(|symptom| symptom.category.as_str()))
}

pub fn disease_categories() -> Vec<String> {
    distinct(DISEASES.iter().map(|disease| disease.category.as_str()))
}

/// `(disease id, symptom id)` pairs whose symptom is missing from the symptom table.
pub fn catalog_integrity_violations() -> Vec<(String, String)> {
    DISEASES
        .iter()
        .flat_map(|disease| {
            disease
                .symptoms
                .iter()
                .filter(|id| !is_known_symptom(id))
                .map(move |id| (disease.id.clone(), id.clone()))
        })
        .collect()
}
