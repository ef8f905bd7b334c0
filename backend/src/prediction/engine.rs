use log::debug;
use shared::{AlternativeDiagnosis, Disease, Gender, PredictionRequest, PredictionResult};
use thiserror::Error;

use crate::catalog::{self, DISEASES};
use crate::config::PredictionConfig;

use super::weights::*;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PredictionError {
    #[error("At least one symptom is required for prediction")]
    EmptySymptoms,
    #[error("Invalid symptom IDs: {}", .0.join(", "))]
    InvalidSymptoms(Vec<String>),
    #[error("Age must be a non-negative number, got {0}")]
    InvalidAge(f64),
}

impl PredictionError {
    /// Every prediction error is caused by the request itself.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            PredictionError::EmptySymptoms
                | PredictionError::InvalidSymptoms(_)
                | PredictionError::InvalidAge(_)
        )
    }
}

#[derive(Clone)]
pub struct ScoringEngine {
    config: PredictionConfig,
}

impl ScoringEngine {
    pub fn new(config: PredictionConfig) -> Self {
        Self { config }
    }

    /// Ranks catalog diseases against the reported symptoms.
    ///
    /// Returns at most `max_results` predictions, sorted by descending
    /// probability, all at or above `display_threshold`. The list may be empty.
    pub fn predict(
        &self,
        request: &PredictionRequest,
    ) -> Result<Vec<PredictionResult>, PredictionError> {
        let symptoms = validate(request)?;

        let mut results: Vec<PredictionResult> = DISEASES
            .iter()
            .filter_map(|disease| self.score(&symptoms, request, disease))
            .collect();

        for result in results.iter_mut() {
            result.probability = self.adjust_for_demographics(request, result);
        }

        results.sort_by(|a, b| b.probability.cmp(&a.probability));
        results.truncate(self.config.max_results);
        results.retain(|result| f64::from(result.probability) >= self.config.display_threshold);

        debug!(
            "Prediction for {:?} produced {} result(s)",
            symptoms,
            results.len()
        );
        Ok(results)
    }

    fn score(
        &self,
        symptoms: &[&str],
        request: &PredictionRequest,
        disease: &Disease,
    ) -> Option<PredictionResult> {
        let common: Vec<&str> = symptoms
            .iter()
            .copied()
            .filter(|symptom| disease.symptoms.iter().any(|id| id == symptom))
            .collect();
        if common.is_empty() {
            return None;
        }

        let match_ratio = common.len() as f64 / disease.symptoms.len() as f64;
        let coverage_ratio = common.len() as f64 / symptoms.len() as f64;
        let specificity = specificity(&common, &disease.id);
        let demographic = demographic_factor(request, &disease.id);

        let base_score = MATCH_WEIGHT * match_ratio
            + COVERAGE_WEIGHT * coverage_ratio
            + SPECIFICITY_WEIGHT * specificity
            + DEMOGRAPHIC_WEIGHT * demographic;
        let adjusted = base_score * severity_multiplier(disease.severity);
        let probability = (adjusted * 100.0).min(self.config.probability_cap);

        debug!(
            "{}: match={:.3} coverage={:.3} specificity={:.3} demographic={:.3} probability={:.2}",
            disease.id, match_ratio, coverage_ratio, specificity, demographic, probability
        );

        if probability < self.config.inclusion_threshold {
            return None;
        }

        Some(PredictionResult {
            disease: disease.name.clone(),
            probability: probability.round() as u32,
            confidence: adjusted.min(self.config.probability_cap / 100.0),
            description: disease.description.clone(),
            severity: disease.severity,
            recommendations: disease.treatments.clone(),
            alternative_diagnoses: alternative_diagnoses(symptoms, &disease.id),
        })
    }

    /// Post-hoc boost keyed on the display name. This overlaps with the
    /// demographic factor already folded into the base score; both apply.
    fn adjust_for_demographics(&self, request: &PredictionRequest, result: &PredictionResult) -> u32 {
        let cap = self.config.probability_cap;
        let name_has = |keywords: &[&str]| keywords.iter().any(|k| result.disease.contains(k));
        let mut probability = f64::from(result.probability);

        if let Some(age) = request.age {
            if age < PEDIATRIC_AGE_LIMIT && name_has(PEDIATRIC_NAME_KEYWORDS) {
                probability = (probability * PEDIATRIC_BOOST).min(cap);
            } else if age > ELDERLY_AGE_LIMIT && name_has(ELDERLY_NAME_KEYWORDS) {
                probability = (probability * ELDERLY_BOOST).min(cap);
            }
        }
        if request.gender == Some(Gender::Female) && name_has(FEMALE_NAME_KEYWORDS) {
            probability = (probability * FEMALE_BOOST).min(cap);
        }

        probability.round() as u32
    }
}

impl Default for ScoringEngine {
    fn default() -> Self {
        Self::new(PredictionConfig::default())
    }
}

/// Rejects empty or unknown symptom lists and collapses duplicates.
fn validate(request: &PredictionRequest) -> Result<Vec<&str>, PredictionError> {
    if request.symptoms.is_empty() {
        return Err(PredictionError::EmptySymptoms);
    }
    if let Some(age) = request.age {
        if !age.is_finite() || age < 0.0 {
            return Err(PredictionError::InvalidAge(age));
        }
    }

    let mut symptoms: Vec<&str> = Vec::with_capacity(request.symptoms.len());
    for id in &request.symptoms {
        if !symptoms.contains(&id.as_str()) {
            symptoms.push(id.as_str());
        }
    }

    let validation = catalog::validate_symptom_ids(&symptoms);
    if !validation.invalid.is_empty() {
        return Err(PredictionError::InvalidSymptoms(validation.invalid));
    }
    Ok(symptoms)
}

fn specificity(common: &[&str], disease_id: &str) -> f64 {
    match hallmark_symptoms(disease_id) {
        Some(hallmarks) if !hallmarks.is_empty() => {
            let present = hallmarks.iter().filter(|h| common.contains(*h)).count();
            present as f64 / hallmarks.len() as f64
        }
        _ => DEFAULT_SPECIFICITY,
    }
}

fn demographic_factor(request: &PredictionRequest, disease_id: &str) -> f64 {
    let mut factor = 1.0;
    if let Some(age) = request.age {
        if age < PEDIATRIC_AGE_LIMIT && PEDIATRIC_PRONE.contains(&disease_id) {
            factor *= PEDIATRIC_FACTOR;
        } else if age > ELDERLY_AGE_LIMIT && ELDERLY_PRONE.contains(&disease_id) {
            factor *= ELDERLY_FACTOR;
        }
    }
    if request.gender == Some(Gender::Female) && FEMALE_PRONE.contains(&disease_id) {
        factor *= FEMALE_FACTOR;
    }
    f64::min(factor, DEMOGRAPHIC_FACTOR_CAP)
}

fn alternative_diagnoses(symptoms: &[&str], exclude_id: &str) -> Vec<AlternativeDiagnosis> {
    DISEASES
        .iter()
        .filter(|disease| disease.id != exclude_id)
        .filter_map(|disease| {
            let common = symptoms
                .iter()
                .filter(|symptom| disease.symptoms.iter().any(|id| id == *symptom))
                .count();
            let similarity =
                common as f64 / symptoms.len().max(disease.symptoms.len()) as f64;
            (similarity > ALTERNATIVE_MIN_SIMILARITY).then(|| AlternativeDiagnosis {
                disease: disease.name.clone(),
                probability: (similarity * 100.0).min(ALTERNATIVE_PROBABILITY_CAP).round() as u32,
            })
        })
        .take(MAX_ALTERNATIVES)
        .collect()
}
