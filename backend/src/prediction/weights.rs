//! Fixed lookup tables for the symptom scoring heuristic.
//!
//! Which diseases get which boosts is configuration, not derived data, so every
//! table here is spelled out explicitly and keyed by disease id or display name.

use shared::DiseaseSeverity;

pub const MATCH_WEIGHT: f64 = 0.4;
pub const COVERAGE_WEIGHT: f64 = 0.3;
pub const SPECIFICITY_WEIGHT: f64 = 0.2;
pub const DEMOGRAPHIC_WEIGHT: f64 = 0.1;

/// Specificity used for diseases with no curated hallmark set.
pub const DEFAULT_SPECIFICITY: f64 = 0.5;

/// Most diagnostic symptoms per disease id.
pub const HALLMARK_SYMPTOMS: &[(&str, &[&str])] = &[
    ("common_cold", &["runny_nose", "sore_throat"]),
    ("flu", &["fever", "chills", "muscle_aches"]),
    ("covid19", &["shortness_breath", "loss_appetite", "chest_pain"]),
    ("gastroenteritis", &["vomiting", "diarrhea", "abdominal_pain"]),
    ("migraine", &["headache", "dizziness"]),
    ("allergic_reaction", &["rash", "itching", "swelling"]),
];

/// Patients younger than this are pediatric.
pub const PEDIATRIC_AGE_LIMIT: f64 = 18.0;
/// Patients older than this are elderly.
pub const ELDERLY_AGE_LIMIT: f64 = 65.0;

pub const PEDIATRIC_PRONE: &[&str] = &["common_cold", "flu", "gastroenteritis"];
pub const ELDERLY_PRONE: &[&str] = &["covid19", "flu"];
pub const FEMALE_PRONE: &[&str] = &["migraine"];

pub const PEDIATRIC_FACTOR: f64 = 1.2;
pub const ELDERLY_FACTOR: f64 = 1.3;
pub const FEMALE_FACTOR: f64 = 1.15;
pub const DEMOGRAPHIC_FACTOR_CAP: f64 = 1.5;

// Second pass over scored results, matched on the disease display name.
pub const PEDIATRIC_NAME_KEYWORDS: &[&str] = &["Cold", "Flu"];
pub const ELDERLY_NAME_KEYWORDS: &[&str] = &["COVID", "Flu"];
pub const FEMALE_NAME_KEYWORDS: &[&str] = &["Migraine"];

pub const PEDIATRIC_BOOST: f64 = 1.1;
pub const ELDERLY_BOOST: f64 = 1.15;
pub const FEMALE_BOOST: f64 = 1.05;

/// Alternatives need a symptom overlap strictly above this.
pub const ALTERNATIVE_MIN_SIMILARITY: f64 = 0.1;
pub const ALTERNATIVE_PROBABILITY_CAP: f64 = 90.0;
pub const MAX_ALTERNATIVES: usize = 3;

pub fn hallmark_symptoms(disease_id: &str) -> Option<&'static [&'static str]> {
    HALLMARK_SYMPTOMS
        .iter()
        .find(|(id, _)| *id == disease_id)
        .map(|(_, symptoms)| *symptoms)
}

pub fn severity_multiplier(severity: DiseaseSeverity) -> f64 {
    match severity {
        DiseaseSeverity::High => 1.2,
        DiseaseSeverity::Medium => 1.0,
        DiseaseSeverity::Low => 0.9,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn test_tables_only_reference_catalog_entries() {
        for (disease_id, symptoms) in HALLMARK_SYMPTOMS {
            let disease = catalog::disease_by_id(disease_id).unwrap();
            for symptom in *symptoms {
                assert!(disease.symptoms.iter().any(|id| id == symptom));
            }
        }
        for id in PEDIATRIC_PRONE.iter().chain(ELDERLY_PRONE).chain(FEMALE_PRONE) {
            assert!(catalog::is_known_disease(id));
        }
    }

    #[test]
    fn test_severity_multiplier() {
        assert_eq!(severity_multiplier(DiseaseSeverity::High), 1.2);
        assert_eq!(severity_multiplier(DiseaseSeverity::Medium), 1.0);
        assert_eq!(severity_multiplier(DiseaseSeverity::Low), 0.9);
    }
}
