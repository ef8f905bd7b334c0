use lazy_static::lazy_static;
use shared::{
    Disease, DiseaseSeverity, Gender, Outcome, Symptom, SymptomSeverity, TrainingDataPoint,
};

fn symptom(id: &str, name: &str, category: &str, severity: SymptomSeverity) -> Symptom {
    Symptom {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        severity,
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn disease(
    id: &str,
    name: &str,
    description: &str,
    category: &str,
    severity: DiseaseSeverity,
    symptoms: &[&str],
    treatments: &[&str],
    prevention: &[&str],
) -> Disease {
    Disease {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        severity,
        symptoms: strings(symptoms),
        treatments: strings(treatments),
        prevention: strings(prevention),
    }
}

fn case(id: &str, symptoms: &[&str], disease: &str, age: u32, gender: Gender, confidence: f64) -> TrainingDataPoint {
    TrainingDataPoint {
        id: id.to_string(),
        symptoms: strings(symptoms),
        disease: disease.to_string(),
        age: Some(age),
        gender: Some(gender),
        outcome: Outcome::Confirmed,
        confidence,
    }
}

lazy_static! {
    pub static ref SYMPTOMS: Vec<Symptom> = {
        use SymptomSeverity::*;
        vec![
            // Respiratory
            symptom("cough", "Cough", "respiratory", Moderate),
            symptom("shortness_breath", "Shortness of breath", "respiratory", Severe),
            symptom("chest_pain", "Chest pain", "respiratory", Severe),
            symptom("runny_nose", "Runny nose", "respiratory", Mild),
            symptom("sore_throat", "Sore throat", "respiratory", Moderate),
            symptom("sneezing", "Sneezing", "respiratory", Mild),
            // Gastrointestinal
            symptom("nausea", "Nausea", "gastrointestinal", Moderate),
            symptom("vomiting", "Vomiting", "gastrointestinal", Moderate),
            symptom("diarrhea", "Diarrhea", "gastrointestinal", Moderate),
            symptom("abdominal_pain", "Abdominal pain", "gastrointestinal", Moderate),
            symptom("loss_appetite", "Loss of appetite", "gastrointestinal", Mild),
            // Neurological
            symptom("headache", "Headache", "neurological", Moderate),
            symptom("dizziness", "Dizziness", "neurological", Moderate),
            symptom("fatigue", "Fatigue", "neurological", Mild),
            symptom("confusion", "Confusion", "neurological", Severe),
            symptom("sensitivity_light", "Sensitivity to light", "neurological", Moderate),
            // Systemic
            symptom("fever", "Fever", "systemic", Moderate),
            symptom("chills", "Chills", "systemic", Moderate),
            symptom("sweating", "Excessive sweating", "systemic", Mild),
            symptom("weight_loss", "Unexpected weight loss", "systemic", Severe),
            symptom("muscle_aches", "Muscle aches", "systemic", Moderate),
            // Dermatological
            symptom("rash", "Skin rash", "dermatological", Moderate),
            symptom("itching", "Itching", "dermatological", Mild),
            symptom("swelling", "Swelling", "dermatological", Moderate),
        ]
    };

    pub static ref DISEASES: Vec<Disease> = vec![
        disease(
            "common_cold",
            "Common Cold",
            "A viral infection of the upper respiratory tract",
            "respiratory",
            DiseaseSeverity::Low,
            &["cough", "runny_nose", "sore_throat", "fatigue", "headache", "sneezing"],
            &["Rest", "Hydration", "Over-the-counter pain relievers", "Throat lozenges"],
            &["Hand hygiene", "Avoid close contact with sick people", "Boost immune system"],
        ),
        disease(
            "flu",
            "Influenza (Flu)",
            "A viral infection affecting the respiratory system",
            "respiratory",
            DiseaseSeverity::Medium,
            &["fever", "cough", "fatigue", "headache", "chills", "shortness_breath", "muscle_aches", "sore_throat"],
            &["Antiviral medication", "Rest", "Hydration", "Pain relievers", "Fever reducers"],
            &["Annual flu vaccination", "Hand hygiene", "Avoid crowds during flu season", "Stay home when sick"],
        ),
        disease(
            "covid19",
            "COVID-19",
            "Coronavirus disease caused by SARS-CoV-2",
            "respiratory",
            DiseaseSeverity::High,
            &["fever", "cough", "shortness_breath", "fatigue", "loss_appetite", "chest_pain", "headache", "muscle_aches"],
            &["Supportive care", "Antiviral medication (if severe)", "Hospitalization if needed", "Oxygen therapy"],
            &["Vaccination", "Mask wearing", "Social distancing", "Hand hygiene", "Good ventilation"],
        ),
        disease(
            "gastroenteritis",
            "Viral Gastroenteritis",
            "Inflammation of the stomach and intestines caused by a virus",
            "gastrointestinal",
            DiseaseSeverity::Medium,
            &["nausea", "vomiting", "diarrhea", "abdominal_pain", "fever"],
            &["Hydration", "BRAT diet", "Rest", "Anti-nausea medication"],
            &["Hand hygiene", "Food safety", "Avoid contaminated water"],
        ),
        disease(
            "migraine",
            "Migraine",
            "A neurological condition characterized by severe headaches",
            "neurological",
            DiseaseSeverity::Medium,
            &["headache", "nausea", "dizziness", "fatigue", "sensitivity_light"],
            &["Pain medication", "Rest in dark room", "Hydration", "Preventive medication"],
            &["Identify triggers", "Regular sleep schedule", "Stress management"],
        ),
        disease(
            "allergic_reaction",
            "Allergic Reaction",
            "Immune system response to allergens",
            "allergic",
            DiseaseSeverity::Medium,
            &["rash", "itching", "swelling", "shortness_breath", "nausea"],
            &["Antihistamines", "Epinephrine (if severe)", "Avoid allergen"],
            &["Identify allergens", "Carry emergency medication", "Avoid triggers"],
        ),
    ];

    pub static ref TRAINING_DATA: Vec<TrainingDataPoint> = {
        use Gender::*;
        vec![
            case("1", &["cough", "runny_nose", "sore_throat"], "common_cold", 25, Male, 0.9),
            case("2", &["cough", "runny_nose", "fatigue"], "common_cold", 30, Female, 0.85),
            case("3", &["fever", "cough", "fatigue", "headache"], "flu", 35, Male, 0.9),
            case("4", &["fever", "chills", "fatigue", "shortness_breath"], "flu", 28, Female, 0.88),
            case("5", &["fever", "cough", "shortness_breath", "fatigue"], "covid19", 45, Male, 0.95),
            case("6", &["fever", "loss_appetite", "fatigue", "chest_pain"], "covid19", 52, Female, 0.92),
            case("7", &["nausea", "vomiting", "diarrhea", "abdominal_pain"], "gastroenteritis", 22, Male, 0.9),
            case("8", &["nausea", "diarrhea", "fever"], "gastroenteritis", 38, Female, 0.87),
            case("9", &["headache", "nausea", "dizziness"], "migraine", 29, Female, 0.88),
            case("10", &["headache", "fatigue", "nausea"], "migraine", 34, Male, 0.85),
            case("11", &["rash", "itching", "swelling"], "allergic_reaction", 26, Female, 0.9),
            case("12", &["rash", "shortness_breath", "nausea"], "allergic_reaction", 31, Male, 0.93),
        ]
    };
}
