use lazy_static::lazy_static;
use shared::{Coordinates, FacilityType, HealthcareFacility};

struct FacilitySeed {
    id: &'static str,
    name: &'static str,
    facility_type: FacilityType,
    address: &'static str,
    phone: &'static str,
    rating: f64,
    distance: &'static str,
    is_open: bool,
    open_hours: &'static str,
    specialties: &'static [&'static str],
    services: &'static [&'static str],
    lat: f64,
    lng: f64,
    website: &'static str,
    email: &'static str,
    description: &'static str,
}

impl From<&FacilitySeed> for HealthcareFacility {
    fn from(seed: &FacilitySeed) -> Self {
        let owned = |items: &[&str]| items.iter().map(|item| item.to_string()).collect();
        Self {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            facility_type: seed.facility_type,
            address: seed.address.to_string(),
            phone: seed.phone.to_string(),
            rating: seed.rating,
            distance: seed.distance.to_string(),
            is_open: seed.is_open,
            open_hours: seed.open_hours.to_string(),
            specialties: owned(seed.specialties),
            services: owned(seed.services),
            coordinates: Coordinates {
                lat: seed.lat,
                lng: seed.lng,
            },
            website: Some(seed.website.to_string()),
            email: Some(seed.email.to_string()),
            description: Some(seed.description.to_string()),
        }
    }
}

const SEEDS: &[FacilitySeed] = &[
    FacilitySeed {
        id: "1",
        name: "City Medical Center",
        facility_type: FacilityType::Clinic,
        address: "123 Main St, Downtown",
        phone: "(555) 123-4567",
        rating: 4.5,
        distance: "0.5 miles",
        is_open: true,
        open_hours: "8:00 AM - 6:00 PM",
        specialties: &["General Medicine", "Cardiology", "Dermatology"],
        services: &["Walk-in", "Appointments", "Emergency Care"],
        lat: 40.7128,
        lng: -74.0060,
        website: "https://citymedical.com",
        email: "info@citymedical.com",
        description: "Full-service medical center with comprehensive healthcare services",
    },
    FacilitySeed {
        id: "2",
        name: "Riverside Family Clinic",
        facility_type: FacilityType::Clinic,
        address: "789 River Rd, Riverside",
        phone: "(555) 345-6789",
        rating: 4.7,
        distance: "1.2 miles",
        is_open: false,
        open_hours: "Closed - Opens 8:00 AM",
        specialties: &["Family Medicine", "Pediatrics", "Women's Health"],
        services: &["Appointments Only", "Telehealth"],
        lat: 40.7589,
        lng: -73.9851,
        website: "https://riversideclinic.com",
        email: "contact@riversideclinic.com",
        description: "Family-focused healthcare with personalized care",
    },
    FacilitySeed {
        id: "3",
        name: "Downtown Urgent Care",
        facility_type: FacilityType::Clinic,
        address: "456 Broadway, Downtown",
        phone: "(555) 789-0123",
        rating: 4.2,
        distance: "0.8 miles",
        is_open: true,
        open_hours: "7:00 AM - 10:00 PM",
        specialties: &["Urgent Care", "Minor Injuries", "Illness Treatment"],
        services: &["Walk-in", "Same-day Appointments", "X-ray"],
        lat: 40.7505,
        lng: -73.9934,
        website: "https://downtownurgent.com",
        email: "info@downtownurgent.com",
        description: "Fast, convenient urgent care services",
    },
    FacilitySeed {
        id: "4",
        name: "HealthPlus Pharmacy",
        facility_type: FacilityType::Pharmacy,
        address: "456 Oak Ave, Midtown",
        phone: "(555) 234-5678",
        rating: 4.2,
        distance: "0.8 miles",
        is_open: true,
        open_hours: "9:00 AM - 9:00 PM",
        specialties: &[],
        services: &["Prescription Filling", "Vaccinations", "Health Screenings"],
        lat: 40.7614,
        lng: -73.9776,
        website: "https://healthpluspharmacy.com",
        email: "pharmacy@healthplus.com",
        description: "Full-service pharmacy with health consultations",
    },
    FacilitySeed {
        id: "5",
        name: "QuickCare Pharmacy",
        facility_type: FacilityType::Pharmacy,
        address: "321 Pine St, Uptown",
        phone: "(555) 456-7890",
        rating: 4.0,
        distance: "1.5 miles",
        is_open: true,
        open_hours: "24 Hours",
        specialties: &[],
        services: &["24/7 Service", "Drive-through", "Delivery"],
        lat: 40.7831,
        lng: -73.9712,
        website: "https://quickcarepharmacy.com",
        email: "info@quickcarepharmacy.com",
        description: "24/7 pharmacy services with drive-through convenience",
    },
    FacilitySeed {
        id: "6",
        name: "MediMart Pharmacy",
        facility_type: FacilityType::Pharmacy,
        address: "789 Health Blvd, Medical District",
        phone: "(555) 567-8901",
        rating: 4.4,
        distance: "2.0 miles",
        is_open: true,
        open_hours: "8:00 AM - 8:00 PM",
        specialties: &[],
        services: &["Prescription Filling", "Medication Counseling", "Health Products"],
        lat: 40.7505,
        lng: -73.9934,
        website: "https://medimart.com",
        email: "pharmacy@medimart.com",
        description: "Comprehensive pharmacy with health and wellness products",
    },
    FacilitySeed {
        id: "7",
        name: "MedSupply Plus",
        facility_type: FacilityType::MedicalShop,
        address: "234 Medical Way, Healthcare Plaza",
        phone: "(555) 678-9012",
        rating: 4.3,
        distance: "1.8 miles",
        is_open: true,
        open_hours: "9:00 AM - 7:00 PM",
        specialties: &[],
        services: &["Medical Equipment", "Supplies", "Home Care Items"],
        lat: 40.7282,
        lng: -73.9942,
        website: "https://medsupplyplus.com",
        email: "sales@medsupplyplus.com",
        description: "Complete medical supplies and equipment store",
    },
    FacilitySeed {
        id: "8",
        name: "Health Essentials Store",
        facility_type: FacilityType::MedicalShop,
        address: "567 Wellness Ave, Health Center",
        phone: "(555) 789-0123",
        rating: 4.1,
        distance: "2.3 miles",
        is_open: true,
        open_hours: "8:00 AM - 6:00 PM",
        specialties: &[],
        services: &["Medical Devices", "Health Monitors", "First Aid"],
        lat: 40.7589,
        lng: -73.9851,
        website: "https://healthessentials.com",
        email: "info@healthessentials.com",
        description: "Essential health products and medical devices",
    },
    FacilitySeed {
        id: "9",
        name: "CareMed Supplies",
        facility_type: FacilityType::MedicalShop,
        address: "890 Care St, Medical Complex",
        phone: "(555) 890-1234",
        rating: 4.6,
        distance: "2.5 miles",
        is_open: false,
        open_hours: "Closed - Opens 9:00 AM",
        specialties: &[],
        services: &["Professional Medical Equipment", "Diagnostic Tools", "Surgical Supplies"],
        lat: 40.7831,
        lng: -73.9712,
        website: "https://caremedsupplies.com",
        email: "orders@caremedsupplies.com",
        description: "Professional medical equipment and supplies",
    },
    FacilitySeed {
        id: "10",
        name: "Metropolitan Hospital",
        facility_type: FacilityType::Hospital,
        address: "555 Hospital Blvd, Medical District",
        phone: "(555) 567-8901",
        rating: 4.3,
        distance: "2.1 miles",
        is_open: true,
        open_hours: "24 Hours Emergency",
        specialties: &["Emergency Medicine", "Surgery", "Cardiology", "Oncology"],
        services: &["Emergency Room", "Inpatient Care", "Outpatient Services"],
        lat: 40.7505,
        lng: -73.9934,
        website: "https://metropolitanhospital.com",
        email: "info@metropolitanhospital.com",
        description: "Full-service hospital with comprehensive medical care",
    },
    FacilitySeed {
        id: "11",
        name: "City General Hospital",
        facility_type: FacilityType::Hospital,
        address: "123 Hospital Dr, Medical Center",
        phone: "(555) 234-5678",
        rating: 4.5,
        distance: "3.2 miles",
        is_open: true,
        open_hours: "24 Hours",
        specialties: &["General Medicine", "Pediatrics", "Orthopedics", "Neurology"],
        services: &["Emergency Services", "Surgery", "Diagnostic Imaging", "Laboratory"],
        lat: 40.7282,
        lng: -73.9942,
        website: "https://citygeneral.com",
        email: "contact@citygeneral.com",
        description: "Leading general hospital with advanced medical technology",
    },
];

lazy_static! {
    pub static ref FACILITIES: Vec<HealthcareFacility> = SEEDS.iter().map(HealthcareFacility::from).collect();
}
