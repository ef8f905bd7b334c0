pub mod data;
pub mod directory;
pub mod routes;

pub use directory::FacilityDirectory;
