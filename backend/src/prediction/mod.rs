pub mod engine;
pub mod weights;

pub use engine::{PredictionError, ScoringEngine};
