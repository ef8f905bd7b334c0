pub mod model;
pub mod registry;
pub mod trainer;

pub use model::{TrainRequest, TrainingError};
pub use registry::{JobRegistry, JobStatusCounts};
pub use trainer::{SimulatedTrainer, Trainer};
