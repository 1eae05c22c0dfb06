pub mod calculations;
pub mod model;
pub mod models;

pub use calculations::{BatchComparator, CompareError, ComparisonTable, EstimateError, SalaryEstimator};
pub use model::{ModelArtifact, ModelError, ModelRegistry, SalaryModel};
pub use models::*;
