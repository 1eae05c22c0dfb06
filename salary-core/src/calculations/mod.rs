//! Salary estimation and batch comparison over a season dataset.

pub mod common;
pub mod comparator;
pub mod estimator;

pub use comparator::{BatchComparator, CompareError, ComparisonTable};
pub use estimator::{EstimateError, SalaryEstimator};
