//! Point salary estimates from a log-salary regression model.
//!
//! The model is fit on `ln(salary)`, so an estimate is
//! `round(exp(model(features)))` in whole dollars.
//!
//! # Example
//!
//! ```
//! use salary_core::{FeatureVector, ModelArtifact, ModelRegistry, SalaryEstimator};
//! use rust_decimal_macros::dec;
//!
//! let artifact = ModelArtifact::from_json(r#"{
//!     "kind": "linear",
//!     "features": ["Salary Difference", "Age", "H", "R", "RBI", "BB", "SO", "SB", "OPS"],
//!     "intercept": 13.0,
//!     "coefficients": [0.00000002, 0.05, 0.004, 0.003, 0.005, 0.002, -0.001, 0.001, 0.5]
//! }"#).unwrap();
//! let model = ModelRegistry::with_builtin_kinds().build(&artifact).unwrap();
//! let estimator = SalaryEstimator::new(model).unwrap();
//!
//! let features = FeatureVector {
//!     salary_difference: 0.0,
//!     age: 27.0,
//!     hits: 100.0,
//!     runs: 50.0,
//!     rbi: 60.0,
//!     walks: 60.0,
//!     strikeouts: 75.0,
//!     stolen_bases: 12.0,
//!     ops: 0.8,
//! };
//!
//! let estimate = estimator.estimate(&features).unwrap();
//! assert_eq!(estimate.amount(), dec!(6305924));
//! ```

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use super::common::{decimal_from_f64, round_whole};
use crate::model::{ModelError, ModelRegistry, SalaryModel};
use crate::models::{FeatureVector, InvalidFeature, SalaryEstimate};

#[derive(Debug, Error)]
pub enum EstimateError {
    /// The model artifact could not be loaded or does not fit the feature layout.
    #[error("salary model unavailable: {0}")]
    ModelUnavailable(#[from] ModelError),

    #[error(transparent)]
    InvalidFeature(#[from] InvalidFeature),

    /// `exp` of the log prediction is not representable as a salary.
    #[error("model produced an unusable log-salary prediction ({0})")]
    NonFinitePrediction(f64),
}

/// Applies a pre-fitted model to single feature vectors.
///
/// The model is immutable after construction, so one estimator can serve
/// any number of requests.
#[derive(Debug)]
pub struct SalaryEstimator {
    model: Box<dyn SalaryModel>,
}

impl SalaryEstimator {
    /// Wrap a model, checking it was fit on the canonical column order.
    pub fn new(model: Box<dyn SalaryModel>) -> Result<Self, ModelError> {
        crate::model::check_feature_order(model.features())?;
        Ok(Self { model })
    }

    /// Load the artifact at `path` through `registry`.
    ///
    /// # Errors
    ///
    /// Every failure maps to [`EstimateError::ModelUnavailable`].
    pub fn from_artifact_path(
        registry: &ModelRegistry,
        path: &Path,
    ) -> Result<Self, EstimateError> {
        let model = registry.load(path)?;
        Ok(Self::new(model)?)
    }

    pub fn model(&self) -> &dyn SalaryModel {
        self.model.as_ref()
    }

    /// The model's raw output before the inverse-log transform.
    pub fn log_prediction(
        &self,
        features: &FeatureVector,
    ) -> Result<f64, EstimateError> {
        features.validate()?;
        Ok(self.model.predict_log(&features.to_array()))
    }

    /// Estimate a salary in whole dollars.
    ///
    /// # Errors
    ///
    /// * [`EstimateError::InvalidFeature`] – a value is non-finite or out of range.
    /// * [`EstimateError::NonFinitePrediction`] – the exponentiated prediction
    ///   cannot be represented.
    pub fn estimate(
        &self,
        features: &FeatureVector,
    ) -> Result<SalaryEstimate, EstimateError> {
        self.estimate_with_log(features).map(|(_, estimate)| estimate)
    }

    /// The raw log prediction together with the estimate derived from it,
    /// from a single model evaluation.
    pub fn estimate_with_log(
        &self,
        features: &FeatureVector,
    ) -> Result<(f64, SalaryEstimate), EstimateError> {
        let log_salary = self.log_prediction(features)?;
        let salary = log_salary.exp();

        let amount =
            decimal_from_f64(salary).ok_or(EstimateError::NonFinitePrediction(log_salary))?;
        let estimate = SalaryEstimate::new(round_whole(amount));

        debug!(log_salary, %estimate, "estimated salary");
        Ok((log_salary, estimate))
    }
}
