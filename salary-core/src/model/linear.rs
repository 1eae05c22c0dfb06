//! Linear regression models, with and without a standard-scaler step.

use serde::Deserialize;

use super::artifact::{ModelArtifact, ModelError, SalaryModel, fixed_width};
use super::factory::ModelFactory;
use crate::models::FEATURE_COUNT;

#[derive(Debug, Deserialize)]
struct LinearParams {
    intercept: f64,
    coefficients: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct ScaledLinearParams {
    intercept: f64,
    coefficients: Vec<f64>,
    mean: Vec<f64>,
    scale: Vec<f64>,
}

/// `intercept + Σ coefficient_i · x_i`
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    features: Vec<String>,
    intercept: f64,
    coefficients: [f64; FEATURE_COUNT],
}

impl LinearModel {
    pub fn new(
        features: Vec<String>,
        intercept: f64,
        coefficients: [f64; FEATURE_COUNT],
    ) -> Self {
        Self {
            features,
            intercept,
            coefficients,
        }
    }

    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    pub fn coefficients(&self) -> &[f64; FEATURE_COUNT] {
        &self.coefficients
    }

    fn evaluate(
        &self,
        row: &[f64; FEATURE_COUNT],
    ) -> f64 {
        self.intercept
            + row
                .iter()
                .zip(&self.coefficients)
                .map(|(x, c)| x * c)
                .sum::<f64>()
    }
}

impl SalaryModel for LinearModel {
    fn kind(&self) -> &'static str {
        LinearModelFactory.kind()
    }

    fn features(&self) -> &[String] {
        &self.features
    }

    fn predict_log(
        &self,
        row: &[f64; FEATURE_COUNT],
    ) -> f64 {
        self.evaluate(row)
    }
}

/// Standardises each input as `(x - mean) / scale` before the linear step.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaledLinearModel {
    linear: LinearModel,
    mean: [f64; FEATURE_COUNT],
    scale: [f64; FEATURE_COUNT],
}

impl ScaledLinearModel {
    /// A zero scale marks a constant training column and is treated as 1.
    pub fn new(
        linear: LinearModel,
        mean: [f64; FEATURE_COUNT],
        scale: [f64; FEATURE_COUNT],
    ) -> Self {
        let scale = scale.map(|s| if s == 0.0 { 1.0 } else { s });
        Self {
            linear,
            mean,
            scale,
        }
    }
}

impl SalaryModel for ScaledLinearModel {
    fn kind(&self) -> &'static str {
        ScaledLinearModelFactory.kind()
    }

    fn features(&self) -> &[String] {
        &self.linear.features
    }

    fn predict_log(
        &self,
        row: &[f64; FEATURE_COUNT],
    ) -> f64 {
        let mut scaled = [0.0; FEATURE_COUNT];
        for (i, x) in row.iter().enumerate() {
            scaled[i] = (x - self.mean[i]) / self.scale[i];
        }
        self.linear.evaluate(&scaled)
    }
}

/// Builds [`LinearModel`]s from artifacts of kind `linear`.
pub struct LinearModelFactory;

impl ModelFactory for LinearModelFactory {
    fn kind(&self) -> &'static str {
        "linear"
    }

    fn build(
        &self,
        artifact: &ModelArtifact,
    ) -> Result<Box<dyn SalaryModel>, ModelError> {
        artifact.check_features()?;
        let params: LinearParams = artifact.params()?;

        Ok(Box::new(build_linear(
            artifact,
            params.intercept,
            params.coefficients,
        )?))
    }
}

/// Builds [`ScaledLinearModel`]s from artifacts of kind `scaled-linear`.
pub struct ScaledLinearModelFactory;

impl ModelFactory for ScaledLinearModelFactory {
    fn kind(&self) -> &'static str {
        "scaled-linear"
    }

    fn build(
        &self,
        artifact: &ModelArtifact,
    ) -> Result<Box<dyn SalaryModel>, ModelError> {
        artifact.check_features()?;
        let params: ScaledLinearParams = artifact.params()?;

        let linear = build_linear(artifact, params.intercept, params.coefficients)?;
        let mean = fixed_width("mean", params.mean)?;
        let scale = fixed_width("scale", params.scale)?;

        Ok(Box::new(ScaledLinearModel::new(linear, mean, scale)))
    }
}

fn build_linear(
    artifact: &ModelArtifact,
    intercept: f64,
    coefficients: Vec<f64>,
) -> Result<LinearModel, ModelError> {
    if !intercept.is_finite() {
        return Err(ModelError::NonFiniteParameter { name: "intercept" });
    }
    let coefficients = fixed_width("coefficients", coefficients)?;

    Ok(LinearModel::new(
        artifact.features.clone(),
        intercept,
        coefficients,
    ))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const FEATURES: &str =
        r#"["Salary Difference", "Age", "H", "R", "RBI", "BB", "SO", "SB", "OPS"]"#;

    fn linear_artifact(coefficients: &str) -> ModelArtifact {
        ModelArtifact::from_json(&format!(
            r#"{{"kind": "linear", "features": {FEATURES}, "intercept": 13.0, "coefficients": {coefficients}}}"#
        ))
        .expect("fixture artifact should parse")
    }

    #[test]
    fn linear_model_adds_weighted_inputs_to_intercept() {
        let model = LinearModelFactory
            .build(&linear_artifact("[0, 1, 0, 0, 0, 0, 0, 0, 2]"))
            .expect("should build");

        let row = [0.0, 3.0, 100.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.5];
        assert_eq!(model.predict_log(&row), 17.0);
        assert_eq!(model.kind(), "linear");
    }

    #[test]
    fn linear_model_of_zero_row_is_intercept() {
        let model = LinearModelFactory
            .build(&linear_artifact("[1, 1, 1, 1, 1, 1, 1, 1, 1]"))
            .unwrap();

        assert_eq!(model.predict_log(&[0.0; FEATURE_COUNT]), 13.0);
    }

    #[test]
    fn linear_factory_rejects_short_coefficients() {
        let err = LinearModelFactory
            .build(&linear_artifact("[1, 2, 3]"))
            .expect_err("three coefficients is not enough");

        assert!(matches!(
            err,
            ModelError::ParameterLength {
                name: "coefficients",
                found: 3,
                ..
            }
        ));
    }

    #[test]
    fn linear_factory_rejects_missing_intercept() {
        let artifact = ModelArtifact::from_json(&format!(
            r#"{{"kind": "linear", "features": {FEATURES}, "coefficients": [0, 0, 0, 0, 0, 0, 0, 0, 0]}}"#
        ))
        .unwrap();

        assert!(matches!(
            LinearModelFactory.build(&artifact),
            Err(ModelError::Malformed(_))
        ));
    }

    #[test]
    fn scaled_model_standardises_inputs() {
        let artifact = ModelArtifact::from_json(&format!(
            r#"{{
                "kind": "scaled-linear",
                "features": {FEATURES},
                "intercept": 14.0,
                "coefficients": [0, 1, 0, 0, 0, 0, 0, 0, 0],
                "mean": [0, 27, 0, 0, 0, 0, 0, 0, 0],
                "scale": [1, 5, 1, 1, 1, 1, 1, 1, 1]
            }}"#
        ))
        .unwrap();
        let model = ScaledLinearModelFactory.build(&artifact).expect("should build");

        let mut row = [0.0; FEATURE_COUNT];
        row[1] = 32.0;
        assert_eq!(model.predict_log(&row), 15.0);
        assert_eq!(model.kind(), "scaled-linear");
    }

    #[test]
    fn scaled_model_treats_zero_scale_as_one() {
        let linear = LinearModel::new(Vec::new(), 0.0, [1.0; FEATURE_COUNT]);
        let model = ScaledLinearModel::new(linear, [2.0; FEATURE_COUNT], [0.0; FEATURE_COUNT]);

        assert_eq!(model.predict_log(&[3.0; FEATURE_COUNT]), 9.0);
    }
}
