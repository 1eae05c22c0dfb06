use std::fmt;
use std::io::Read;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::{FEATURE_COUNT, FEATURE_NAMES};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("cannot read model artifact '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed model artifact: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unknown model kind '{kind}'; available: {available:?}")]
    UnknownKind {
        kind: String,
        available: Vec<&'static str>,
    },

    #[error("model was fit on columns {found:?}, expected {expected:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("parameter '{name}' must have {expected} entries, found {found}")]
    ParameterLength {
        name: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("parameter '{name}' contains a non-finite value")]
    NonFiniteParameter { name: &'static str },
}

/// A serialized, pre-fitted regression model.
///
/// ```json
/// {
///   "kind": "linear",
///   "features": ["Salary Difference", "Age", "H", "R", "RBI", "BB", "SO", "SB", "OPS"],
///   "intercept": 13.0,
///   "coefficients": [0.00000002, 0.05, 0.004, 0.003, 0.005, 0.002, -0.001, 0.001, 0.5]
/// }
/// ```
///
/// `kind` selects the [`ModelFactory`](super::ModelFactory) that interprets
/// the remaining, kind-specific keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub kind: String,
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub params: Map<String, Value>,
}

impl ModelArtifact {
    pub fn from_json(input: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ModelError> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Deserialize the kind-specific keys into a parameter struct.
    pub fn params<T: DeserializeOwned>(&self) -> Result<T, ModelError> {
        Ok(serde_json::from_value(Value::Object(self.params.clone()))?)
    }

    /// Fails unless `features` lists the canonical columns in order.
    pub fn check_features(&self) -> Result<(), ModelError> {
        check_feature_order(&self.features)
    }
}

pub(crate) fn check_feature_order(found: &[String]) -> Result<(), ModelError> {
    if found.iter().map(String::as_str).eq(FEATURE_NAMES) {
        return Ok(());
    }

    Err(ModelError::FeatureMismatch {
        expected: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
        found: found.to_vec(),
    })
}

/// Convert a parameter vector to a fixed-width array of finite values.
pub(crate) fn fixed_width(
    name: &'static str,
    values: Vec<f64>,
) -> Result<[f64; FEATURE_COUNT], ModelError> {
    let found = values.len();
    let array: [f64; FEATURE_COUNT] = values.try_into().map_err(|_| ModelError::ParameterLength {
        name,
        expected: FEATURE_COUNT,
        found,
    })?;

    if array.iter().any(|v| !v.is_finite()) {
        return Err(ModelError::NonFiniteParameter { name });
    }

    Ok(array)
}

/// A fitted regression function whose target is the natural log of salary.
pub trait SalaryModel: fmt::Debug + Send + Sync {
    /// The artifact kind this model was built from.
    fn kind(&self) -> &'static str;

    /// Column names in the order the model was fit on.
    fn features(&self) -> &[String];

    /// Raw log-scale prediction for one row laid out in [`FEATURE_NAMES`] order.
    fn predict_log(
        &self,
        row: &[f64; FEATURE_COUNT],
    ) -> f64;
}
