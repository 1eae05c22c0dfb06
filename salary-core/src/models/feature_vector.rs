//! The fixed-order numeric inputs consumed by a salary model.
//!
//! A model is fit on a table whose columns appear in a specific order. The
//! order below is that contract; [`FeatureVector::to_array`] is the only place
//! the struct fields are laid out positionally.
//!
//! | Index | Column              | Field               |
//! |-------|---------------------|---------------------|
//! | 0     | `Salary Difference` | `salary_difference` |
//! | 1     | `Age`               | `age`               |
//! | 2     | `H`                 | `hits`              |
//! | 3     | `R`                 | `runs`              |
//! | 4     | `RBI`               | `rbi`               |
//! | 5     | `BB`                | `walks`             |
//! | 6     | `SO`                | `strikeouts`        |
//! | 7     | `SB`                | `stolen_bases`      |
//! | 8     | `OPS`               | `ops`               |

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const FEATURE_COUNT: usize = 9;

/// Column names in the order the regression model was fit on.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] =
    ["Salary Difference", "Age", "H", "R", "RBI", "BB", "SO", "SB", "OPS"];

/// Performance statistics for a single hitter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Average year-over-year salary change across the player's career, in dollars.
    pub salary_difference: f64,
    pub age: f64,
    pub hits: f64,
    pub runs: f64,
    pub rbi: f64,
    pub walks: f64,
    pub strikeouts: f64,
    pub stolen_bases: f64,
    /// On-base plus slugging.
    pub ops: f64,
}

/// A feature value that cannot be fed to the model.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid feature '{name}' ({value}): {reason}")]
pub struct InvalidFeature {
    pub name: &'static str,
    pub value: f64,
    pub reason: &'static str,
}

impl FeatureVector {
    /// Values in model column order.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.salary_difference,
            self.age,
            self.hits,
            self.runs,
            self.rbi,
            self.walks,
            self.strikeouts,
            self.stolen_bases,
            self.ops,
        ]
    }

    /// `(column name, value)` pairs in model column order.
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> {
        FEATURE_NAMES.into_iter().zip(self.to_array())
    }

    /// Checks every value is finite and physically plausible.
    ///
    /// The salary difference may be negative; every other value must be zero
    /// or more.
    pub fn validate(&self) -> Result<(), InvalidFeature> {
        for (name, value) in self.named() {
            if !value.is_finite() {
                return Err(InvalidFeature {
                    name,
                    value,
                    reason: "must be a finite number",
                });
            }

            match name {
                "Salary Difference" => {}
                _ if value < 0.0 => {
                    return Err(InvalidFeature {
                        name,
                        value,
                        reason: "must not be negative",
                    });
                }
                _ => {}
            }
        }

        Ok(())
    }
}
