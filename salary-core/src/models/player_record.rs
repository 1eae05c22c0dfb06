use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{FeatureVector, SalaryEstimate, ValueFlag};

/// One hitter from a season dataset: identity, actual salary and the
/// statistics the model consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    /// Actual salary for the season, in dollars.
    pub salary: Decimal,
    pub features: FeatureVector,
}

/// A [`PlayerRecord`] augmented with the model's estimate and the resulting
/// value classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerComparison {
    pub player: PlayerRecord,
    pub predicted_salary: SalaryEstimate,
    pub value: ValueFlag,
}

impl PlayerComparison {
    pub fn new(
        player: PlayerRecord,
        predicted_salary: SalaryEstimate,
    ) -> Self {
        let value = ValueFlag::classify(predicted_salary.amount(), player.salary);
        Self {
            player,
            predicted_salary,
            value,
        }
    }

    pub fn name(&self) -> &str {
        &self.player.name
    }
}
