use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A point salary estimate in whole dollars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SalaryEstimate(Decimal);

impl SalaryEstimate {
    pub fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl From<SalaryEstimate> for Decimal {
    fn from(estimate: SalaryEstimate) -> Self {
        estimate.0
    }
}

impl fmt::Display for SalaryEstimate {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
