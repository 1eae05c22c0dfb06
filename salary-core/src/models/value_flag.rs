use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a player's actual salary compares with the model's estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueFlag {
    /// The model thinks the player is worth more than they are paid.
    #[serde(rename = "Under-valued")]
    UnderValued,
    /// The player is paid more than the model thinks they are worth.
    #[serde(rename = "Over-valued")]
    OverValued,
    #[serde(rename = "Equal")]
    Equal,
}

impl ValueFlag {
    pub fn classify(
        predicted: Decimal,
        actual: Decimal,
    ) -> Self {
        match predicted.cmp(&actual) {
            Ordering::Greater => Self::UnderValued,
            Ordering::Less => Self::OverValued,
            Ordering::Equal => Self::Equal,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnderValued => "Under-valued",
            Self::OverValued => "Over-valued",
            Self::Equal => "Equal",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Under-valued" => Some(Self::UnderValued),
            "Over-valued" => Some(Self::OverValued),
            "Equal" => Some(Self::Equal),
            _ => None,
        }
    }
}

impl fmt::Display for ValueFlag {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn classify_predicted_above_actual_is_under_valued() {
        assert_eq!(
            ValueFlag::classify(dec!(120), dec!(100)),
            ValueFlag::UnderValued
        );
    }

    #[test]
    fn classify_predicted_below_actual_is_over_valued() {
        assert_eq!(
            ValueFlag::classify(dec!(80), dec!(100)),
            ValueFlag::OverValued
        );
    }

    #[test]
    fn classify_tie_is_equal() {
        assert_eq!(ValueFlag::classify(dec!(100), dec!(100.00)), ValueFlag::Equal);
    }

    #[test]
    fn labels_parse_back() {
        for flag in [ValueFlag::UnderValued, ValueFlag::OverValued, ValueFlag::Equal] {
            assert_eq!(ValueFlag::parse(flag.as_str()), Some(flag));
        }
        assert_eq!(ValueFlag::parse("under-valued"), None);
    }
}
