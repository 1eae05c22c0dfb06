//! Shared numeric helpers for turning model output into currency.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to whole currency units, resolving exact halves to the even
/// neighbour.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use salary_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(1234.4)), dec!(1234));
/// assert_eq!(round_whole(dec!(1234.5)), dec!(1234));
/// assert_eq!(round_whole(dec!(1235.5)), dec!(1236));
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointNearestEven)
}

/// Converts a finite `f64` to [`Decimal`]; `None` when out of range or not finite.
pub fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn round_whole_rounds_fraction_up_above_midpoint() {
        assert_eq!(round_whole(dec!(6305923.5775)), dec!(6305924));
    }

    #[test]
    fn round_whole_resolves_midpoint_to_even() {
        assert_eq!(round_whole(dec!(2.5)), dec!(2));
        assert_eq!(round_whole(dec!(3.5)), dec!(4));
    }

    #[test]
    fn decimal_from_f64_rejects_non_finite() {
        assert_eq!(decimal_from_f64(f64::INFINITY), None);
        assert_eq!(decimal_from_f64(f64::NAN), None);
    }

    #[test]
    fn decimal_from_f64_rejects_out_of_range() {
        assert_eq!(decimal_from_f64(1e40), None);
    }

    #[test]
    fn decimal_from_f64_keeps_whole_values_exact() {
        assert_eq!(decimal_from_f64(442413.0), Some(dec!(442413)));
    }
}
