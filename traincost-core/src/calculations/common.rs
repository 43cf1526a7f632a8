//! Shared arithmetic helpers for the calculation engine.

use rust_decimal::Decimal;

/// Rounds a decimal value to a whole number using half-up rounding.
///
/// Cohort sizes are people, so the fully-multiplied value is rounded to a
/// whole count exactly once, with values at .5 going away from zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use traincost_core::calculations::common::round_whole;
///
/// assert_eq!(round_whole(dec!(818.75)), dec!(819));
/// assert_eq!(round_whole(dec!(818.49)), dec!(818));
/// assert_eq!(round_whole(dec!(818.5)), dec!(819));
/// ```
pub fn round_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Divides, returning zero when the denominator is zero.
///
/// Every ratio in the engine uses this: a configuration with no stores, no
/// turnover, or a free proposed program yields zeros, never a division by
/// zero or a non-finite value.
pub fn ratio_or_zero(
    numerator: Decimal,
    denominator: Decimal,
) -> Decimal {
    if denominator.is_zero() {
        Decimal::ZERO
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_whole tests
    // =========================================================================

    #[test]
    fn round_whole_rounds_down_below_midpoint() {
        assert_eq!(round_whole(dec!(736.49)), dec!(736));
    }

    #[test]
    fn round_whole_rounds_up_at_midpoint() {
        assert_eq!(round_whole(dec!(982.5)), dec!(983));
    }

    #[test]
    fn round_whole_rounds_up_above_midpoint() {
        assert_eq!(round_whole(dec!(818.75)), dec!(819));
    }

    #[test]
    fn round_whole_preserves_whole_values() {
        assert_eq!(round_whole(dec!(3930)), dec!(3930));
    }

    #[test]
    fn round_whole_handles_zero() {
        assert_eq!(round_whole(dec!(0)), dec!(0));
    }

    // =========================================================================
    // ratio_or_zero tests
    // =========================================================================

    #[test]
    fn ratio_or_zero_divides_normally() {
        assert_eq!(ratio_or_zero(dec!(3275), dec!(240)), dec!(3275) / dec!(240));
    }

    #[test]
    fn ratio_or_zero_returns_zero_for_zero_denominator() {
        assert_eq!(ratio_or_zero(dec!(3275), dec!(0)), dec!(0));
    }

    #[test]
    fn ratio_or_zero_zero_numerator() {
        assert_eq!(ratio_or_zero(dec!(0), dec!(240)), dec!(0));
    }
}
