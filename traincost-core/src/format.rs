//! Currency rendering for derived values.
//!
//! One rule, applied by absolute magnitude: values of $100 and up render as
//! whole dollars with thousands separators (cents on a six-figure total are
//! noise); values under $100 render with exactly two decimal places. The
//! sign is preserved and the threshold is judged on the magnitude, so
//! `-150.2` renders as `-$150`, not through the under-100 branch.

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

/// Formats a monetary value under the threshold-based precision rule.
pub fn format_currency(value: Decimal) -> String {
    let magnitude = value.abs();
    let sign = if value.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };

    if magnitude >= Decimal::ONE_HUNDRED {
        let whole = magnitude.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        format!("{sign}${}", group_thousands(&whole.to_string()))
    } else {
        let cents = magnitude.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        format!("{sign}${cents:.2}")
    }
}

/// Formats an hour figure to a fixed number of decimal places.
pub fn format_hours(
    value: Decimal,
    places: u32,
) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    format!("{rounded:.places$}", places = places as usize)
}

/// Inserts thousands separators into a plain digit string.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn under_threshold_renders_two_decimals() {
        assert_eq!(format_currency(dec!(17)), "$17.00");
        assert_eq!(format_currency(dec!(99.99)), "$99.99");
        assert_eq!(format_currency(dec!(0)), "$0.00");
    }

    #[test]
    fn threshold_branch_is_chosen_before_rounding() {
        // 99.999 is under the threshold, so it takes the two-decimal form
        // even though rounding lands it on 100.
        assert_eq!(format_currency(dec!(99.999)), "$100.00");
    }

    #[test]
    fn at_and_above_threshold_renders_whole_dollars() {
        assert_eq!(format_currency(dec!(100)), "$100");
        assert_eq!(format_currency(dec!(100.4)), "$100");
        assert_eq!(format_currency(dec!(161566)), "$161,566");
    }

    #[test]
    fn large_values_get_thousands_separators() {
        assert_eq!(format_currency(dec!(1234567.89)), "$1,234,568");
        assert_eq!(format_currency(dec!(1000)), "$1,000");
    }

    #[test]
    fn negative_values_use_the_magnitude_for_the_threshold() {
        assert_eq!(format_currency(dec!(-150.2)), "-$150");
        assert_eq!(format_currency(dec!(-42.5)), "-$42.50");
    }

    #[test]
    fn format_hours_pads_to_the_requested_places() {
        assert_eq!(format_hours(dec!(6.25), 2), "6.25");
        assert_eq!(format_hours(dec!(1.5), 2), "1.50");
        assert_eq!(format_hours(dec!(7.2816), 1), "7.3");
        assert_eq!(format_hours(dec!(21434.05), 0), "21434");
    }
}
