//! Shared helpers for the tax calculators.

use rust_decimal::Decimal;

/// Rounds a decimal value to exactly two decimal places using half-up
/// rounding (midpoint away from zero), the standard financial convention.
///
/// Applied when a breakdown is assembled for presentation; the bracket
/// walks themselves stay unrounded so their two traversals agree exactly.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use vest_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(123.454)), dec!(123.45));
/// assert_eq!(round_half_up(dec!(123.455)), dec!(123.46));
/// assert_eq!(round_half_up(dec!(-123.455)), dec!(-123.46)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero)
}

/// Clamps a value to zero from below.
///
/// Negative intermediate amounts (a capital loss, an over-subtracted
/// band) are never taxed; they degrade to zero.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use vest_core::calculations::common::non_negative;
///
/// assert_eq!(non_negative(dec!(12.50)), dec!(12.50));
/// assert_eq!(non_negative(dec!(-12.50)), dec!(0));
/// ```
pub fn non_negative(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO)
}
