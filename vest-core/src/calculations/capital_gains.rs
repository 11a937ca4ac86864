//! Flat-rate capital-gains tax.

use rust_decimal::Decimal;

/// Tax on a price appreciation: `gain * rate` only when the gain is
/// strictly positive. Zero or negative gains draw zero tax; a loss never
/// produces a rebate here.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use vest_core::capital_gains_tax;
///
/// assert_eq!(capital_gains_tax(dec!(3700), dec!(0.25)), dec!(925.00));
/// assert_eq!(capital_gains_tax(dec!(0), dec!(0.25)), dec!(0));
/// assert_eq!(capital_gains_tax(dec!(-500), dec!(0.25)), dec!(0));
/// ```
pub fn capital_gains_tax(
    gain: Decimal,
    rate: Decimal,
) -> Decimal {
    if gain > Decimal::ZERO {
        gain * rate
    } else {
        Decimal::ZERO
    }
}
