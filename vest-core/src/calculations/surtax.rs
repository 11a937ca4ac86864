//! Surtax ("yasaf") on high combined annual income.

use rust_decimal::Decimal;

use crate::calculations::common::non_negative;

/// Surtax on the portion of `income_subject` that pushes combined annual
/// income above `threshold`:
///
/// ```text
/// max(0, min(income_subject, baseline + income_subject - threshold)) * rate
/// ```
///
/// The inner `min` keeps the taxed amount from exceeding the income
/// itself (a baseline already above the threshold cannot tax more than
/// the new income); the outer clamp keeps combined income below the
/// threshold from going negative. Which income counts as subject to
/// surtax is the *caller's* decision: the RSU and ESPP orchestrators
/// pass different bases per track.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use vest_core::surtax;
///
/// // Baseline exactly at the threshold: the whole increment is taxed.
/// assert_eq!(
///     surtax(dec!(721560), dec!(10000), dec!(721560), dec!(0.05)),
///     dec!(500.00)
/// );
/// // Combined income below the threshold: nothing is taxed.
/// assert_eq!(
///     surtax(dec!(700000), dec!(10000), dec!(721560), dec!(0.05)),
///     dec!(0)
/// );
/// ```
pub fn surtax(
    baseline_annual_income: Decimal,
    income_subject: Decimal,
    threshold: Decimal,
    rate: Decimal,
) -> Decimal {
    let above_threshold = baseline_annual_income + income_subject - threshold;
    let taxed = non_negative(income_subject.min(above_threshold));

    taxed * rate
}
