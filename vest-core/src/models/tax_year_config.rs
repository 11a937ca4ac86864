use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::tax_bracket::TaxBracket;

/// Errors reported by [`TaxYearConfig::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxConfigError {
    /// The bracket list is empty.
    #[error("no tax brackets configured")]
    NoBrackets,

    /// Bracket upper bounds are not strictly ascending.
    #[error("bracket upper bounds must be strictly ascending, got {0} after {1}")]
    UnorderedBrackets(Decimal, Decimal),

    /// A bounded bracket appears after the unbounded one, or the final
    /// bracket is bounded.
    #[error("the bracket list must end in a single unbounded bracket")]
    NoTerminalBracket,

    /// A rate is outside [0, 1].
    #[error("{0} must be between 0 and 1, got {1}")]
    InvalidRate(&'static str, Decimal),

    /// A monthly threshold is negative or the ceiling sits below the low
    /// threshold.
    #[error("monthly thresholds must satisfy 0 <= low <= ceiling, got low {low}, ceiling {ceiling}")]
    InvalidThresholds { low: Decimal, ceiling: Decimal },

    /// The annual surtax threshold is negative.
    #[error("surtax threshold must be non-negative, got {0}")]
    InvalidSurtaxThreshold(Decimal),
}

/// Complete tax parameters for one tax year.
///
/// Built once (from [`vest-data`] seeds or a loaded bracket CSV), then
/// passed by shared reference to every calculator. The struct is plain
/// data: nothing in the engine mutates it, so one value can serve any
/// number of concurrent calculations, and several years can coexist for
/// historical recalculation.
///
/// NI/health thresholds are **monthly** amounts; the surtax threshold is
/// **annual**. All rates are fractions (`0.07` = 7%).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxYearConfig {
    pub tax_year: i32,

    /// Progressive income-tax brackets, ascending, ending unbounded.
    pub brackets: Vec<TaxBracket>,

    /// Monthly income up to which the reduced NI/health rates apply.
    pub ni_monthly_low_threshold: Decimal,
    /// Monthly income ceiling; income above it carries no NI/health at all.
    pub ni_monthly_ceiling: Decimal,
    pub ni_low_rate: Decimal,
    pub ni_high_rate: Decimal,
    pub health_low_rate: Decimal,
    pub health_high_rate: Decimal,

    /// Flat rate on positive capital gains.
    pub capital_gains_rate: Decimal,

    /// Surtax ("yasaf") rate on annual income above `surtax_threshold`.
    pub surtax_rate: Decimal,
    pub surtax_threshold: Decimal,

    /// Section-102 holding period, in calendar months from grant.
    pub maturation_months: u32,
}

impl TaxYearConfig {
    /// Checks the structural invariants the calculators rely on.
    ///
    /// The calculators themselves never panic on a malformed config (the
    /// bracket walk is total either way); this exists so configuration
    /// sources can reject bad data at the edge instead of producing
    /// silently wrong tax.
    ///
    /// # Errors
    ///
    /// Returns [`TaxConfigError`] if:
    /// - the bracket list is empty, out of order, or does not end in a
    ///   single unbounded bracket
    /// - any rate is outside [0, 1]
    /// - the monthly thresholds are negative or inverted
    /// - the surtax threshold is negative
    pub fn validate(&self) -> Result<(), TaxConfigError> {
        if self.brackets.is_empty() {
            return Err(TaxConfigError::NoBrackets);
        }

        let mut prev: Option<Decimal> = None;
        for (i, bracket) in self.brackets.iter().enumerate() {
            match (bracket.upper_bound, prev) {
                (Some(upper), Some(p)) if upper <= p => {
                    return Err(TaxConfigError::UnorderedBrackets(upper, p));
                }
                // Anything after an unbounded bracket is unreachable.
                (_, None) if i > 0 => return Err(TaxConfigError::NoTerminalBracket),
                _ => {}
            }
            prev = bracket.upper_bound;
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(TaxConfigError::InvalidRate("bracket rate", bracket.rate));
            }
        }
        if prev.is_some() {
            return Err(TaxConfigError::NoTerminalBracket);
        }

        for (name, rate) in [
            ("NI low rate", self.ni_low_rate),
            ("NI high rate", self.ni_high_rate),
            ("health low rate", self.health_low_rate),
            ("health high rate", self.health_high_rate),
            ("capital gains rate", self.capital_gains_rate),
            ("surtax rate", self.surtax_rate),
        ] {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(TaxConfigError::InvalidRate(name, rate));
            }
        }

        if self.ni_monthly_low_threshold < Decimal::ZERO
            || self.ni_monthly_ceiling < self.ni_monthly_low_threshold
        {
            return Err(TaxConfigError::InvalidThresholds {
                low: self.ni_monthly_low_threshold,
                ceiling: self.ni_monthly_ceiling,
            });
        }

        if self.surtax_threshold < Decimal::ZERO {
            return Err(TaxConfigError::InvalidSurtaxThreshold(self.surtax_threshold));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn test_config() -> TaxYearConfig {
        TaxYearConfig {
            tax_year: 2024,
            brackets: vec![
                TaxBracket {
                    upper_bound: Some(dec!(84120)),
                    rate: dec!(0.10),
                },
                TaxBracket {
                    upper_bound: Some(dec!(120720)),
                    rate: dec!(0.14),
                },
                TaxBracket {
                    upper_bound: None,
                    rate: dec!(0.20),
                },
            ],
            ni_monthly_low_threshold: dec!(7122),
            ni_monthly_ceiling: dec!(49030),
            ni_low_rate: dec!(0.004),
            ni_high_rate: dec!(0.07),
            health_low_rate: dec!(0.031),
            health_high_rate: dec!(0.05),
            capital_gains_rate: dec!(0.25),
            surtax_rate: dec!(0.05),
            surtax_threshold: dec!(721560),
            maturation_months: 24,
        }
    }

    #[test]
    fn validate_accepts_valid_config() {
        let config = test_config();

        let result = config.validate();

        assert_eq!(result, Ok(()));
    }

    #[test]
    fn validate_rejects_empty_brackets() {
        let config = TaxYearConfig {
            brackets: vec![],
            ..test_config()
        };

        let result = config.validate();

        assert_eq!(result, Err(TaxConfigError::NoBrackets));
    }

    #[test]
    fn validate_rejects_unordered_brackets() {
        let mut config = test_config();
        config.brackets[1].upper_bound = Some(dec!(50000));

        let result = config.validate();

        assert_eq!(
            result,
            Err(TaxConfigError::UnorderedBrackets(dec!(50000), dec!(84120)))
        );
    }

    #[test]
    fn validate_rejects_bounded_final_bracket() {
        let mut config = test_config();
        config.brackets[2].upper_bound = Some(dec!(200000));

        let result = config.validate();

        assert_eq!(result, Err(TaxConfigError::NoTerminalBracket));
    }

    #[test]
    fn validate_rejects_bracket_after_unbounded() {
        let mut config = test_config();
        config.brackets[1].upper_bound = None;

        let result = config.validate();

        assert_eq!(result, Err(TaxConfigError::NoTerminalBracket));
    }

    #[test]
    fn validate_rejects_rate_above_one() {
        let mut config = test_config();
        config.brackets[0].rate = dec!(1.5);

        let result = config.validate();

        assert_eq!(
            result,
            Err(TaxConfigError::InvalidRate("bracket rate", dec!(1.5)))
        );
    }

    #[test]
    fn validate_rejects_negative_ni_rate() {
        let config = TaxYearConfig {
            ni_high_rate: dec!(-0.07),
            ..test_config()
        };

        let result = config.validate();

        assert_eq!(
            result,
            Err(TaxConfigError::InvalidRate("NI high rate", dec!(-0.07)))
        );
    }

    #[test]
    fn validate_rejects_inverted_thresholds() {
        let config = TaxYearConfig {
            ni_monthly_low_threshold: dec!(50000),
            ni_monthly_ceiling: dec!(7122),
            ..test_config()
        };

        let result = config.validate();

        assert_eq!(
            result,
            Err(TaxConfigError::InvalidThresholds {
                low: dec!(50000),
                ceiling: dec!(7122),
            })
        );
    }

    #[test]
    fn validate_rejects_negative_surtax_threshold() {
        let config = TaxYearConfig {
            surtax_threshold: dec!(-1),
            ..test_config()
        };

        let result = config.validate();

        assert_eq!(result, Err(TaxConfigError::InvalidSurtaxThreshold(dec!(-1))));
    }

    #[test]
    fn validate_does_not_require_monotone_rates() {
        // Rates may dip between brackets; only the bounds are ordered.
        let mut config = test_config();
        config.brackets[1].rate = dec!(0.05);

        let result = config.validate();

        assert_eq!(result, Ok(()));
    }
}
