//! Net proceeds of an ESPP sale.
//!
//! The Section-102 equivalent of vest income is the *discount income*:
//! the spread between the fair market price at purchase and the
//! discounted price actually paid, converted to local currency. The cost
//! basis is the employee's contribution.
//!
//! - **Matured**: the entire `proceeds - cost` difference is a capital
//!   gain; no ordinary charges and no surtax apply on this track. (The
//!   RSU matured track *does* levy surtax on its vest income. The
//!   asymmetry is deliberate product behavior, kept as-is; see
//!   DESIGN.md.)
//! - **Unmatured**: the discount income is ordinary income (income tax,
//!   NI, health, surtax), and appreciation beyond the market price is
//!   still a capital gain when a higher sell price is given.
//!
//! Net is proceeds minus cost minus total tax minus fees on both tracks.

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::capital_gains::capital_gains_tax;
use crate::calculations::common::{non_negative, round_half_up};
use crate::calculations::contributions::SocialContributions;
use crate::calculations::income_tax::IncomeTaxSchedule;
use crate::calculations::maturation::MaturationPolicy;
use crate::calculations::surtax::surtax;
use crate::models::{EsppSale, TaxAssessment, TaxBreakdown, TaxYearConfig};

/// Calculator for ESPP sale proceeds under one year's tax parameters.
#[derive(Debug, Clone)]
pub struct EsppNetCalculator<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> EsppNetCalculator<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Computes the full tax breakdown and net proceeds for one sale.
    ///
    /// Total over its inputs, like the RSU calculator: non-positive
    /// shares, market price or exchange rate yield an all-zero breakdown;
    /// a purchase price above the market price clamps the discount income
    /// to zero; missing dates select the unmatured track.
    pub fn calculate(
        &self,
        sale: &EsppSale,
    ) -> TaxAssessment {
        let matured = self.track_is_matured(sale);

        if sale.shares <= Decimal::ZERO
            || sale.market_price <= Decimal::ZERO
            || sale.exchange_rate <= Decimal::ZERO
        {
            warn!(
                shares = %sale.shares,
                market_price = %sale.market_price,
                exchange_rate = %sale.exchange_rate,
                "degenerate ESPP sale, returning zero breakdown"
            );
            return self.tag(matured, TaxBreakdown::zero());
        }

        let discount = sale.market_price - sale.purchase_price;
        if discount < Decimal::ZERO {
            warn!(
                market_price = %sale.market_price,
                purchase_price = %sale.purchase_price,
                "purchase price above market price, discount income clamped to zero"
            );
        }
        let discount_income = non_negative(discount) * sale.shares * sale.exchange_rate;
        let cost = non_negative(sale.contribution) * sale.exchange_rate;

        let sell_price = self.effective_sell_price(sale);
        let proceeds = match sell_price {
            Some(price) => sale.shares * price * sale.exchange_rate,
            None => sale.shares * sale.market_price * sale.exchange_rate,
        };

        let breakdown = if matured {
            self.matured_breakdown(sale, cost, proceeds)
        } else {
            self.unmatured_breakdown(sale, discount_income, sell_price, cost, proceeds)
        };

        self.tag(matured, breakdown)
    }

    /// Capital-gains-only track: tax on `proceeds - cost`, nothing else.
    fn matured_breakdown(
        &self,
        sale: &EsppSale,
        cost: Decimal,
        proceeds: Decimal,
    ) -> TaxBreakdown {
        let capital_gains =
            round_half_up(capital_gains_tax(proceeds - cost, self.config.capital_gains_rate));

        self.assemble(
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            Decimal::ZERO,
            capital_gains,
            Decimal::ZERO,
            cost,
            proceeds,
            sale.fees,
        )
    }

    /// Ordinary track on the discount income, plus capital gains on any
    /// appreciation beyond the market price.
    fn unmatured_breakdown(
        &self,
        sale: &EsppSale,
        discount_income: Decimal,
        sell_price: Option<Decimal>,
        cost: Decimal,
        proceeds: Decimal,
    ) -> TaxBreakdown {
        let baseline = sale.baseline_annual_income;

        let income_tax = round_half_up(
            IncomeTaxSchedule::new(&self.config.brackets).marginal_tax(baseline, discount_income),
        );
        let contributions =
            SocialContributions::new(self.config).on_incremental(baseline, discount_income);
        let national_insurance = round_half_up(contributions.national_insurance);
        let health_tax = round_half_up(contributions.health_tax);

        let gain = match sell_price {
            Some(price) => (price - sale.market_price) * sale.shares * sale.exchange_rate,
            None => Decimal::ZERO,
        };
        let capital_gains = round_half_up(capital_gains_tax(gain, self.config.capital_gains_rate));

        let surtax_due = round_half_up(surtax(
            non_negative(baseline),
            discount_income,
            self.config.surtax_threshold,
            self.config.surtax_rate,
        ));

        self.assemble(
            discount_income,
            income_tax,
            national_insurance,
            health_tax,
            capital_gains,
            surtax_due,
            cost,
            proceeds,
            sale.fees,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn assemble(
        &self,
        ordinary_income: Decimal,
        income_tax: Decimal,
        national_insurance: Decimal,
        health_tax: Decimal,
        capital_gains: Decimal,
        surtax_due: Decimal,
        cost: Decimal,
        proceeds: Decimal,
        fees: Decimal,
    ) -> TaxBreakdown {
        let total_tax = income_tax + national_insurance + health_tax + capital_gains + surtax_due;
        let net = round_half_up(proceeds)
            - round_half_up(cost)
            - total_tax
            - round_half_up(non_negative(fees));

        TaxBreakdown {
            ordinary_income: round_half_up(ordinary_income),
            income_tax,
            national_insurance,
            health_tax,
            capital_gains_tax: capital_gains,
            surtax: surtax_due,
            total_tax,
            net,
        }
    }

    fn track_is_matured(
        &self,
        sale: &EsppSale,
    ) -> bool {
        match (&sale.grant_date, &sale.sell_date) {
            (Some(grant), Some(sell)) => MaturationPolicy::new(self.config).is_matured(grant, sell),
            _ => false,
        }
    }

    fn effective_sell_price(
        &self,
        sale: &EsppSale,
    ) -> Option<Decimal> {
        match sale.sell_price {
            Some(price) if price > Decimal::ZERO => Some(price),
            Some(price) => {
                warn!(%price, "non-positive sell price ignored");
                None
            }
            None => None,
        }
    }

    fn tag(
        &self,
        matured: bool,
        breakdown: TaxBreakdown,
    ) -> TaxAssessment {
        if matured {
            TaxAssessment::Matured(breakdown)
        } else {
            TaxAssessment::Unmatured(breakdown)
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use crate::models::TaxBracket;

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
                    upper_bound: Some(dec!(193800)),
                    rate: dec!(0.20),
                },
                TaxBracket {
                    upper_bound: Some(dec!(269280)),
                    rate: dec!(0.31),
                },
                TaxBracket {
                    upper_bound: Some(dec!(560280)),
                    rate: dec!(0.35),
                },
                TaxBracket {
                    upper_bound: Some(dec!(721560)),
                    rate: dec!(0.47),
                },
                TaxBracket {
                    upper_bound: None,
                    rate: dec!(0.50),
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

    /// 100 shares bought at $25.50 against a $30 market price (a 15%
    /// discount), $2,550 contributed, sold at $40, rate 3.7, 360k salary.
    fn test_sale() -> EsppSale {
        EsppSale {
            shares: dec!(100),
            market_price: dec!(30),
            purchase_price: dec!(25.50),
            contribution: dec!(2550),
            exchange_rate: dec!(3.7),
            fees: dec!(0),
            baseline_annual_income: dec!(360000),
            sell_price: Some(dec!(40)),
            grant_date: Some("15/3/22".to_string()),
            sell_date: Some("20/6/24".to_string()),
        }
    }

    // =========================================================================
    // matured track tests
    // =========================================================================

    #[test]
    fn matured_sale_taxes_only_the_gain_over_cost() {
        let config = test_config();
        let calculator = EsppNetCalculator::new(&config);

        let assessment = calculator.calculate(&test_sale());
        assert!(assessment.is_matured());
        let breakdown = assessment.into_breakdown();

        // Proceeds 14,800, cost 9,435: gain 5,365 at 25%.
        assert_eq!(breakdown.capital_gains_tax, dec!(1341.25));
        assert_eq!(breakdown.income_tax, dec!(0));
        assert_eq!(breakdown.national_insurance, dec!(0));
        assert_eq!(breakdown.health_tax, dec!(0));
        // No surtax on the matured ESPP track.
        assert_eq!(breakdown.surtax, dec!(0));
        assert_eq!(breakdown.ordinary_income, dec!(0));
        assert_eq!(breakdown.total_tax, dec!(1341.25));
        // 14,800 - 9,435 - 1,341.25
        assert_eq!(breakdown.net, dec!(4023.75));
    }

    #[test]
    fn matured_sale_below_cost_is_a_plain_loss() {
        let config = test_config();
        let calculator = EsppNetCalculator::new(&config);
        let sale = EsppSale {
            sell_price: Some(dec!(20)),
            ..test_sale()
        };

        let breakdown = calculator.calculate(&sale).into_breakdown();

        assert_eq!(breakdown.capital_gains_tax, dec!(0));
        assert_eq!(breakdown.total_tax, dec!(0));
        // 7,400 - 9,435: the loss passes through untaxed and unrebated.
        assert_eq!(breakdown.net, dec!(-2035.00));
    }

    #[test]
    fn matured_sale_ignores_baseline_income() {
        let config = test_config();
        let calculator = EsppNetCalculator::new(&config);
        let low = EsppSale {
            baseline_annual_income: dec!(0),
            ..test_sale()
        };
        let high = EsppSale {
            baseline_annual_income: dec!(900000),
            ..test_sale()
        };

        // Capital gains are flat; the matured track levies nothing
        // progressive, so the baseline cannot matter.
        assert_eq!(
            calculator.calculate(&low).into_breakdown(),
            calculator.calculate(&high).into_breakdown()
        );
    }

    // =========================================================================
    // unmatured track tests
    // =========================================================================

    #[test]
    fn unmatured_sale_full_breakdown() {
        let config = test_config();
        let calculator = EsppNetCalculator::new(&config);
        let sale = EsppSale {
            grant_date: Some("15/3/23".to_string()),
            ..test_sale()
        };

        let assessment = calculator.calculate(&sale);
        assert!(!assessment.is_matured());
        let breakdown = assessment.into_breakdown();

        // Discount income (30 - 25.50) * 100 * 3.7 = 1,665 at 35%.
        assert_eq!(breakdown.ordinary_income, dec!(1665.00));
        assert_eq!(breakdown.income_tax, dec!(582.75));
        // Monthly baseline 30,000 + 1,665 stays under the NI ceiling.
        assert_eq!(breakdown.national_insurance, dec!(116.55));
        assert_eq!(breakdown.health_tax, dec!(83.25));
        // Appreciation beyond market: (40 - 30) * 100 * 3.7 at 25%.
        assert_eq!(breakdown.capital_gains_tax, dec!(925.00));
        assert_eq!(breakdown.surtax, dec!(0.00));
        assert_eq!(breakdown.total_tax, dec!(1707.55));
        // 14,800 - 9,435 - 1,707.55
        assert_eq!(breakdown.net, dec!(3657.45));
    }

    #[test]
    fn unmatured_hold_without_sell_price_taxes_discount_only() {
        let config = test_config();
        let calculator = EsppNetCalculator::new(&config);
        let sale = EsppSale {
            sell_price: None,
            grant_date: None,
            sell_date: None,
            ..test_sale()
        };

        let breakdown = calculator.calculate(&sale).into_breakdown();

        assert_eq!(breakdown.income_tax, dec!(582.75));
        assert_eq!(breakdown.capital_gains_tax, dec!(0));
        assert_eq!(breakdown.total_tax, dec!(782.55));
        // Proceeds fall back to market value 11,100; cost 9,435.
        assert_eq!(breakdown.net, dec!(882.45));
    }

    #[test]
    fn unmatured_sale_below_market_has_no_capital_gains_tax() {
        let config = test_config();
        let calculator = EsppNetCalculator::new(&config);
        let sale = EsppSale {
            sell_price: Some(dec!(28)),
            grant_date: None,
            ..test_sale()
        };

        let breakdown = calculator.calculate(&sale).into_breakdown();

        assert_eq!(breakdown.capital_gains_tax, dec!(0));
        // Ordinary charges on the discount income still apply.
        assert_eq!(breakdown.income_tax, dec!(582.75));
    }

    #[test]
    fn unmatured_sale_applies_surtax_on_discount_income() {
        let config = test_config();
        let calculator = EsppNetCalculator::new(&config);
        let sale = EsppSale {
            shares: dec!(100),
            market_price: dec!(40),
            purchase_price: dec!(30),
            contribution: dec!(3000),
            exchange_rate: dec!(1),
            baseline_annual_income: dec!(721560),
            sell_price: None,
            grant_date: None,
            sell_date: None,
            ..test_sale()
        };

        let breakdown = calculator.calculate(&sale).into_breakdown();

        // Discount income 1,000 entirely above the threshold.
        assert_eq!(breakdown.surtax, dec!(50.00));
        assert_eq!(breakdown.income_tax, dec!(500.00));
        assert_eq!(breakdown.national_insurance, dec!(0));
        assert_eq!(breakdown.health_tax, dec!(0));
        // Proceeds 4,000 - cost 3,000 - tax 550.
        assert_eq!(breakdown.net, dec!(450.00));
    }

    // =========================================================================
    // degenerate input tests
    // =========================================================================

    #[test]
    fn zero_shares_yield_zero_breakdown() {
        let config = test_config();
        let calculator = EsppNetCalculator::new(&config);
        let sale = EsppSale {
            shares: dec!(0),
            ..test_sale()
        };

        let breakdown = calculator.calculate(&sale).into_breakdown();

        assert_eq!(breakdown, TaxBreakdown::zero());
        assert_eq!(breakdown.net, dec!(0));
    }

    #[test]
    fn purchase_above_market_clamps_discount_income() {
        let config = test_config();
        let calculator = EsppNetCalculator::new(&config);
        let sale = EsppSale {
            market_price: dec!(30),
            purchase_price: dec!(35),
            grant_date: None,
            ..test_sale()
        };

        let breakdown = calculator.calculate(&sale).into_breakdown();

        assert_eq!(breakdown.ordinary_income, dec!(0));
        assert_eq!(breakdown.income_tax, dec!(0));
        // The sale leg is still taxed on appreciation beyond market.
        assert_eq!(breakdown.capital_gains_tax, dec!(925.00));
    }

    #[test]
    fn missing_dates_default_to_unmatured() {
        let config = test_config();
        let calculator = EsppNetCalculator::new(&config);
        let sale = EsppSale {
            grant_date: None,
            sell_date: None,
            ..test_sale()
        };

        let assessment = calculator.calculate(&sale);

        assert!(!assessment.is_matured());
    }
}
