//! Net proceeds of an RSU sale.
//!
//! Two mutually exclusive tracks, selected once per calculation:
//!
//! - **Matured** (Section-102 capital-gains track): the vest-day value is
//!   ordinary income (marginal income tax plus NI/health plus surtax),
//!   and only the appreciation between vest and sale is taxed as a
//!   capital gain.
//! - **Unmatured**: the entire sale proceeds are ordinary income. No
//!   capital-gains split exists before maturation, which is what makes a
//!   premature sale expensive.
//!
//! The sale is matured only when both the grant and sell dates are
//! supplied and the holding period is cleared; a missing date defaults to
//! the unmatured track. Net is always computed from the actual proceeds
//! (sale value, or vest value when no sale price is given), minus total
//! tax, minus fees.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use vest_core::{RsuNetCalculator, RsuSale, TaxBracket, TaxYearConfig};
//!
//! let config = TaxYearConfig {
//!     tax_year: 2024,
//!     brackets: vec![TaxBracket { upper_bound: None, rate: dec!(0.35) }],
//!     ni_monthly_low_threshold: dec!(7122),
//!     ni_monthly_ceiling: dec!(49030),
//!     ni_low_rate: dec!(0.004),
//!     ni_high_rate: dec!(0.07),
//!     health_low_rate: dec!(0.031),
//!     health_high_rate: dec!(0.05),
//!     capital_gains_rate: dec!(0.25),
//!     surtax_rate: dec!(0.05),
//!     surtax_threshold: dec!(721560),
//!     maturation_months: 24,
//! };
//!
//! let sale = RsuSale {
//!     shares: dec!(100),
//!     vest_price: dec!(50),
//!     exchange_rate: dec!(3.7),
//!     fees: dec!(0),
//!     baseline_annual_income: dec!(400000),
//!     sell_price: Some(dec!(60)),
//!     grant_date: Some("15/3/22".into()),
//!     sell_date: Some("20/6/24".into()),
//! };
//!
//! let assessment = RsuNetCalculator::new(&config).calculate(&sale);
//!
//! assert!(assessment.is_matured());
//! // (60 - 50) * 100 * 3.7 * 0.25
//! assert_eq!(assessment.breakdown().capital_gains_tax, dec!(925.00));
//! ```

use rust_decimal::Decimal;
use tracing::warn;

use crate::calculations::capital_gains::capital_gains_tax;
use crate::calculations::common::{non_negative, round_half_up};
use crate::calculations::contributions::SocialContributions;
use crate::calculations::income_tax::IncomeTaxSchedule;
use crate::calculations::maturation::MaturationPolicy;
use crate::calculations::surtax::surtax;
use crate::models::{RsuSale, TaxAssessment, TaxBreakdown, TaxYearConfig};

/// Calculator for RSU sale proceeds under one year's tax parameters.
#[derive(Debug, Clone)]
pub struct RsuNetCalculator<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> RsuNetCalculator<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// Computes the full tax breakdown and net proceeds for one sale.
    ///
    /// Total over its inputs: non-positive shares, vest price or exchange
    /// rate yield an all-zero breakdown; a missing or non-positive sell
    /// price means no sale leg (vest value stands in for proceeds, no
    /// capital gains); missing or unparseable dates select the unmatured
    /// track.
    pub fn calculate(
        &self,
        sale: &RsuSale,
    ) -> TaxAssessment {
        let matured = self.track_is_matured(sale);

        if sale.shares <= Decimal::ZERO
            || sale.vest_price <= Decimal::ZERO
            || sale.exchange_rate <= Decimal::ZERO
        {
            warn!(
                shares = %sale.shares,
                vest_price = %sale.vest_price,
                exchange_rate = %sale.exchange_rate,
                "degenerate RSU sale, returning zero breakdown"
            );
            return self.tag(matured, TaxBreakdown::zero());
        }

        let vest_income = sale.shares * sale.vest_price * sale.exchange_rate;
        let sell_price = self.effective_sell_price(sale);
        let proceeds = match sell_price {
            Some(price) => sale.shares * price * sale.exchange_rate,
            None => vest_income,
        };

        let breakdown = if matured {
            self.matured_breakdown(sale, vest_income, sell_price, proceeds)
        } else {
            self.unmatured_breakdown(sale, proceeds)
        };

        self.tag(matured, breakdown)
    }

    /// Section-102 track: ordinary charges on the vest income only,
    /// capital gains on the post-vest appreciation.
    fn matured_breakdown(
        &self,
        sale: &RsuSale,
        vest_income: Decimal,
        sell_price: Option<Decimal>,
        proceeds: Decimal,
    ) -> TaxBreakdown {
        let baseline = sale.baseline_annual_income;

        let income_tax =
            round_half_up(IncomeTaxSchedule::new(&self.config.brackets).marginal_tax(baseline, vest_income));
        let contributions = SocialContributions::new(self.config).on_incremental(baseline, vest_income);
        let national_insurance = round_half_up(contributions.national_insurance);
        let health_tax = round_half_up(contributions.health_tax);

        let gain = match sell_price {
            Some(price) => (price - sale.vest_price) * sale.shares * sale.exchange_rate,
            None => Decimal::ZERO,
        };
        let capital_gains = round_half_up(capital_gains_tax(gain, self.config.capital_gains_rate));

        let surtax_due = round_half_up(surtax(
            non_negative(baseline),
            vest_income,
            self.config.surtax_threshold,
            self.config.surtax_rate,
        ));

        self.assemble(
            vest_income,
            income_tax,
            national_insurance,
            health_tax,
            capital_gains,
            surtax_due,
            proceeds,
            sale.fees,
        )
    }

    /// Ordinary-income track: the whole proceeds are taxed as income, with
    /// no capital-gains leg. Surtax uses the same base as the ordinary
    /// charges.
    fn unmatured_breakdown(
        &self,
        sale: &RsuSale,
        proceeds: Decimal,
    ) -> TaxBreakdown {
        let baseline = sale.baseline_annual_income;

        let income_tax =
            round_half_up(IncomeTaxSchedule::new(&self.config.brackets).marginal_tax(baseline, proceeds));
        let contributions = SocialContributions::new(self.config).on_incremental(baseline, proceeds);
        let national_insurance = round_half_up(contributions.national_insurance);
        let health_tax = round_half_up(contributions.health_tax);

        let surtax_due = round_half_up(surtax(
            non_negative(baseline),
            proceeds,
            self.config.surtax_threshold,
            self.config.surtax_rate,
        ));

        self.assemble(
            proceeds,
            income_tax,
            national_insurance,
            health_tax,
            Decimal::ZERO,
            surtax_due,
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
        proceeds: Decimal,
        fees: Decimal,
    ) -> TaxBreakdown {
        let total_tax = income_tax + national_insurance + health_tax + capital_gains + surtax_due;
        let net = round_half_up(proceeds) - total_tax - round_half_up(non_negative(fees));

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
        sale: &RsuSale,
    ) -> bool {
        match (&sale.grant_date, &sale.sell_date) {
            (Some(grant), Some(sell)) => MaturationPolicy::new(self.config).is_matured(grant, sell),
            _ => false,
        }
    }

    fn effective_sell_price(
        &self,
        sale: &RsuSale,
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
