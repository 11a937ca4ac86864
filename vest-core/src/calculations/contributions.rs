//! National-Insurance and health-tax contributions on incremental income.
//!
//! Both charges share the same two-tier monthly structure: a reduced rate
//! up to the low threshold, the full rate from there to the ceiling, and
//! nothing above the ceiling. For a monthly total `m` the charge is
//!
//! ```text
//! min(m, low) * low_rate
//!   + min(max(m - low, 0), ceiling - low) * high_rate
//! ```
//!
//! The annual baseline is flattened to `baseline / 12` and the entire
//! incremental amount is treated as landing in that one month; the charge
//! on the increment is the difference between the charge at
//! `baseline/12 + incremental` and the charge at `baseline/12`. This does
//! NOT track the true annual ceiling across twelve separate months; that
//! is a deliberate behavioral-compatibility choice (see DESIGN.md), and
//! near the annual ceiling would differ under month-by-month accrual.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use vest_core::{SocialContributions, TaxBracket, TaxYearConfig};
//!
//! let config = TaxYearConfig {
//!     tax_year: 2024,
//!     brackets: vec![TaxBracket { upper_bound: None, rate: dec!(0.10) }],
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
//! let contributions = SocialContributions::new(&config);
//! // Monthly baseline 30,000; a 10,000 increment stays under the ceiling,
//! // so it is charged entirely at the high-tier rates.
//! let result = contributions.on_incremental(dec!(360000), dec!(10000));
//!
//! assert_eq!(result.national_insurance, dec!(700.000));
//! assert_eq!(result.health_tax, dec!(500.000));
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::non_negative;
use crate::models::TaxYearConfig;

/// The two payroll-contribution components on one incremental slice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionsResult {
    pub national_insurance: Decimal,
    pub health_tax: Decimal,
}

/// NI/health calculator over one year's thresholds and rates.
#[derive(Debug, Clone)]
pub struct SocialContributions<'a> {
    config: &'a TaxYearConfig,
}

impl<'a> SocialContributions<'a> {
    pub fn new(config: &'a TaxYearConfig) -> Self {
        Self { config }
    }

    /// NI and health tax owed on `incremental` income landing in a single
    /// month alongside a flattened `baseline_annual / 12` monthly salary.
    ///
    /// Negative inputs are clamped to zero; zero increment charges
    /// nothing. A monthly baseline already at or above the ceiling means
    /// the increment is entirely exempt.
    pub fn on_incremental(
        &self,
        baseline_annual: Decimal,
        incremental: Decimal,
    ) -> ContributionsResult {
        if baseline_annual < Decimal::ZERO || incremental < Decimal::ZERO {
            warn!(
                %baseline_annual,
                %incremental,
                "negative contribution input clamped to zero"
            );
        }
        let monthly_baseline = non_negative(baseline_annual) / Decimal::from(12);
        let monthly_total = monthly_baseline + non_negative(incremental);

        let ni = self.monthly_charge(monthly_total, self.config.ni_low_rate, self.config.ni_high_rate)
            - self.monthly_charge(monthly_baseline, self.config.ni_low_rate, self.config.ni_high_rate);
        let health = self.monthly_charge(
            monthly_total,
            self.config.health_low_rate,
            self.config.health_high_rate,
        ) - self.monthly_charge(
            monthly_baseline,
            self.config.health_low_rate,
            self.config.health_high_rate,
        );

        ContributionsResult {
            national_insurance: ni,
            health_tax: health,
        }
    }

    /// The two-tier charge on a full monthly amount.
    fn monthly_charge(
        &self,
        monthly: Decimal,
        low_rate: Decimal,
        high_rate: Decimal,
    ) -> Decimal {
        let low = self.config.ni_monthly_low_threshold;
        let ceiling = self.config.ni_monthly_ceiling;

        let low_part = monthly.min(low) * low_rate;
        let high_part = non_negative(monthly - low).min(ceiling - low) * high_rate;

        low_part + high_part
    }
}
