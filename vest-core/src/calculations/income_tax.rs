//! Progressive income tax on an incremental slice of annual income.
//!
//! Equity income is taxed *on top of* the salary already earned in the
//! year, so the interesting quantity is never the total tax but the tax on
//! the increment: cumulative tax at `baseline + incremental` minus
//! cumulative tax at `baseline`. The cumulative walk visits brackets in
//! ascending order and clamps the taxable amount in each, which makes the
//! result continuous at every bracket boundary and zero at zero income.
//!
//! A second traversal, [`IncomeTaxSchedule::bracket_breakdown`], walks only
//! the `[baseline, baseline + incremental]` band and reports the tax per
//! touched bracket for display. Both traversals are unrounded and agree
//! exactly: the marginal tax equals the sum of the breakdown rows.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use vest_core::{IncomeTaxSchedule, TaxBracket};
//!
//! let brackets = vec![
//!     TaxBracket { upper_bound: Some(dec!(84120)), rate: dec!(0.10) },
//!     TaxBracket { upper_bound: Some(dec!(120720)), rate: dec!(0.14) },
//!     TaxBracket { upper_bound: None, rate: dec!(0.20) },
//! ];
//!
//! let schedule = IncomeTaxSchedule::new(&brackets);
//!
//! // A 1,000 increment on top of a baseline sitting exactly on the first
//! // boundary is taxed entirely at the second bracket's rate.
//! assert_eq!(schedule.marginal_tax(dec!(84120), dec!(1000)), dec!(140));
//!
//! // The same increment starting 500 below the boundary splits across
//! // both rates.
//! assert_eq!(
//!     schedule.marginal_tax(dec!(83620), dec!(1000)),
//!     dec!(50) + dec!(70)
//! );
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::calculations::common::non_negative;
use crate::models::TaxBracket;

/// One row of the display breakdown: how much of the increment fell into a
/// bracket and the tax it drew there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTax {
    pub rate: Decimal,
    pub taxable: Decimal,
    pub tax: Decimal,
}

/// Progressive-tax calculator over an ordered bracket table.
///
/// Brackets must be sorted ascending by `upper_bound` with the final
/// bracket unbounded ([`crate::TaxYearConfig::validate`] enforces this at
/// the configuration edge). The walk itself is total either way: income
/// beyond a bounded final bracket simply draws no further tax.
#[derive(Debug, Clone)]
pub struct IncomeTaxSchedule<'a> {
    brackets: &'a [TaxBracket],
}

impl<'a> IncomeTaxSchedule<'a> {
    pub fn new(brackets: &'a [TaxBracket]) -> Self {
        Self { brackets }
    }

    /// Tax owed on `incremental` income earned on top of an annual
    /// `baseline`.
    ///
    /// Negative inputs are clamped to zero. Zero increment means zero tax;
    /// a baseline already above the top bound puts the whole increment in
    /// the top bracket.
    pub fn marginal_tax(
        &self,
        baseline: Decimal,
        incremental: Decimal,
    ) -> Decimal {
        let baseline = self.clamped(baseline, "baseline income");
        let incremental = self.clamped(incremental, "incremental income");

        self.cumulative_tax(baseline + incremental) - self.cumulative_tax(baseline)
    }

    /// Total progressive tax on `income` from the first shekel.
    pub fn cumulative_tax(
        &self,
        income: Decimal,
    ) -> Decimal {
        let income = non_negative(income);
        let mut tax = Decimal::ZERO;
        let mut previous_upper = Decimal::ZERO;

        for bracket in self.brackets {
            if income <= previous_upper {
                break;
            }
            let upper = bracket.upper_bound.unwrap_or(income);
            let taxable = non_negative(income.min(upper) - previous_upper);
            tax += taxable * bracket.rate;
            previous_upper = upper;
        }

        tax
    }

    /// Per-bracket breakdown of the tax on `incremental` income.
    ///
    /// Walks only the `[baseline, baseline + incremental]` band; brackets
    /// the band does not touch are omitted. The `tax` fields sum exactly
    /// to [`marginal_tax`](Self::marginal_tax) for the same arguments.
    pub fn bracket_breakdown(
        &self,
        baseline: Decimal,
        incremental: Decimal,
    ) -> Vec<BracketTax> {
        let baseline = non_negative(baseline);
        let incremental = non_negative(incremental);
        let band_top = baseline + incremental;

        let mut rows = Vec::new();
        let mut previous_upper = Decimal::ZERO;

        for bracket in self.brackets {
            let upper = bracket.upper_bound.unwrap_or(band_top);
            let lo = previous_upper.max(baseline);
            let hi = upper.min(band_top);
            if hi > lo {
                let taxable = hi - lo;
                rows.push(BracketTax {
                    rate: bracket.rate,
                    taxable,
                    tax: taxable * bracket.rate,
                });
            }
            previous_upper = upper;
            if previous_upper >= band_top {
                break;
            }
        }

        rows
    }

    fn clamped(
        &self,
        value: Decimal,
        what: &'static str,
    ) -> Decimal {
        if value < Decimal::ZERO {
            warn!(%value, "negative {what} clamped to zero");
        }
        non_negative(value)
    }
}
