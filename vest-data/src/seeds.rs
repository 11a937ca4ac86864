//! Shipped tax-year configurations.
//!
//! These are the published Israeli parameters, expressed as plain values
//! so callers (and tests) can start from a known-good year and override
//! what they need. Nothing here is read at runtime by the engine; a
//! configuration is always passed in explicitly.

use rust_decimal::Decimal;
use vest_core::{TaxBracket, TaxYearConfig};

fn bracket(upper_bound: Option<i64>, rate_bp: i64) -> TaxBracket {
    TaxBracket {
        upper_bound: upper_bound.map(Decimal::from),
        // Rates are seeded in basis points to keep this table readable.
        rate: Decimal::new(rate_bp, 4),
    }
}

/// The 2024 tax year: annual income brackets, monthly NI/health tiers,
/// 25% capital gains, 5% surtax above 721,560, 24-month holding period.
pub fn tax_year_2024() -> TaxYearConfig {
    TaxYearConfig {
        tax_year: 2024,
        brackets: vec![
            bracket(Some(84_120), 1000),
            bracket(Some(120_720), 1400),
            bracket(Some(193_800), 2000),
            bracket(Some(269_280), 3100),
            bracket(Some(560_280), 3500),
            bracket(Some(721_560), 4700),
            bracket(None, 5000),
        ],
        ni_monthly_low_threshold: Decimal::from(7_122),
        ni_monthly_ceiling: Decimal::from(49_030),
        ni_low_rate: Decimal::new(40, 4),
        ni_high_rate: Decimal::new(700, 4),
        health_low_rate: Decimal::new(310, 4),
        health_high_rate: Decimal::new(500, 4),
        capital_gains_rate: Decimal::new(2500, 4),
        surtax_rate: Decimal::new(500, 4),
        surtax_threshold: Decimal::from(721_560),
        maturation_months: 24,
    }
}

/// The 2023 tax year. Same structure as 2024 with that year's published
/// bracket bounds; kept so historical sales can be recalculated against
/// the rules they actually fell under.
pub fn tax_year_2023() -> TaxYearConfig {
    TaxYearConfig {
        tax_year: 2023,
        brackets: vec![
            bracket(Some(81_480), 1000),
            bracket(Some(116_760), 1400),
            bracket(Some(187_440), 2000),
            bracket(Some(260_520), 3100),
            bracket(Some(542_160), 3500),
            bracket(Some(698_280), 4700),
            bracket(None, 5000),
        ],
        ni_monthly_low_threshold: Decimal::from(7_122),
        ni_monthly_ceiling: Decimal::from(47_465),
        ni_low_rate: Decimal::new(40, 4),
        ni_high_rate: Decimal::new(700, 4),
        health_low_rate: Decimal::new(310, 4),
        health_high_rate: Decimal::new(500, 4),
        capital_gains_rate: Decimal::new(2500, 4),
        surtax_rate: Decimal::new(300, 4),
        surtax_threshold: Decimal::from(698_280),
        maturation_months: 24,
    }
}
