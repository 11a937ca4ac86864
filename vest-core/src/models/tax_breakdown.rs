use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-component tax result for one sale, all amounts local currency and
/// rounded to two decimal places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    /// The amount taxed as ordinary income: vest income for a matured RSU,
    /// discount income for an unmatured ESPP, the full proceeds for an
    /// unmatured RSU. Zero on the matured ESPP track.
    pub ordinary_income: Decimal,

    pub income_tax: Decimal,
    pub national_insurance: Decimal,
    pub health_tax: Decimal,
    pub capital_gains_tax: Decimal,
    pub surtax: Decimal,

    /// Sum of the five tax components.
    pub total_tax: Decimal,

    /// Proceeds (less cost, for ESPP) minus total tax minus fees.
    pub net: Decimal,
}

impl TaxBreakdown {
    /// An all-zero breakdown, used when the inputs degrade to a no-op
    /// (zero shares, missing price).
    pub(crate) fn zero() -> Self {
        Self {
            ordinary_income: Decimal::ZERO,
            income_tax: Decimal::ZERO,
            national_insurance: Decimal::ZERO,
            health_tax: Decimal::ZERO,
            capital_gains_tax: Decimal::ZERO,
            surtax: Decimal::ZERO,
            total_tax: Decimal::ZERO,
            net: Decimal::ZERO,
        }
    }
}

/// Result of an RSU/ESPP calculation, tagged by the tax track that was
/// selected. The two tracks are mutually exclusive: a sale either cleared
/// the statutory holding period (`Matured`, capital-gains treatment of
/// the appreciation) or it did not (`Unmatured`, ordinary-income
/// treatment throughout).
///
/// Callers presenting a "matured vs. unmatured" comparison run the same
/// inputs through both hypothetical dates and match on the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaxAssessment {
    Matured(TaxBreakdown),
    Unmatured(TaxBreakdown),
}

impl TaxAssessment {
    pub fn is_matured(&self) -> bool {
        matches!(self, Self::Matured(_))
    }

    pub fn breakdown(&self) -> &TaxBreakdown {
        match self {
            Self::Matured(b) | Self::Unmatured(b) => b,
        }
    }

    pub fn into_breakdown(self) -> TaxBreakdown {
        match self {
            Self::Matured(b) | Self::Unmatured(b) => b,
        }
    }
}
