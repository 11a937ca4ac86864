//! Section-102 holding-period arithmetic.
//!
//! Equity granted under the capital-gains track must be held a statutory
//! number of calendar months from the *grant* date before the favorable
//! treatment applies. The comparison is boundary-inclusive: selling
//! exactly on the maturation date counts as matured.
//!
//! # Example
//!
//! ```
//! use vest_core::MaturationPolicy;
//!
//! let policy = MaturationPolicy::from_months(24);
//!
//! assert!(policy.is_matured("15/3/22", "15/3/24"));
//! assert!(!policy.is_matured("15/3/22", "14/3/24"));
//! // Unparseable dates degrade to "not matured".
//! assert!(!policy.is_matured("soon", "15/3/24"));
//! ```

use chrono::{Months, NaiveDate};
use tracing::warn;

use crate::models::{TaxYearConfig, parse_local_date};

/// Decides whether a sale happened after the statutory holding period.
#[derive(Debug, Clone, Copy)]
pub struct MaturationPolicy {
    months: u32,
}

impl MaturationPolicy {
    pub fn new(config: &TaxYearConfig) -> Self {
        Self {
            months: config.maturation_months,
        }
    }

    pub fn from_months(months: u32) -> Self {
        Self { months }
    }

    /// Whether a sale on `sell_date` clears the holding period counted
    /// from `grant_date`. Dates are `D/M/YY(YY)` strings; any date that
    /// fails to parse means `false`, never an error.
    pub fn is_matured(
        &self,
        grant_date: &str,
        sell_date: &str,
    ) -> bool {
        match (parse_local_date(grant_date), parse_local_date(sell_date)) {
            (Some(grant), Some(sell)) => self.is_matured_on(grant, sell),
            (grant, sell) => {
                warn!(
                    grant_ok = grant.is_some(),
                    sell_ok = sell.is_some(),
                    "unparseable date, treating sale as unmatured"
                );
                false
            }
        }
    }

    /// Typed variant of [`is_matured`](Self::is_matured) for callers that
    /// already hold calendar dates.
    pub fn is_matured_on(
        &self,
        grant: NaiveDate,
        sell: NaiveDate,
    ) -> bool {
        self.maturation_date(grant).is_some_and(|m| sell >= m)
    }

    /// Grant date plus the holding period, with the day-of-month clamped
    /// to the target month's length (31 Jan + 1 month = 28/29 Feb).
    pub fn maturation_date(
        &self,
        grant: NaiveDate,
    ) -> Option<NaiveDate> {
        grant.checked_add_months(Months::new(self.months))
    }

    /// Days left until maturation as of `as_of`, for "time remaining"
    /// displays. Zero once matured; `None` when either date is
    /// unparseable.
    pub fn days_until_matured(
        &self,
        grant_date: &str,
        as_of: &str,
    ) -> Option<i64> {
        let grant = parse_local_date(grant_date)?;
        let as_of = parse_local_date(as_of)?;
        let maturation = self.maturation_date(grant)?;

        Some(maturation.signed_duration_since(as_of).num_days().max(0))
    }
}
