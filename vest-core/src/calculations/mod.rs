//! Tax calculation modules for equity-compensation sales.
//!
//! The leaf modules each implement one tax mechanism (progressive income
//! tax, NI/health contributions, capital gains, surtax, the Section-102
//! holding rule); `calculators` composes them into the RSU and ESPP
//! orchestrators.

pub mod calculators;
pub mod capital_gains;
pub mod common;
pub mod contributions;
pub mod income_tax;
pub mod maturation;
pub mod surtax;

pub use calculators::{EsppNetCalculator, RsuNetCalculator};
pub use capital_gains::capital_gains_tax;
pub use contributions::{ContributionsResult, SocialContributions};
pub use income_tax::{BracketTax, IncomeTaxSchedule};
pub use maturation::MaturationPolicy;
pub use surtax::surtax;
