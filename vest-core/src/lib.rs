pub mod calculations;
pub mod models;

pub use calculations::{
    BracketTax, ContributionsResult, EsppNetCalculator, IncomeTaxSchedule, MaturationPolicy,
    RsuNetCalculator, SocialContributions, capital_gains_tax, surtax,
};
pub use models::*;
