//! Net-proceeds orchestrators, one per instrument type.
//!
//! Each selects a tax track (matured vs. unmatured) once, composes the
//! leaf calculators accordingly, and returns a tagged
//! [`crate::TaxAssessment`].

pub mod espp;
pub mod rsu;

pub use espp::EsppNetCalculator;
pub use rsu::RsuNetCalculator;
