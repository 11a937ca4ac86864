mod equity_sale;
mod local_date;
mod tax_bracket;
mod tax_breakdown;
mod tax_year_config;

pub use equity_sale::{EsppSale, RsuSale};
pub use local_date::parse_local_date;
pub use tax_bracket::TaxBracket;
pub use tax_breakdown::{TaxAssessment, TaxBreakdown};
pub use tax_year_config::{TaxConfigError, TaxYearConfig};
