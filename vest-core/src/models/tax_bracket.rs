use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One slice of the progressive income-tax schedule. `upper_bound` is the
/// cumulative annual income where the bracket ends; `None` marks the
/// unbounded final bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}
