use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inputs for one RSU sale (or sale projection).
///
/// A transient value object built by the caller per calculation. Prices
/// are in the source currency; `exchange_rate` converts them to local
/// currency. `fees` and `baseline_annual_income` are already local.
/// Dates are `D/M/YY(YY)` strings; when either is absent the sale is
/// treated as unmatured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RsuSale {
    pub shares: Decimal,

    /// Price per share on the vest day, source currency.
    pub vest_price: Decimal,

    pub exchange_rate: Decimal,

    /// Broker/transfer fees, local currency, subtracted from net.
    pub fees: Decimal,

    /// Annual income already earned this year, local currency. The
    /// marginal slices are taxed on top of it.
    pub baseline_annual_income: Decimal,

    /// Sale price per share, source currency. Absent for a "hold" view.
    pub sell_price: Option<Decimal>,

    pub grant_date: Option<String>,
    pub sell_date: Option<String>,
}

/// Inputs for one ESPP sale (or sale projection).
///
/// `market_price` is the fair market price at purchase time and
/// `purchase_price` the discounted price actually paid; the spread is the
/// discount income. `contribution` is the total amount the employee paid
/// in, source currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EsppSale {
    pub shares: Decimal,
    pub market_price: Decimal,
    pub purchase_price: Decimal,
    pub contribution: Decimal,
    pub exchange_rate: Decimal,
    pub fees: Decimal,
    pub baseline_annual_income: Decimal,
    pub sell_price: Option<Decimal>,
    pub grant_date: Option<String>,
    pub sell_date: Option<String>,
}
