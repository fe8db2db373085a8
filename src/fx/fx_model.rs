use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One (month, currency) rate entry: units of base currency per 1 unit of
/// `currency` during `month`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRate {
    /// Year-month key, `YYYY-MM`.
    pub month: String,
    /// ISO-like currency code, e.g. `USD`, `RUR`.
    pub currency: String,
    pub rate: Decimal,
}

impl MonthlyRate {
    pub fn new(month: impl Into<String>, currency: impl Into<String>, rate: Decimal) -> Self {
        Self {
            month: month.into(),
            currency: currency.into(),
            rate,
        }
    }
}
