use rust_decimal::Decimal;

use super::fx_errors::FxError;

/// Lookup contract the normalization core depends on. How the table was
/// populated (built-in constants, SQLite cache, CBR feed) is irrelevant here.
pub trait RateLookupTrait: Send + Sync {
    /// The currency every salary is converted into.
    fn base_currency(&self) -> &str;

    /// Units of base currency per one unit of `currency` during `month`
    /// (`YYYY-MM`). The base currency itself always converts at 1.
    /// A missing entry is an error, never a silent identity rate.
    fn rate_to_base(&self, month: &str, currency: &str) -> Result<Decimal, FxError>;
}
