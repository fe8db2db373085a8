use thiserror::Error;

#[derive(Error, Debug)]
pub enum FxError {
    #[error("no conversion rate for {currency} in {month}")]
    RateNotFound { month: String, currency: String },

    #[error("duplicate rate entry for {currency} in {month}")]
    DuplicateRate { month: String, currency: String },

    #[error("invalid currency code: {0}")]
    InvalidCurrencyCode(String),

    #[error("invalid rate for {currency} in {month}: {reason}")]
    InvalidRate {
        month: String,
        currency: String,
        reason: String,
    },
}
