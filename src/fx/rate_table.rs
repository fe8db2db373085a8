use std::collections::HashMap;

use lazy_static::lazy_static;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::fx_errors::FxError;
use super::fx_model::MonthlyRate;
use super::fx_traits::RateLookupTrait;
use crate::constants::BASE_CURRENCY;

lazy_static! {
    /// Fixed conversion constants to rubles, used when no monthly feed is
    /// available. Same table the hh.ru exports were historically processed
    /// with.
    static ref FIXED_RATES_TO_RUB: HashMap<&'static str, Decimal> = {
        let mut m = HashMap::new();
        m.insert("AZN", dec!(35.68));
        m.insert("BYR", dec!(23.91));
        m.insert("EUR", dec!(59.90));
        m.insert("GEL", dec!(21.74));
        m.insert("KGS", dec!(0.76));
        m.insert("KZT", dec!(0.13));
        m.insert("RUR", Decimal::ONE);
        m.insert("UAH", dec!(1.64));
        m.insert("USD", dec!(60.66));
        m.insert("UZS", dec!(0.0055));
        m
    };
}

fn validate_currency_code(code: &str) -> Result<(), FxError> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FxError::InvalidCurrencyCode(code.to_string()));
    }
    Ok(())
}

/// Month-keyed conversion table built once from a batch of `MonthlyRate`
/// entries.
#[derive(Debug)]
pub struct RateTable {
    base_currency: String,
    // (month, currency) -> rate
    rates: HashMap<(String, String), Decimal>,
}

impl RateTable {
    /// Builds the table, rejecting duplicate (month, currency) entries and
    /// non-positive rates.
    pub fn new(
        base_currency: impl Into<String>,
        entries: Vec<MonthlyRate>,
    ) -> Result<Self, FxError> {
        let base_currency = base_currency.into();
        let mut rates = HashMap::with_capacity(entries.len());
        for entry in entries {
            validate_currency_code(&entry.currency)?;
            if entry.rate.is_zero() || entry.rate.is_sign_negative() {
                return Err(FxError::InvalidRate {
                    month: entry.month,
                    currency: entry.currency,
                    reason: format!("non-positive rate {}", entry.rate),
                });
            }
            let key = (entry.month.clone(), entry.currency.clone());
            if rates.insert(key, entry.rate).is_some() {
                return Err(FxError::DuplicateRate {
                    month: entry.month,
                    currency: entry.currency,
                });
            }
        }
        Ok(Self {
            base_currency,
            rates,
        })
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl RateLookupTrait for RateTable {
    fn base_currency(&self) -> &str {
        &self.base_currency
    }

    fn rate_to_base(&self, month: &str, currency: &str) -> Result<Decimal, FxError> {
        if currency == self.base_currency {
            return Ok(Decimal::ONE);
        }
        validate_currency_code(currency)?;
        self.rates
            .get(&(month.to_string(), currency.to_string()))
            .copied()
            .ok_or_else(|| FxError::RateNotFound {
                month: month.to_string(),
                currency: currency.to_string(),
            })
    }
}

/// Month-independent table of fixed conversion constants.
pub struct FixedRateTable {
    base_currency: String,
    rates: HashMap<String, Decimal>,
}

impl FixedRateTable {
    /// The built-in ruble table.
    pub fn builtin() -> Self {
        Self {
            base_currency: BASE_CURRENCY.to_string(),
            rates: FIXED_RATES_TO_RUB
                .iter()
                .map(|(code, rate)| (code.to_string(), *rate))
                .collect(),
        }
    }
}

impl RateLookupTrait for FixedRateTable {
    fn base_currency(&self) -> &str {
        &self.base_currency
    }

    fn rate_to_base(&self, month: &str, currency: &str) -> Result<Decimal, FxError> {
        if currency == self.base_currency {
            return Ok(Decimal::ONE);
        }
        validate_currency_code(currency)?;
        self.rates
            .get(currency)
            .copied()
            .ok_or_else(|| FxError::RateNotFound {
                month: month.to_string(),
                currency: currency.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rates() -> Vec<MonthlyRate> {
        vec![
            MonthlyRate::new("2022-01", "USD", dec!(75.5)),
            MonthlyRate::new("2022-01", "EUR", dec!(85.2)),
            MonthlyRate::new("2022-02", "USD", dec!(77.1)),
        ]
    }

    #[test]
    fn looks_up_rate_for_month() {
        let table = RateTable::new("RUR", sample_rates()).unwrap();
        assert_eq!(table.rate_to_base("2022-01", "USD").unwrap(), dec!(75.5));
        assert_eq!(table.rate_to_base("2022-02", "USD").unwrap(), dec!(77.1));
    }

    #[test]
    fn base_currency_is_identity() {
        let table = RateTable::new("RUR", Vec::new()).unwrap();
        assert_eq!(table.rate_to_base("2022-01", "RUR").unwrap(), Decimal::ONE);
    }

    #[test]
    fn missing_entry_is_an_error() {
        let table = RateTable::new("RUR", sample_rates()).unwrap();
        let err = table.rate_to_base("2022-03", "USD").unwrap_err();
        assert!(matches!(
            err,
            FxError::RateNotFound { ref month, ref currency }
                if month == "2022-03" && currency == "USD"
        ));
    }

    #[test]
    fn duplicate_entry_rejected() {
        let mut rates = sample_rates();
        rates.push(MonthlyRate::new("2022-01", "USD", dec!(76.0)));
        let err = RateTable::new("RUR", rates).unwrap_err();
        assert!(matches!(err, FxError::DuplicateRate { .. }));
    }

    #[test]
    fn zero_rate_rejected() {
        let rates = vec![MonthlyRate::new("2022-01", "USD", Decimal::ZERO)];
        let err = RateTable::new("RUR", rates).unwrap_err();
        assert!(matches!(err, FxError::InvalidRate { .. }));
    }

    #[test]
    fn invalid_currency_code_rejected() {
        let table = RateTable::new("RUR", sample_rates()).unwrap();
        let err = table.rate_to_base("2022-01", "US$").unwrap_err();
        assert!(matches!(err, FxError::InvalidCurrencyCode(_)));
    }

    #[test]
    fn builtin_table_covers_known_currencies() {
        let table = FixedRateTable::builtin();
        assert_eq!(table.rate_to_base("2022-01", "USD").unwrap(), dec!(60.66));
        assert_eq!(table.rate_to_base("2003-12", "UZS").unwrap(), dec!(0.0055));
        assert!(table.rate_to_base("2022-01", "XYZ").is_err());
    }
}
