//! Bank of Russia daily-rates feed. One request per month, pinned to the 13th,
//! parsed out of the `XML_daily_eng.asp` payload.

use async_trait::async_trait;
use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use rust_decimal::Decimal;

use super::providers_errors::FeedError;
use super::providers_traits::RateFeedTrait;
use crate::fx::MonthlyRate;

const CBR_DAILY_URL: &str = "https://www.cbr.ru/scripts/XML_daily_eng.asp";

lazy_static! {
    static ref VALUTE_RE: Regex = Regex::new(
        r"(?s)<CharCode>([A-Z]{3})</CharCode>\s*<Nominal>(\d+)</Nominal>\s*<Name>[^<]*</Name>\s*<Value>([0-9.,]+)</Value>"
    )
    .unwrap();
}

pub struct CbrRateProvider {
    client: reqwest::Client,
}

impl CbrRateProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Request URL for one month; rates are sampled on the 13th.
    pub fn month_url(month: &str) -> Result<String, FeedError> {
        let (year, month_no) = split_month_key(month)?;
        Ok(format!(
            "{}?date_req=13/{:02}/{}",
            CBR_DAILY_URL, month_no, year
        ))
    }

    /// Extracts per-unit rates from the daily XML, keeping only the requested
    /// currency codes. `Value` uses a comma decimal separator and is quoted
    /// per `Nominal` units.
    pub fn parse_daily_xml(
        month: &str,
        xml: &str,
        currencies: &[String],
    ) -> Result<Vec<MonthlyRate>, FeedError> {
        let mut rates = Vec::new();
        for captures in VALUTE_RE.captures_iter(xml) {
            let code = &captures[1];
            if !currencies.iter().any(|c| c == code) {
                continue;
            }
            let nominal: Decimal = captures[2]
                .parse()
                .map_err(|_| FeedError::UnexpectedPayload(format!("bad nominal for {code}")))?;
            let value: Decimal = captures[3]
                .replace(',', ".")
                .parse()
                .map_err(|_| FeedError::UnexpectedPayload(format!("bad value for {code}")))?;
            if nominal.is_zero() {
                return Err(FeedError::UnexpectedPayload(format!(
                    "zero nominal for {code}"
                )));
            }
            rates.push(MonthlyRate::new(month, code, value / nominal));
        }
        if rates.is_empty() {
            return Err(FeedError::UnexpectedPayload(format!(
                "no requested currencies in payload for {month}"
            )));
        }
        Ok(rates)
    }

    /// Fetches rates for every month of the inclusive `from..=to` range.
    pub async fn fetch_range(
        &self,
        from: &str,
        to: &str,
        currencies: &[String],
    ) -> Result<Vec<MonthlyRate>, FeedError> {
        let mut rates = Vec::new();
        for month in month_range(from, to)? {
            rates.extend(self.fetch_month(&month, currencies).await?);
        }
        Ok(rates)
    }
}

impl Default for CbrRateProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RateFeedTrait for CbrRateProvider {
    async fn fetch_month(
        &self,
        month: &str,
        currencies: &[String],
    ) -> Result<Vec<MonthlyRate>, FeedError> {
        let url = Self::month_url(month)?;
        debug!("Fetching CBR rates for {} from {}", month, url);
        let body = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| FeedError::Http {
                url: url.clone(),
                source,
            })?
            .text()
            .await
            .map_err(|source| FeedError::Http {
                url: url.clone(),
                source,
            })?;
        Self::parse_daily_xml(month, &body, currencies)
    }
}

fn split_month_key(month: &str) -> Result<(i32, u32), FeedError> {
    let invalid = || FeedError::InvalidMonthKey(month.to_string());
    let (year, month_no) = month.split_once('-').ok_or_else(invalid)?;
    if year.len() != 4 || month_no.len() != 2 {
        return Err(invalid());
    }
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month_no: u32 = month_no.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month_no) {
        return Err(invalid());
    }
    Ok((year, month_no))
}

/// All `YYYY-MM` keys between `from` and `to`, inclusive.
pub fn month_range(from: &str, to: &str) -> Result<Vec<String>, FeedError> {
    let (from_year, from_month) = split_month_key(from)?;
    let (to_year, to_month) = split_month_key(to)?;
    if (from_year, from_month) > (to_year, to_month) {
        return Err(FeedError::InvalidMonthRange {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    let mut months = Vec::new();
    let (mut year, mut month) = (from_year, from_month);
    loop {
        months.push(format!("{year}-{month:02}"));
        if (year, month) == (to_year, to_month) {
            break;
        }
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    Ok(months)
}
