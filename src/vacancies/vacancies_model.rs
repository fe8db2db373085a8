use chrono::{Datelike, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::MONTH_KEY_FORMAT;

/// One job posting as parsed from a CSV dump or the hh.ru API.
///
/// At least one of `salary_from`/`salary_to` must be present for the record
/// to participate in salary statistics; records with both absent are skipped
/// by the normalizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VacancyRecord {
    pub name: String,
    pub salary_from: Option<Decimal>,
    pub salary_to: Option<Decimal>,
    pub salary_currency: String,
    pub region: String,
    pub published: NaiveDateTime,
}

impl VacancyRecord {
    /// Year-month key used for rate lookups, `YYYY-MM`.
    pub fn published_year_month(&self) -> String {
        self.published.format(MONTH_KEY_FORMAT).to_string()
    }

    /// Publication year used for year-level grouping.
    pub fn published_year(&self) -> i32 {
        self.published.year()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn derives_month_key_and_year() {
        let record = VacancyRecord {
            name: "Программист".to_string(),
            salary_from: Some(dec!(10)),
            salary_to: Some(dec!(20)),
            salary_currency: "RUR".to_string(),
            region: "Москва".to_string(),
            published: NaiveDate::from_ymd_opt(2022, 7, 5)
                .unwrap()
                .and_hms_opt(18, 19, 30)
                .unwrap(),
        };
        assert_eq!(record.published_year_month(), "2022-07");
        assert_eq!(record.published_year(), 2022);
    }
}
