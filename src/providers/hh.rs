//! hh.ru vacancy feed. A day is covered by six 4-hour windows, each paged up
//! to the API's page cap, and every item maps to one raw vacancy record.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use log::debug;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::providers_errors::FeedError;
use super::providers_traits::VacancyFeedTrait;
use crate::constants::{BASE_CURRENCY, PUBLISHED_AT_FORMAT};
use crate::vacancies::VacancyRecord;

const HH_VACANCIES_URL: &str = "https://api.hh.ru/vacancies";
const SPECIALIZATION_IT: u32 = 1;
const PER_PAGE: u32 = 100;
const MAX_PAGES: u32 = 18;

/// Window bounds covering a full day.
const TIME_SEGMENTS: [(&str, &str); 6] = [
    ("00:00", "04:00"),
    ("04:00", "08:00"),
    ("08:00", "12:00"),
    ("12:00", "16:00"),
    ("16:00", "20:00"),
    ("20:00", "23:59"),
];

#[derive(Deserialize, Debug)]
struct HhPage {
    #[serde(default)]
    items: Vec<HhVacancy>,
}

#[derive(Deserialize, Debug)]
struct HhVacancy {
    name: String,
    salary: Option<HhSalary>,
    area: HhArea,
    published_at: String,
}

#[derive(Deserialize, Debug)]
struct HhSalary {
    from: Option<Decimal>,
    to: Option<Decimal>,
    currency: Option<String>,
}

#[derive(Deserialize, Debug)]
struct HhArea {
    name: String,
}

pub struct HhVacancyProvider {
    client: reqwest::Client,
}

impl HhVacancyProvider {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// All request URLs for one day: one page sequence per time window.
    pub fn day_requests(date: NaiveDate) -> Vec<Vec<String>> {
        TIME_SEGMENTS
            .iter()
            .map(|(from, to)| {
                (1..=MAX_PAGES)
                    .map(|page| {
                        format!(
                            "{HH_VACANCIES_URL}?specialization={SPECIALIZATION_IT}\
                             &date_from={date}T{from}&date_to={date}T{to}\
                             &per_page={PER_PAGE}&page={page}"
                        )
                    })
                    .collect()
            })
            .collect()
    }

    async fn fetch_page(&self, url: &str) -> Result<Vec<VacancyRecord>, FeedError> {
        let page: HhPage = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FeedError::Http {
                url: url.to_string(),
                source,
            })?
            .json()
            .await
            .map_err(|source| FeedError::Http {
                url: url.to_string(),
                source,
            })?;
        page.items.into_iter().map(map_item).collect()
    }
}

impl Default for HhVacancyProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VacancyFeedTrait for HhVacancyProvider {
    async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<VacancyRecord>, FeedError> {
        let mut records = Vec::new();
        for segment in Self::day_requests(date) {
            for url in segment {
                let page = self.fetch_page(&url).await?;
                if page.is_empty() {
                    // The window is exhausted; further pages return nothing.
                    break;
                }
                records.extend(page);
            }
        }
        debug!("Fetched {} vacancies for {}", records.len(), date);
        Ok(records)
    }
}

/// Items without a salary block are kept with both bounds absent; the
/// normalizer excludes them later.
fn map_item(item: HhVacancy) -> Result<VacancyRecord, FeedError> {
    let published = DateTime::parse_from_str(&item.published_at, PUBLISHED_AT_FORMAT)
        .map(|dt| dt.naive_local())
        .map_err(|_| {
            FeedError::UnexpectedPayload(format!("bad published_at: {}", item.published_at))
        })?;

    let (salary_from, salary_to, salary_currency) = match item.salary {
        Some(salary) => (
            salary.from,
            salary.to,
            salary.currency.unwrap_or_else(|| BASE_CURRENCY.to_string()),
        ),
        None => (None, None, BASE_CURRENCY.to_string()),
    };

    Ok(VacancyRecord {
        name: item.name,
        salary_from,
        salary_to,
        salary_currency,
        region: item.area.name,
        published,
    })
}
