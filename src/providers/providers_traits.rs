use async_trait::async_trait;
use chrono::NaiveDate;

use super::providers_errors::FeedError;
use crate::fx::MonthlyRate;
use crate::vacancies::VacancyRecord;

/// Source of monthly currency rates.
#[async_trait]
pub trait RateFeedTrait: Send + Sync {
    /// Fetches the rates for one `YYYY-MM` month, restricted to `currencies`.
    async fn fetch_month(
        &self,
        month: &str,
        currencies: &[String],
    ) -> Result<Vec<MonthlyRate>, FeedError>;
}

/// Source of raw vacancy records.
#[async_trait]
pub trait VacancyFeedTrait: Send + Sync {
    /// Fetches every vacancy published on `date`.
    async fn fetch_day(&self, date: NaiveDate) -> Result<Vec<VacancyRecord>, FeedError>;
}
