use std::sync::Arc;

use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::salary_errors::SalaryError;
use super::salary_model::{NormalizedBatch, NormalizedVacancy};
use crate::errors::{Error, Result};
use crate::fx::RateLookupTrait;
use crate::vacancies::VacancyRecord;

/// Turns vacancy records into single base-currency salary values.
pub struct SalaryNormalizer {
    rates: Arc<dyn RateLookupTrait>,
}

impl SalaryNormalizer {
    pub fn new(rates: Arc<dyn RateLookupTrait>) -> Self {
        Self { rates }
    }

    /// Reconciles the salary fork into one value: the present bound when only
    /// one is given, the arithmetic mean when both are.
    pub fn reconcile_bounds(from: Option<Decimal>, to: Option<Decimal>) -> Option<Decimal> {
        match (from, to) {
            (None, Some(to)) => Some(to),
            (Some(from), None) => Some(from),
            (Some(from), Some(to)) => Some((from + to) / dec!(2)),
            (None, None) => None,
        }
    }

    /// Computes the normalized salary for one record. Missing bounds and a
    /// missing conversion rate are both errors here; the batch entry point
    /// decides which of the two is recoverable.
    pub fn normalize(&self, record: &VacancyRecord) -> Result<Decimal> {
        let base_value = Self::reconcile_bounds(record.salary_from, record.salary_to)
            .ok_or_else(|| SalaryError::MissingBounds(record.name.clone()))?;

        let factor = if record.salary_currency == self.rates.base_currency() {
            Decimal::ONE
        } else {
            self.rates
                .rate_to_base(&record.published_year_month(), &record.salary_currency)?
        };

        Ok(base_value * factor)
    }

    /// Normalizes a whole run. Records without any salary bound are skipped
    /// and counted; every other failure (unknown currency, missing rate, a
    /// bad record from the lazy parser) aborts the batch with no output.
    pub fn normalize_all<I>(&self, records: I) -> Result<NormalizedBatch>
    where
        I: IntoIterator<Item = Result<VacancyRecord>>,
    {
        let mut batch = NormalizedBatch::default();
        for record in records {
            let record = record?;
            let year = record.published_year();
            match self.normalize(&record) {
                Ok(salary) => batch.vacancies.push(NormalizedVacancy {
                    name: record.name,
                    region: record.region,
                    year,
                    salary,
                }),
                Err(Error::Salary(SalaryError::MissingBounds(_))) => {
                    batch.skipped_no_salary += 1;
                }
                Err(e) => return Err(e),
            }
        }
        debug!(
            "Normalized {} vacancies, skipped {} without salary bounds",
            batch.vacancies.len(),
            batch.skipped_no_salary
        );
        Ok(batch)
    }
}
