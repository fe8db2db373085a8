use thiserror::Error;

use crate::fx::FxError;
use crate::providers::FeedError;
use crate::salary::SalaryError;
use crate::statistics::StatisticsError;
use crate::vacancies::VacancyError;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the vacancy statistics engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Currency operation failed: {0}")]
    Fx(#[from] FxError),

    #[error("Vacancy input failed: {0}")]
    Vacancy(#[from] VacancyError),

    #[error("Salary normalization failed: {0}")]
    Salary(#[from] SalaryError),

    #[error("Statistics computation failed: {0}")]
    Statistics(#[from] StatisticsError),

    #[error("Data feed failed: {0}")]
    Feed(#[from] FeedError),

    #[error("Rate store operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization failed: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("failed to open rate store: {0}")]
    OpenFailed(String),

    #[error("rate store query failed: {0}")]
    QueryFailed(#[from] rusqlite::Error),

    #[error("rate store holds a malformed value: {0}")]
    MalformedValue(String),
}
