use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A vacancy after salary-bound reconciliation and currency conversion.
/// Derived once, never mutated; owned by the aggregation stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedVacancy {
    pub name: String,
    pub region: String,
    pub year: i32,
    /// Salary in base currency.
    pub salary: Decimal,
}

/// Output of a normalization run over a whole input batch.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub vacancies: Vec<NormalizedVacancy>,
    /// Records excluded because both salary bounds were absent. They still
    /// count toward the raw listing, just not toward salary statistics.
    pub skipped_no_salary: usize,
}
