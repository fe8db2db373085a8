use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

/// Mean salary and vacancy count for one grouping key (a year).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearStat {
    /// Integer-rounded mean, sum first then divide.
    pub mean_salary: Decimal,
    pub count: usize,
}

/// Mean salary, count and vacancy share for one region.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionStat {
    pub region: String,
    pub mean_salary: Decimal,
    pub count: usize,
    /// Region count over total count across all records, rounded to 4 dp.
    pub share: Decimal,
}

/// Output of one aggregation run. Immutable once computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsReport {
    pub salary_by_year: BTreeMap<i32, YearStat>,
    /// Same year keys as `salary_by_year`, restricted to the profession
    /// filter; zero-match years carry mean 0 / count 0.
    pub profession_by_year: BTreeMap<i32, YearStat>,
    /// Regions holding at least 1% of all vacancies, mean salary descending.
    pub regions_by_salary: Vec<RegionStat>,
    /// Same retained regions, share descending, top 10.
    pub regions_by_share: Vec<RegionStat>,
}
