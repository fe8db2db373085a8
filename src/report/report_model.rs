use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::constants::TOP_REGIONS_LIMIT;
use crate::statistics::{RegionStat, StatisticsReport};

/// Display-ready bundle of the six output maps for one profession.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportCard {
    pub profession: String,
    pub salary_by_year: BTreeMap<i32, Decimal>,
    pub vacancies_by_year: BTreeMap<i32, usize>,
    pub profession_salary_by_year: BTreeMap<i32, Decimal>,
    pub profession_vacancies_by_year: BTreeMap<i32, usize>,
    /// Retained regions by mean salary, truncated for display.
    pub top_regions_by_salary: Vec<RegionStat>,
    /// Retained regions by vacancy share, already truncated upstream.
    pub top_regions_by_share: Vec<RegionStat>,
}

impl ReportCard {
    pub fn from_report(profession: impl Into<String>, report: &StatisticsReport) -> Self {
        let mut top_regions_by_salary = report.regions_by_salary.clone();
        top_regions_by_salary.truncate(TOP_REGIONS_LIMIT);

        Self {
            profession: profession.into(),
            salary_by_year: report
                .salary_by_year
                .iter()
                .map(|(year, stat)| (*year, stat.mean_salary))
                .collect(),
            vacancies_by_year: report
                .salary_by_year
                .iter()
                .map(|(year, stat)| (*year, stat.count))
                .collect(),
            profession_salary_by_year: report
                .profession_by_year
                .iter()
                .map(|(year, stat)| (*year, stat.mean_salary))
                .collect(),
            profession_vacancies_by_year: report
                .profession_by_year
                .iter()
                .map(|(year, stat)| (*year, stat.count))
                .collect(),
            top_regions_by_salary,
            top_regions_by_share: report.regions_by_share.clone(),
        }
    }
}
