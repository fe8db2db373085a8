use std::collections::BTreeMap;

use log::debug;
use rust_decimal::Decimal;

use super::accumulator::StatsAccumulator;
use super::statistics_errors::StatisticsError;
use super::statistics_model::{RegionStat, StatisticsReport, YearStat};
use crate::constants::{MIN_REGION_SHARE, SHARE_DECIMAL_PRECISION, TOP_REGIONS_LIMIT};
use crate::errors::Result;
use crate::salary::NormalizedVacancy;

/// Groups normalized vacancies by year and by region and applies the region
/// filtering and ranking rules. One accumulator per run, owned by the run.
pub struct StatisticsService {
    profession: String,
    profession_lower: String,
}

impl StatisticsService {
    pub fn new(profession: impl Into<String>) -> Self {
        let profession = profession.into();
        let profession_lower = profession.to_lowercase();
        Self {
            profession,
            profession_lower,
        }
    }

    pub fn profession(&self) -> &str {
        &self.profession
    }

    pub(crate) fn matches_profession(&self, name: &str) -> bool {
        name.to_lowercase().contains(&self.profession_lower)
    }

    /// Single-threaded aggregation over the full batch.
    pub fn aggregate(&self, records: &[NormalizedVacancy]) -> Result<StatisticsReport> {
        if records.is_empty() {
            return Err(StatisticsError::EmptyInput.into());
        }

        let mut acc = StatsAccumulator::new();
        for vacancy in records {
            acc.add(vacancy, self.matches_profession(&vacancy.name));
        }
        Ok(self.finish(acc))
    }

    /// Turns accumulated sums into the final report.
    pub(crate) fn finish(&self, acc: StatsAccumulator) -> StatisticsReport {
        let total = acc.total();
        debug!("Aggregating {} records across {} years", total, acc.by_year.len());

        let salary_by_year: BTreeMap<i32, YearStat> = acc
            .by_year
            .iter()
            .map(|(year, year_acc)| {
                (
                    *year,
                    YearStat {
                        mean_salary: year_acc.mean(),
                        count: year_acc.count(),
                    },
                )
            })
            .collect();

        // Every year key from the unfiltered view must be present, even with
        // zero matches.
        let profession_by_year: BTreeMap<i32, YearStat> = salary_by_year
            .keys()
            .map(|year| {
                let stat = match acc.profession_by_year.get(year) {
                    Some(prof_acc) => YearStat {
                        mean_salary: prof_acc.mean(),
                        count: prof_acc.count(),
                    },
                    None => YearStat {
                        mean_salary: Decimal::ZERO,
                        count: 0,
                    },
                };
                (*year, stat)
            })
            .collect();

        // The share filter is computed once, against the total over ALL
        // records, and drives both region views.
        let total_dec = Decimal::from(total);
        let retained: Vec<RegionStat> = acc
            .region_order
            .iter()
            .filter_map(|region| {
                let region_acc = &acc.regions[region];
                let share = Decimal::from(region_acc.count()) / total_dec;
                if share < MIN_REGION_SHARE {
                    return None;
                }
                Some(RegionStat {
                    region: region.clone(),
                    mean_salary: region_acc.mean(),
                    count: region_acc.count(),
                    share: share.round_dp(SHARE_DECIMAL_PRECISION),
                })
            })
            .collect();

        let mut regions_by_salary = retained.clone();
        regions_by_salary.sort_by(|a, b| b.mean_salary.cmp(&a.mean_salary));

        // Share ordering equals count ordering; sorting on counts avoids
        // ties introduced by the 4 dp rounding.
        let mut regions_by_share = retained;
        regions_by_share.sort_by(|a, b| b.count.cmp(&a.count));
        regions_by_share.truncate(TOP_REGIONS_LIMIT);

        StatisticsReport {
            salary_by_year,
            profession_by_year,
            regions_by_salary,
            regions_by_share,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use rust_decimal_macros::dec;

    fn vacancy(name: &str, region: &str, year: i32, salary: Decimal) -> NormalizedVacancy {
        NormalizedVacancy {
            name: name.to_string(),
            region: region.to_string(),
            year,
            salary,
        }
    }

    #[test]
    fn two_record_scenario() {
        // Salaries 15 and 30 in the same year: sum 45, count 2, mean 22.
        let records = vec![
            vacancy("A", "Москва", 2020, dec!(15)),
            vacancy("B", "Тула", 2020, dec!(30)),
        ];
        let report = StatisticsService::new("A").aggregate(&records).unwrap();
        let stat = &report.salary_by_year[&2020];
        assert_eq!(stat.count, 2);
        assert_eq!(stat.mean_salary, dec!(22));
    }

    #[test]
    fn empty_input_is_fatal() {
        let err = StatisticsService::new("x").aggregate(&[]).unwrap_err();
        assert!(matches!(
            err,
            Error::Statistics(StatisticsError::EmptyInput)
        ));
    }

    #[test]
    fn profession_filter_keeps_all_year_keys() {
        let records = vec![
            vacancy("Программист 1С", "Москва", 2020, dec!(100)),
            vacancy("Аналитик", "Москва", 2021, dec!(200)),
        ];
        let report = StatisticsService::new("программист")
            .aggregate(&records)
            .unwrap();

        assert_eq!(
            report.profession_by_year.keys().collect::<Vec<_>>(),
            report.salary_by_year.keys().collect::<Vec<_>>()
        );
        let missed = &report.profession_by_year[&2021];
        assert_eq!(missed.count, 0);
        assert_eq!(missed.mean_salary, Decimal::ZERO);
        assert_eq!(report.profession_by_year[&2020].count, 1);
    }

    #[test]
    fn profession_filter_is_case_insensitive() {
        let records = vec![vacancy("Senior PROGRAMMER", "Москва", 2020, dec!(100))];
        let report = StatisticsService::new("programmer")
            .aggregate(&records)
            .unwrap();
        assert_eq!(report.profession_by_year[&2020].count, 1);
    }

    #[test]
    fn small_regions_are_filtered_from_both_views() {
        // 199 vacancies in Москва, 1 in Тула: Тула holds 0.5% and must not
        // appear in either region view, despite its high mean.
        let mut records = Vec::new();
        for _ in 0..199 {
            records.push(vacancy("A", "Москва", 2020, dec!(100)));
        }
        records.push(vacancy("B", "Тула", 2020, dec!(1000000)));

        let report = StatisticsService::new("A").aggregate(&records).unwrap();
        assert_eq!(report.regions_by_salary.len(), 1);
        assert_eq!(report.regions_by_salary[0].region, "Москва");
        assert!(report.regions_by_share.iter().all(|r| r.region != "Тула"));
    }

    #[test]
    fn one_percent_share_is_retained() {
        let mut records = Vec::new();
        for _ in 0..99 {
            records.push(vacancy("A", "Москва", 2020, dec!(100)));
        }
        records.push(vacancy("B", "Тула", 2020, dec!(50)));

        let report = StatisticsService::new("A").aggregate(&records).unwrap();
        assert!(report.regions_by_salary.iter().any(|r| r.region == "Тула"));
        let tula = report
            .regions_by_share
            .iter()
            .find(|r| r.region == "Тула")
            .unwrap();
        assert_eq!(tula.share, dec!(0.01));
    }

    #[test]
    fn retained_shares_sum_close_to_total_share() {
        let mut records = Vec::new();
        for i in 0..5 {
            for _ in 0..20 {
                records.push(vacancy("A", &format!("Регион{}", i), 2020, dec!(100)));
            }
        }
        let report = StatisticsService::new("A").aggregate(&records).unwrap();
        let sum: Decimal = report.regions_by_share.iter().map(|r| r.share).sum();
        assert_eq!(sum, dec!(1.0));
    }

    #[test]
    fn salary_view_sorted_by_mean_descending() {
        let mut records = Vec::new();
        for _ in 0..10 {
            records.push(vacancy("A", "Москва", 2020, dec!(100)));
            records.push(vacancy("A", "Тула", 2020, dec!(300)));
            records.push(vacancy("A", "Казань", 2020, dec!(200)));
        }
        let report = StatisticsService::new("A").aggregate(&records).unwrap();
        let order: Vec<&str> = report
            .regions_by_salary
            .iter()
            .map(|r| r.region.as_str())
            .collect();
        assert_eq!(order, vec!["Тула", "Казань", "Москва"]);
    }

    #[test]
    fn share_view_truncates_to_top_ten() {
        let mut records = Vec::new();
        for i in 0..12 {
            // Descending counts so region 0 leads the share view.
            for _ in 0..(24 - i) {
                records.push(vacancy("A", &format!("Регион{}", i), 2020, dec!(100)));
            }
        }
        let report = StatisticsService::new("A").aggregate(&records).unwrap();
        assert_eq!(report.regions_by_share.len(), 10);
        assert_eq!(report.regions_by_share[0].region, "Регион0");
    }

    #[test]
    fn ties_keep_first_encounter_order() {
        let records = vec![
            vacancy("A", "Тула", 2020, dec!(100)),
            vacancy("A", "Казань", 2020, dec!(100)),
        ];
        let report = StatisticsService::new("A").aggregate(&records).unwrap();
        let order: Vec<&str> = report
            .regions_by_salary
            .iter()
            .map(|r| r.region.as_str())
            .collect();
        assert_eq!(order, vec!["Тула", "Казань"]);
    }

    #[test]
    fn rerun_is_bit_identical() {
        let records = vec![
            vacancy("Программист", "Москва", 2020, dec!(150)),
            vacancy("Аналитик", "Тула", 2021, dec!(250)),
        ];
        let service = StatisticsService::new("программист");
        let first = service.aggregate(&records).unwrap();
        let second = service.aggregate(&records).unwrap();
        assert_eq!(first, second);
    }
}
