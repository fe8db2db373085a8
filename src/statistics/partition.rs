//! Optional scale-out: partition the batch by year, accumulate partitions in
//! parallel, merge the partial accumulators. Merging sums counts and sums and
//! re-derives means, so the result is numerically identical to the
//! single-threaded run.

use std::collections::BTreeMap;

use rayon::prelude::*;

use super::accumulator::StatsAccumulator;
use super::statistics_errors::StatisticsError;
use super::statistics_model::StatisticsReport;
use super::statistics_service::StatisticsService;
use crate::errors::Result;
use crate::salary::NormalizedVacancy;

/// Groups records by publication year, preserving input order inside each
/// partition.
pub fn partition_by_year(records: &[NormalizedVacancy]) -> BTreeMap<i32, Vec<&NormalizedVacancy>> {
    let mut partitions: BTreeMap<i32, Vec<&NormalizedVacancy>> = BTreeMap::new();
    for vacancy in records {
        partitions.entry(vacancy.year).or_default().push(vacancy);
    }
    partitions
}

impl StatisticsService {
    /// Year-partitioned aggregation. Each partition owns its accumulator;
    /// partials are merged in ascending year order so the outcome is
    /// deterministic.
    pub fn aggregate_partitioned(&self, records: &[NormalizedVacancy]) -> Result<StatisticsReport> {
        if records.is_empty() {
            return Err(StatisticsError::EmptyInput.into());
        }

        let partitions: Vec<Vec<&NormalizedVacancy>> =
            partition_by_year(records).into_values().collect();

        let partials: Vec<StatsAccumulator> = partitions
            .par_iter()
            .map(|partition| {
                let mut acc = StatsAccumulator::new();
                for vacancy in partition {
                    acc.add(vacancy, self.matches_profession(&vacancy.name));
                }
                acc
            })
            .collect();

        let mut merged = StatsAccumulator::new();
        for partial in partials {
            merged.merge(partial);
        }
        Ok(self.finish(merged))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn vacancy(name: &str, region: &str, year: i32, salary: Decimal) -> NormalizedVacancy {
        NormalizedVacancy {
            name: name.to_string(),
            region: region.to_string(),
            year,
            salary,
        }
    }

    fn mixed_batch() -> Vec<NormalizedVacancy> {
        let mut records = Vec::new();
        for year in 2019..=2022 {
            for i in 0..25 {
                let region = if i % 2 == 0 { "Москва" } else { "Тула" };
                let name = if i % 3 == 0 { "Программист" } else { "Аналитик" };
                records.push(vacancy(
                    name,
                    region,
                    year,
                    Decimal::from(1000 + i * 17 + (year - 2019) * 113),
                ));
            }
        }
        records
    }

    #[test]
    fn partitions_cover_all_years() {
        let records = mixed_batch();
        let partitions = partition_by_year(&records);
        assert_eq!(partitions.len(), 4);
        assert!(partitions.values().all(|p| p.len() == 25));
    }

    #[test]
    fn partitioned_run_matches_single_threaded() {
        let records = mixed_batch();
        let service = StatisticsService::new("программист");
        let sequential = service.aggregate(&records).unwrap();
        let partitioned = service.aggregate_partitioned(&records).unwrap();
        assert_eq!(sequential, partitioned);
    }

    #[test]
    fn partitioned_empty_input_is_fatal() {
        let service = StatisticsService::new("x");
        assert!(service.aggregate_partitioned(&[]).is_err());
    }

    #[test]
    fn merged_means_are_rederived_not_averaged() {
        // One year with salaries 10 and 20, another with 40: the global
        // by-region mean must be (10+20+40)/3, not mean-of-means.
        let records = vec![
            vacancy("A", "Москва", 2020, dec!(10)),
            vacancy("A", "Москва", 2020, dec!(20)),
            vacancy("A", "Москва", 2021, dec!(40)),
        ];
        let service = StatisticsService::new("A");
        let report = service.aggregate_partitioned(&records).unwrap();
        assert_eq!(report.regions_by_salary[0].mean_salary, dec!(23));
    }
}
