//! Per-run aggregation state. Accumulators are created fresh for every
//! aggregation run and passed by ownership; nothing here outlives a run.

use std::collections::{BTreeMap, HashMap};

use num_traits::Zero;
use rust_decimal::Decimal;

use crate::salary::NormalizedVacancy;

/// Running sum and count; the mean is derived at the end, sum first then
/// divide, rounded half-to-even to whole units.
#[derive(Debug, Clone, Default)]
pub struct MeanAccumulator {
    sum: Decimal,
    count: usize,
}

impl MeanAccumulator {
    pub fn add(&mut self, value: Decimal) {
        self.sum += value;
        self.count += 1;
    }

    /// Combines two partial accumulators by summing sums and counts.
    pub fn merge(&mut self, other: &MeanAccumulator) {
        self.sum += other.sum;
        self.count += other.count;
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> Decimal {
        if self.count == 0 {
            return Decimal::zero();
        }
        (self.sum / Decimal::from(self.count)).round_dp(0)
    }
}

/// All grouping state for one aggregation run.
#[derive(Debug, Default)]
pub struct StatsAccumulator {
    pub(crate) by_year: BTreeMap<i32, MeanAccumulator>,
    pub(crate) profession_by_year: BTreeMap<i32, MeanAccumulator>,
    pub(crate) regions: HashMap<String, MeanAccumulator>,
    /// Regions in the order they were first encountered; rankings tie-break
    /// on this order.
    pub(crate) region_order: Vec<String>,
}

impl StatsAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, vacancy: &NormalizedVacancy, matches_profession: bool) {
        self.by_year
            .entry(vacancy.year)
            .or_default()
            .add(vacancy.salary);
        if matches_profession {
            self.profession_by_year
                .entry(vacancy.year)
                .or_default()
                .add(vacancy.salary);
        }
        if !self.regions.contains_key(&vacancy.region) {
            self.region_order.push(vacancy.region.clone());
        }
        self.regions
            .entry(vacancy.region.clone())
            .or_default()
            .add(vacancy.salary);
    }

    /// Folds a partition's accumulator into this one. Sums and counts are
    /// summed; means are re-derived afterwards, never averaged.
    pub fn merge(&mut self, other: StatsAccumulator) {
        for (year, acc) in other.by_year {
            self.by_year.entry(year).or_default().merge(&acc);
        }
        for (year, acc) in other.profession_by_year {
            self.profession_by_year.entry(year).or_default().merge(&acc);
        }
        for region in other.region_order {
            if !self.regions.contains_key(&region) {
                self.region_order.push(region.clone());
            }
            if let Some(acc) = other.regions.get(&region) {
                self.regions.entry(region).or_default().merge(acc);
            }
        }
    }

    /// Total number of aggregated records.
    pub fn total(&self) -> usize {
        self.by_year.values().map(MeanAccumulator::count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn mean_divides_sum_once_at_the_end() {
        let mut acc = MeanAccumulator::default();
        acc.add(dec!(15));
        acc.add(dec!(30));
        // 45 / 2 = 22.5, rounded half-to-even
        assert_eq!(acc.mean(), dec!(22));
        assert_eq!(acc.count(), 2);
    }

    #[test]
    fn empty_accumulator_means_zero() {
        let acc = MeanAccumulator::default();
        assert_eq!(acc.mean(), Decimal::ZERO);
    }

    #[test]
    fn merge_sums_instead_of_overwriting() {
        let mut left = MeanAccumulator::default();
        left.add(dec!(10));
        let mut right = MeanAccumulator::default();
        right.add(dec!(30));
        right.add(dec!(20));
        left.merge(&right);
        assert_eq!(left.count(), 3);
        assert_eq!(left.mean(), dec!(20));
    }

    #[test]
    fn merge_preserves_first_encounter_region_order() {
        let mut left = StatsAccumulator::new();
        left.add(&vacancy("A", "Москва", 2021, dec!(10)), false);
        let mut right = StatsAccumulator::new();
        right.add(&vacancy("B", "Тула", 2022, dec!(20)), false);
        right.add(&vacancy("C", "Москва", 2022, dec!(30)), false);

        left.merge(right);
        assert_eq!(left.region_order, vec!["Москва", "Тула"]);
        assert_eq!(left.regions["Москва"].count(), 2);
        assert_eq!(left.total(), 3);
    }
}
