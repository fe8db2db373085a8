pub mod accumulator;
pub mod partition;
pub mod statistics_errors;
pub mod statistics_model;
pub mod statistics_service;

pub use accumulator::{MeanAccumulator, StatsAccumulator};
pub use statistics_errors::StatisticsError;
pub use statistics_model::{RegionStat, StatisticsReport, YearStat};
pub use statistics_service::StatisticsService;
