pub mod fx_errors;
pub mod fx_model;
pub mod fx_repository;
pub mod fx_traits;
pub mod rate_table;

pub use fx_errors::FxError;
pub use fx_model::MonthlyRate;
pub use fx_repository::FxRepository;
pub use fx_traits::RateLookupTrait;
pub use rate_table::{FixedRateTable, RateTable};
