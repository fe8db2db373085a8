pub mod constants;
pub mod errors;
pub mod fx;
pub mod providers;
pub mod report;
pub mod salary;
pub mod statistics;
pub mod vacancies;

pub use errors::{Error, Result};
