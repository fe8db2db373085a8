pub mod salary_errors;
pub mod salary_model;
pub mod salary_service;

pub use salary_errors::SalaryError;
pub use salary_model::{NormalizedBatch, NormalizedVacancy};
pub use salary_service::SalaryNormalizer;
