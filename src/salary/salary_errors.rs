use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalaryError {
    #[error("vacancy '{0}' has no salary bounds")]
    MissingBounds(String),
}
