use thiserror::Error;

#[derive(Error, Debug)]
pub enum StatisticsError {
    #[error("no records to aggregate")]
    EmptyInput,
}
