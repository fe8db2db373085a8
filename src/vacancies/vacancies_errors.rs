use thiserror::Error;

#[derive(Error, Debug)]
pub enum VacancyError {
    #[error("no usable vacancy rows in input")]
    EmptyInput,

    #[error("required column '{0}' is missing from the header")]
    MissingColumn(String),

    #[error("cannot parse publication date '{value}': {source}")]
    DateParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("cannot parse number '{value}' in column '{column}'")]
    NumberParse { column: String, value: String },

    #[error("csv input is unreadable: {0}")]
    Csv(#[from] csv::Error),
}
