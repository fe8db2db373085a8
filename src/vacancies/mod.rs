pub mod csv_parser;
pub mod vacancies_errors;
pub mod vacancies_model;
pub mod year_splitter;

pub use csv_parser::{collect_vacancies, parse_vacancies, read_table, read_table_file, RawTable};
pub use vacancies_errors::VacancyError;
pub use vacancies_model::VacancyRecord;
pub use year_splitter::{split_rows_by_year, write_year_files};
