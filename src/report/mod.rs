pub mod report_model;
pub mod report_service;

pub use report_model::ReportCard;
pub use report_service::{print_summary, write_csv_tables, write_json, write_summary};
