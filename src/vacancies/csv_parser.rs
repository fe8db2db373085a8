//! Tabular input handling: raw CSV bytes in, typed vacancy records out.
//!
//! Row filtering is deliberately forgiving (shape mismatches are dropped,
//! not reported) while value errors inside a retained row are fatal for the
//! whole run, so no partial statistics are ever produced from bad data.

use std::path::Path;
use std::str::FromStr;

use chrono::DateTime;
use csv::ReaderBuilder;
use log::debug;
use rust_decimal::Decimal;

use super::vacancies_errors::VacancyError;
use super::vacancies_model::VacancyRecord;
use crate::constants::PUBLISHED_AT_FORMAT;
use crate::errors::Result;

/// Header row plus raw data rows, all strings, shape not yet validated.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Reads CSV bytes into a raw table. Tolerates a UTF-8 byte-order marker.
pub fn read_table(content: &[u8]) -> Result<RawTable> {
    let content = strip_bom(content);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content);

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(first) => first
            .map_err(VacancyError::from)?
            .iter()
            .map(|s| s.to_string())
            .collect(),
        None => return Err(VacancyError::EmptyInput.into()),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record.map_err(VacancyError::from)?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }

    Ok(RawTable { headers, rows })
}

pub fn read_table_file(path: impl AsRef<Path>) -> Result<RawTable> {
    let content = std::fs::read(path)?;
    read_table(&content)
}

fn strip_bom(content: &[u8]) -> &[u8] {
    if content.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &content[3..]
    } else {
        content
    }
}

/// A data row survives only when it matches the header's shape, has no empty
/// field and is not a repeated header row.
pub(crate) fn is_well_formed(row: &[String], headers: &[String]) -> bool {
    row.len() == headers.len() && !row.iter().any(|field| field.is_empty()) && row != headers
}

/// Positions of the required columns inside the header row.
struct ColumnMap {
    name: usize,
    salary_from: usize,
    salary_to: usize,
    salary_currency: usize,
    region: usize,
    published_at: usize,
}

impl ColumnMap {
    fn resolve(headers: &[String]) -> Result<Self> {
        let find = |column: &str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| VacancyError::MissingColumn(column.to_string()))
        };
        let name = find("name")?;
        let salary_from = find("salary_from")?;
        let salary_to = find("salary_to")?;
        let salary_currency = find("salary_currency")?;
        // hh.ru dumps call the region column `area_name`
        let region = headers
            .iter()
            .position(|h| h == "area_name" || h == "region")
            .ok_or_else(|| VacancyError::MissingColumn("area_name".to_string()))?;
        let published_at = find("published_at")?;

        Ok(Self {
            name,
            salary_from,
            salary_to,
            salary_currency,
            region,
            published_at,
        })
    }
}

fn parse_salary_bound(column: &str, value: &str) -> Result<Option<Decimal>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Decimal::from_str(trimmed)
        .map(Some)
        .map_err(|_| {
            VacancyError::NumberParse {
                column: column.to_string(),
                value: value.to_string(),
            }
            .into()
        })
}

fn parse_published_at(value: &str) -> Result<chrono::NaiveDateTime> {
    DateTime::parse_from_str(value, PUBLISHED_AT_FORMAT)
        .map(|dt| dt.naive_local())
        .map_err(|e| {
            VacancyError::DateParse {
                value: value.to_string(),
                source: e,
            }
            .into()
        })
}

fn row_to_record(row: &[String], columns: &ColumnMap) -> Result<VacancyRecord> {
    Ok(VacancyRecord {
        name: row[columns.name].clone(),
        salary_from: parse_salary_bound("salary_from", &row[columns.salary_from])?,
        salary_to: parse_salary_bound("salary_to", &row[columns.salary_to])?,
        salary_currency: row[columns.salary_currency].clone(),
        region: row[columns.region].clone(),
        published: parse_published_at(&row[columns.published_at])?,
    })
}

/// Lazily converts a raw table into vacancy records. Malformed rows are
/// dropped; a bad date or number inside a retained row surfaces as an error
/// item and must abort the run.
pub fn parse_vacancies(
    table: &RawTable,
) -> Result<impl Iterator<Item = Result<VacancyRecord>> + '_> {
    let columns = ColumnMap::resolve(&table.headers)?;
    let mut dropped: usize = 0;

    Ok(table
        .rows
        .iter()
        .filter(move |row| {
            let keep = is_well_formed(row, &table.headers);
            if !keep {
                dropped += 1;
                debug!("Dropping malformed row #{} of this run", dropped);
            }
            keep
        })
        .map(move |row| row_to_record(row, &columns)))
}

/// Eagerly parses a table, failing on the first fatal row error and on fully
/// empty input.
pub fn collect_vacancies(table: &RawTable) -> Result<Vec<VacancyRecord>> {
    let records: Vec<VacancyRecord> = parse_vacancies(table)?.collect::<Result<_>>()?;
    if records.is_empty() {
        return Err(VacancyError::EmptyInput.into());
    }
    Ok(records)
}
