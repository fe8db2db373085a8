//! Splits one big vacancy dump into per-year CSV files so partitions can be
//! processed independently and merged later.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use log::info;

use super::csv_parser::{is_well_formed, RawTable};
use super::vacancies_errors::VacancyError;
use crate::errors::Result;

/// Groups well-formed rows by the year prefix of their `published_at` value.
/// The prefix slice avoids a full timestamp parse per row.
pub fn split_rows_by_year(table: &RawTable) -> Result<BTreeMap<String, Vec<&Vec<String>>>> {
    let published_at = table
        .headers
        .iter()
        .position(|h| h == "published_at")
        .ok_or_else(|| VacancyError::MissingColumn("published_at".to_string()))?;

    let mut by_year: BTreeMap<String, Vec<&Vec<String>>> = BTreeMap::new();
    for row in &table.rows {
        if !is_well_formed(row, &table.headers) {
            continue;
        }
        let value = &row[published_at];
        let year = match value.get(..4) {
            Some(prefix) if prefix.bytes().all(|b| b.is_ascii_digit()) => prefix,
            _ => {
                return Err(VacancyError::NumberParse {
                    column: "published_at".to_string(),
                    value: value.clone(),
                }
                .into())
            }
        };
        by_year.entry(year.to_string()).or_default().push(row);
    }

    if by_year.is_empty() {
        return Err(VacancyError::EmptyInput.into());
    }
    Ok(by_year)
}

/// Writes one `<year>.csv` file per publication year into `out_dir`, header
/// repeated in each file. Returns the written paths in year order.
pub fn write_year_files(table: &RawTable, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let by_year = split_rows_by_year(table)?;
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::with_capacity(by_year.len());
    for (year, rows) in &by_year {
        let path = out_dir.join(format!("{}.csv", year));
        let mut writer = WriterBuilder::new().from_path(&path).map_err(|e| {
            VacancyError::Csv(e)
        })?;
        writer.write_record(&table.headers).map_err(VacancyError::from)?;
        for row in rows {
            writer.write_record(row.iter()).map_err(VacancyError::from)?;
        }
        writer.flush()?;
        info!("Wrote {} rows to {}", rows.len(), path.display());
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vacancies::csv_parser::read_table;

    fn sample_table() -> RawTable {
        let csv = "name,salary_from,salary_to,salary_currency,area_name,published_at\n\
                   Программист,10,20,RUR,Москва,2021-07-05T18:19:30+0300\n\
                   Аналитик,30,50,RUR,Тула,2022-01-02T03:04:05+0300\n\
                   Тестировщик,15,25,RUR,Казань,2021-03-04T05:06:07+0300\n\
                   Сломанная,10,20,RUR,Москва";
        read_table(csv.as_bytes()).unwrap()
    }

    #[test]
    fn groups_rows_by_year_prefix() {
        let table = sample_table();
        let by_year = split_rows_by_year(&table).unwrap();
        assert_eq!(by_year.len(), 2);
        assert_eq!(by_year["2021"].len(), 2);
        assert_eq!(by_year["2022"].len(), 1);
    }

    #[test]
    fn non_digit_year_prefix_is_an_error() {
        let csv = "name,salary_from,salary_to,salary_currency,area_name,published_at\n\
                   Программист,10,20,RUR,Москва,бад-07-05T18:19:30+0300";
        let table = read_table(csv.as_bytes()).unwrap();
        let err = split_rows_by_year(&table).unwrap_err();
        assert!(matches!(
            err,
            crate::errors::Error::Vacancy(VacancyError::NumberParse { ref column, .. })
                if column == "published_at"
        ));
    }

    #[test]
    fn multibyte_prefix_is_an_error_not_a_panic() {
        // Four bytes into this value lands inside a multibyte character.
        let csv = "name,salary_from,salary_to,salary_currency,area_name,published_at\n\
                   Программист,10,20,RUR,Москва,202💥bad";
        let table = read_table(csv.as_bytes()).unwrap();
        let err = split_rows_by_year(&table).unwrap_err();
        assert!(matches!(
            err,
            crate::errors::Error::Vacancy(VacancyError::NumberParse { .. })
        ));
    }

    #[test]
    fn writes_one_file_per_year() {
        let table = sample_table();
        let dir = tempfile::tempdir().unwrap();
        let written = write_year_files(&table, dir.path()).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written[0].ends_with("2021.csv"));

        let reread = read_table(&std::fs::read(&written[0]).unwrap()).unwrap();
        assert_eq!(reread.headers, table.headers);
        assert_eq!(reread.rows.len(), 2);
    }
}
