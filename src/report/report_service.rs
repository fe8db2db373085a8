use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::debug;

use super::report_model::ReportCard;
use crate::errors::Result;

/// Writes the six-line console summary to `out`.
pub fn write_summary<W: Write>(card: &ReportCard, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "Average salary by year: {}",
        format_map(card.salary_by_year.iter())
    )?;
    writeln!(
        out,
        "Vacancy count by year: {}",
        format_map(card.vacancies_by_year.iter())
    )?;
    writeln!(
        out,
        "Average salary by year for '{}': {}",
        card.profession,
        format_map(card.profession_salary_by_year.iter())
    )?;
    writeln!(
        out,
        "Vacancy count by year for '{}': {}",
        card.profession,
        format_map(card.profession_vacancies_by_year.iter())
    )?;
    writeln!(
        out,
        "Salary level by region (descending): {}",
        format_map(
            card.top_regions_by_salary
                .iter()
                .map(|r| (&r.region, &r.mean_salary))
        )
    )?;
    writeln!(
        out,
        "Vacancy share by region (descending): {}",
        format_map(
            card.top_regions_by_share
                .iter()
                .map(|r| (&r.region, &r.share))
        )
    )?;
    Ok(())
}

pub fn print_summary(card: &ReportCard) -> Result<()> {
    write_summary(card, &mut io::stdout().lock())
}

/// Serializes the full card as pretty-printed JSON.
pub fn write_json(card: &ReportCard, path: &Path) -> Result<()> {
    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, card)?;
    debug!("Wrote report to {}", path.display());
    Ok(())
}

/// Writes the year table and the region table as two CSV files.
pub fn write_csv_tables(card: &ReportCard, years_path: &Path, regions_path: &Path) -> Result<()> {
    let mut years = csv::Writer::from_path(years_path).map_err(csv_error)?;
    years
        .write_record([
            "year",
            "mean_salary",
            "vacancies",
            "profession_mean_salary",
            "profession_vacancies",
        ])
        .map_err(csv_error)?;
    for (year, mean) in &card.salary_by_year {
        years
            .write_record([
                year.to_string(),
                mean.to_string(),
                card.vacancies_by_year[year].to_string(),
                card.profession_salary_by_year[year].to_string(),
                card.profession_vacancies_by_year[year].to_string(),
            ])
            .map_err(csv_error)?;
    }
    years.flush()?;

    let mut regions = csv::Writer::from_path(regions_path).map_err(csv_error)?;
    regions
        .write_record(["region", "mean_salary", "vacancies", "share"])
        .map_err(csv_error)?;
    for region in &card.top_regions_by_salary {
        regions
            .write_record([
                region.region.clone(),
                region.mean_salary.to_string(),
                region.count.to_string(),
                region.share.to_string(),
            ])
            .map_err(csv_error)?;
    }
    regions.flush()?;
    Ok(())
}

fn format_map<K, V>(entries: impl Iterator<Item = (K, V)>) -> String
where
    K: std::fmt::Display,
    V: std::fmt::Display,
{
    let body = entries
        .map(|(key, value)| format!("{key}: {value}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{body}}}")
}

fn csv_error(e: csv::Error) -> crate::errors::Error {
    crate::vacancies::VacancyError::Csv(e).into()
}
