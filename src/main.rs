use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{error, info};

use vacstat::constants::BASE_CURRENCY;
use vacstat::fx::{FixedRateTable, FxRepository, RateLookupTrait, RateTable};
use vacstat::providers::{CbrRateProvider, HhVacancyProvider, VacancyFeedTrait};
use vacstat::report::{print_summary, write_json, ReportCard};
use vacstat::salary::SalaryNormalizer;
use vacstat::statistics::StatisticsService;
use vacstat::vacancies::{parse_vacancies, read_table_file, write_year_files, VacancyRecord};
use vacstat::{Error, Result};

/// Currency codes the rate feed is asked for; everything else in a dump is
/// too rare to matter.
const TRACKED_CURRENCIES: [&str; 9] = [
    "AZN", "BYR", "EUR", "GEL", "KGS", "KZT", "UAH", "USD", "UZS",
];

const USAGE: &str = "\
Usage:
  vacstat stats <file.csv> <profession> [--rates <rates.db>]
  vacstat split <file.csv> <out-dir>
  vacstat fetch-rates <from: YYYY-MM> <to: YYYY-MM> <out.db>
  vacstat fetch-vacancies <date: YYYY-MM-DD> <out.csv>";

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    if let Err(e) = run().await {
        error!("{}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("stats") => {
            let file = arg_or_prompt(args.get(1), "Enter file name: ")?;
            let profession = arg_or_prompt(args.get(2), "Enter profession: ")?;
            let rates = rates_flag(&args);
            run_stats(Path::new(&file), &profession, rates.as_deref())
        }
        Some("split") => {
            let file = arg_or_prompt(args.get(1), "Enter file name: ")?;
            let out_dir = arg_or_prompt(args.get(2), "Enter output directory: ")?;
            run_split(Path::new(&file), Path::new(&out_dir))
        }
        Some("fetch-rates") => {
            let from = arg_or_prompt(args.get(1), "Enter first month (YYYY-MM): ")?;
            let to = arg_or_prompt(args.get(2), "Enter last month (YYYY-MM): ")?;
            let out = arg_or_prompt(args.get(3), "Enter output database path: ")?;
            run_fetch_rates(&from, &to, Path::new(&out)).await
        }
        Some("fetch-vacancies") => {
            let date = arg_or_prompt(args.get(1), "Enter date (YYYY-MM-DD): ")?;
            let out = arg_or_prompt(args.get(2), "Enter output file: ")?;
            run_fetch_vacancies(&date, Path::new(&out)).await
        }
        _ => {
            eprintln!("{USAGE}");
            std::process::exit(2);
        }
    }
}

/// Full pipeline: CSV dump in, console summary and `report.json` out.
fn run_stats(file: &Path, profession: &str, rates: Option<&Path>) -> Result<()> {
    let rate_table = load_rate_table(rates)?;
    let normalizer = SalaryNormalizer::new(rate_table);

    let table = read_table_file(file)?;
    let batch = normalizer.normalize_all(parse_vacancies(&table)?)?;
    info!(
        "Normalized {} vacancies ({} without salary bounds skipped)",
        batch.vacancies.len(),
        batch.skipped_no_salary
    );

    let service = StatisticsService::new(profession);
    let report = service.aggregate_partitioned(&batch.vacancies)?;
    let card = ReportCard::from_report(profession, &report);

    print_summary(&card)?;
    let out = PathBuf::from("report.json");
    write_json(&card, &out)?;
    info!("Report written to {}", out.display());
    Ok(())
}

/// With no rates path the small built-in table is used; a path loads the
/// SQLite cache produced by `fetch-rates`.
fn load_rate_table(rates: Option<&Path>) -> Result<Arc<dyn RateLookupTrait>> {
    match rates {
        None => Ok(Arc::new(FixedRateTable::builtin())),
        Some(path) => {
            let repo = FxRepository::open(path)?;
            let table = RateTable::new(BASE_CURRENCY, repo.load_rates()?)?;
            Ok(Arc::new(table))
        }
    }
}

fn run_split(file: &Path, out_dir: &Path) -> Result<()> {
    let table = read_table_file(file)?;
    let written = write_year_files(&table, out_dir)?;
    info!("Split {} into {} year files", file.display(), written.len());
    Ok(())
}

async fn run_fetch_rates(from: &str, to: &str, out: &Path) -> Result<()> {
    let provider = CbrRateProvider::new();
    let currencies: Vec<String> = TRACKED_CURRENCIES.iter().map(|c| c.to_string()).collect();

    let rates = provider.fetch_range(from, to, &currencies).await?;

    let mut repo = FxRepository::open(out)?;
    repo.save_rates(&rates)?;
    info!("Saved {} rates to {}", rates.len(), out.display());
    Ok(())
}

async fn run_fetch_vacancies(date: &str, out: &Path) -> Result<()> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|e| {
        Error::Vacancy(vacstat::vacancies::VacancyError::DateParse {
            value: date.to_string(),
            source: e,
        })
    })?;

    let provider = HhVacancyProvider::new();
    let records = provider.fetch_day(date).await?;
    write_vacancy_csv(&records, out)?;
    info!("Saved {} vacancies to {}", records.len(), out.display());
    Ok(())
}

fn write_vacancy_csv(records: &[VacancyRecord], out: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(out).map_err(vacstat::vacancies::VacancyError::from)?;
    writer
        .write_record([
            "name",
            "salary_from",
            "salary_to",
            "salary_currency",
            "area_name",
            "published_at",
        ])
        .map_err(vacstat::vacancies::VacancyError::from)?;
    for record in records {
        writer
            .write_record([
                record.name.clone(),
                record
                    .salary_from
                    .map(|d| d.to_string())
                    .unwrap_or_default(),
                record.salary_to.map(|d| d.to_string()).unwrap_or_default(),
                record.salary_currency.clone(),
                record.region.clone(),
                // hh.ru publishes Moscow-local timestamps
                format!("{}+0300", record.published.format("%Y-%m-%dT%H:%M:%S")),
            ])
            .map_err(vacstat::vacancies::VacancyError::from)?;
    }
    writer.flush()?;
    Ok(())
}

fn rates_flag(args: &[String]) -> Option<PathBuf> {
    args.iter()
        .position(|a| a == "--rates")
        .and_then(|i| args.get(i + 1))
        .map(PathBuf::from)
}

fn arg_or_prompt(arg: Option<&String>, prompt: &str) -> Result<String> {
    if let Some(value) = arg {
        if !value.starts_with("--") {
            return Ok(value.clone());
        }
    }
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
