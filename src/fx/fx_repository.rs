use std::path::Path;
use std::str::FromStr;

use log::debug;
use rusqlite::{params, Connection};
use rust_decimal::Decimal;

use super::fx_model::MonthlyRate;
use crate::errors::DatabaseError;

/// SQLite-backed cache for monthly conversion rates. One table, no
/// migrations; rates are stored as text to keep decimal precision.
pub struct FxRepository {
    conn: Connection,
}

impl FxRepository {
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        let conn = Connection::open(path)
            .map_err(|e| DatabaseError::OpenFailed(format!("{}: {}", path.display(), e)))?;
        Self::from_connection(conn)
    }

    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn =
            Connection::open_in_memory().map_err(|e| DatabaseError::OpenFailed(e.to_string()))?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self, DatabaseError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS monthly_rates (
                month    TEXT NOT NULL,
                currency TEXT NOT NULL,
                rate     TEXT NOT NULL,
                PRIMARY KEY (month, currency)
            )",
            [],
        )?;
        Ok(Self { conn })
    }

    /// Upserts a batch of rates in one transaction.
    pub fn save_rates(&mut self, rates: &[MonthlyRate]) -> Result<(), DatabaseError> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO monthly_rates (month, currency, rate) VALUES (?1, ?2, ?3)",
            )?;
            for rate in rates {
                stmt.execute(params![rate.month, rate.currency, rate.rate.to_string()])?;
            }
        }
        tx.commit()?;
        debug!("Saved {} monthly rates", rates.len());
        Ok(())
    }

    /// Loads every stored rate, ordered by month then currency.
    pub fn load_rates(&self) -> Result<Vec<MonthlyRate>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT month, currency, rate FROM monthly_rates ORDER BY month, currency",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut rates = Vec::new();
        for row in rows {
            let (month, currency, raw_rate) = row?;
            let rate = Decimal::from_str(&raw_rate).map_err(|e| {
                DatabaseError::MalformedValue(format!(
                    "rate '{}' for {} in {}: {}",
                    raw_rate, currency, month, e
                ))
            })?;
            rates.push(MonthlyRate::new(month, currency, rate));
        }
        Ok(rates)
    }

    /// Loads the rates recorded for a single month.
    pub fn rates_for_month(&self, month: &str) -> Result<Vec<MonthlyRate>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT month, currency, rate FROM monthly_rates WHERE month = ?1 ORDER BY currency",
        )?;
        let rows = stmt.query_map([month], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
            ))
        })?;

        let mut rates = Vec::new();
        for row in rows {
            let (month, currency, raw_rate) = row?;
            let rate = Decimal::from_str(&raw_rate)
                .map_err(|e| DatabaseError::MalformedValue(format!("rate '{}': {}", raw_rate, e)))?;
            rates.push(MonthlyRate::new(month, currency, rate));
        }
        Ok(rates)
    }
}
