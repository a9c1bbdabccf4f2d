//! SQLite price adapter.

use crate::domain::error::BandsightError;
use crate::domain::price::PriceObservation;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::PriceDataPort;
use chrono::NaiveDate;
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;

pub struct SqliteAdapter {
    pool: Pool<SqliteConnectionManager>,
}

fn db_error(e: r2d2::Error) -> BandsightError {
    BandsightError::Database {
        reason: e.to_string(),
    }
}

fn query_error(e: rusqlite::Error) -> BandsightError {
    BandsightError::DatabaseQuery {
        reason: e.to_string(),
    }
}

fn parse_stored_date(raw: &str) -> Result<NaiveDate, BandsightError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| BandsightError::Database {
        reason: format!("invalid stored date '{}': {}", raw, e),
    })
}

impl SqliteAdapter {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, BandsightError> {
        let db_path =
            config
                .get_string("sqlite", "path")
                .ok_or_else(|| BandsightError::ConfigMissing {
                    section: "sqlite".into(),
                    key: "path".into(),
                })?;

        let pool_size = config.get_int("sqlite", "pool_size", 4).max(1) as u32;

        let manager = SqliteConnectionManager::file(&db_path);
        let pool = Pool::builder()
            .max_size(pool_size)
            .build(manager)
            .map_err(db_error)?;

        Ok(Self { pool })
    }

    pub fn in_memory() -> Result<Self, BandsightError> {
        let manager = SqliteConnectionManager::memory();
        let pool = Pool::builder().max_size(1).build(manager).map_err(db_error)?;

        Ok(Self { pool })
    }

    fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>, BandsightError> {
        self.pool.get().map_err(db_error)
    }

    pub fn initialize_schema(&self) -> Result<(), BandsightError> {
        self.conn()?
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS prices (
                    ticker TEXT NOT NULL,
                    date TEXT NOT NULL,
                    adj_close REAL NOT NULL,
                    PRIMARY KEY (ticker, date)
                );
                CREATE INDEX IF NOT EXISTS idx_prices_date ON prices(date);",
            )
            .map_err(query_error)?;

        Ok(())
    }

    pub fn insert_prices(
        &self,
        ticker: &str,
        observations: &[PriceObservation],
    ) -> Result<(), BandsightError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction().map_err(query_error)?;

        for obs in observations {
            tx.execute(
                "INSERT OR REPLACE INTO prices (ticker, date, adj_close) VALUES (?1, ?2, ?3)",
                params![
                    ticker.to_uppercase(),
                    obs.date.format("%Y-%m-%d").to_string(),
                    obs.adjusted_close
                ],
            )
            .map_err(query_error)?;
        }

        tx.commit().map_err(query_error)?;
        Ok(())
    }
}

impl PriceDataPort for SqliteAdapter {
    fn fetch_prices(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceObservation>, BandsightError> {
        let conn = self.conn()?;

        let start_str = start_date.format("%Y-%m-%d").to_string();
        let end_str = end_date.format("%Y-%m-%d").to_string();

        let query = "SELECT date, adj_close
                     FROM prices
                     WHERE ticker = ?1 AND date >= ?2 AND date <= ?3
                     ORDER BY date ASC";

        let mut stmt = conn.prepare(query).map_err(query_error)?;
        let rows = stmt
            .query_map(params![ticker.to_uppercase(), start_str, end_str], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
            })
            .map_err(query_error)?;

        let mut observations = Vec::new();
        for row in rows {
            let (date_str, adjusted_close) = row.map_err(query_error)?;
            observations.push(PriceObservation::new(
                parse_stored_date(&date_str)?,
                adjusted_close,
            ));
        }

        Ok(observations)
    }

    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, BandsightError> {
        let conn = self.conn()?;

        let query = "SELECT MIN(date), MAX(date), COUNT(*) FROM prices WHERE ticker = ?1";

        let result: (Option<String>, Option<String>, i64) = conn
            .query_row(query, params![ticker.to_uppercase()], |row| {
                Ok((row.get(0)?, row.get(1)?, row.get(2)?))
            })
            .map_err(query_error)?;

        match result {
            (Some(min_str), Some(max_str), count) if count > 0 => Ok(Some((
                parse_stored_date(&min_str)?,
                parse_stored_date(&max_str)?,
                count as usize,
            ))),
            _ => Ok(None),
        }
    }
}
