//! CSV file price adapter.
//!
//! One file per ticker at `<base>/<TICKER>.csv` with a `date,adj_close` header.

use crate::domain::error::BandsightError;
use crate::domain::price::PriceObservation;
use crate::ports::data_port::PriceDataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use tracing::warn;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker.to_uppercase()))
    }

    fn read_all(&self, ticker: &str) -> Result<Vec<PriceObservation>, BandsightError> {
        let path = self.csv_path(ticker);
        let content = fs::read_to_string(&path).map_err(|e| BandsightError::Database {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut observations = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| BandsightError::Database {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(0).ok_or_else(|| BandsightError::Database {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|e| {
                BandsightError::Database {
                    reason: format!("invalid date format '{}': {}", date_str, e),
                }
            })?;

            let adjusted_close: f64 = record
                .get(1)
                .ok_or_else(|| BandsightError::Database {
                    reason: "missing adj_close column".into(),
                })?
                .trim()
                .parse()
                .map_err(|e| BandsightError::Database {
                    reason: format!("invalid adj_close value on {}: {}", date, e),
                })?;

            observations.push(PriceObservation::new(date, adjusted_close));
        }

        observations.sort_by_key(|o| o.date);
        let before = observations.len();
        observations.dedup_by_key(|o| o.date);
        if observations.len() != before {
            warn!(
                ticker,
                dropped = before - observations.len(),
                "duplicate dates in CSV, keeping the first of each"
            );
        }
        Ok(observations)
    }
}

impl PriceDataPort for CsvAdapter {
    fn fetch_prices(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceObservation>, BandsightError> {
        let observations = self.read_all(ticker)?;
        Ok(observations
            .into_iter()
            .filter(|o| o.date >= start_date && o.date <= end_date)
            .collect())
    }

    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, BandsightError> {
        let observations = self.read_all(ticker)?;
        match (observations.first(), observations.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, observations.len()))),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        // deliberately out of order
        let csv_content = "date,adj_close\n\
            2020-01-06,101.25\n\
            2020-01-02,100.0\n\
            2020-01-03,102.5\n";

        fs::write(path.join("AAPL.csv"), csv_content).unwrap();
        fs::write(path.join("EMPTY.csv"), "date,adj_close\n").unwrap();
        fs::write(
            path.join("BAD.csv"),
            "date,adj_close\n2020-01-02,not_a_price\n",
        )
        .unwrap();
        fs::write(
            path.join("DUP.csv"),
            "date,adj_close\n2020-01-02,1.0\n2020-01-02,2.0\n2020-01-03,3.0\n",
        )
        .unwrap();

        (dir, path)
    }

    #[test]
    fn fetch_prices_returns_sorted_data() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let prices = adapter
            .fetch_prices("AAPL", date(2020, 1, 1), date(2020, 1, 31))
            .unwrap();

        assert_eq!(prices.len(), 3);
        assert_eq!(prices[0], PriceObservation::new(date(2020, 1, 2), 100.0));
        assert_eq!(prices[1], PriceObservation::new(date(2020, 1, 3), 102.5));
        assert_eq!(prices[2], PriceObservation::new(date(2020, 1, 6), 101.25));
    }

    #[test]
    fn ticker_is_case_insensitive() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);
        let prices = adapter
            .fetch_prices("aapl", date(2020, 1, 1), date(2020, 1, 31))
            .unwrap();
        assert_eq!(prices.len(), 3);
    }

    #[test]
    fn fetch_prices_filters_by_date() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);

        let prices = adapter
            .fetch_prices("AAPL", date(2020, 1, 3), date(2020, 1, 5))
            .unwrap();

        assert_eq!(prices.len(), 1);
        assert_eq!(prices[0].date, date(2020, 1, 3));
    }

    #[test]
    fn header_only_file_is_empty() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);
        let prices = adapter
            .fetch_prices("EMPTY", date(2020, 1, 1), date(2020, 1, 31))
            .unwrap();
        assert!(prices.is_empty());
        assert!(adapter.data_range("EMPTY").unwrap().is_none());
    }

    #[test]
    fn missing_file_is_error() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);
        let result = adapter.fetch_prices("XYZ", date(2020, 1, 1), date(2020, 1, 31));
        assert!(matches!(result, Err(BandsightError::Database { .. })));
    }

    #[test]
    fn bad_price_is_error() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);
        let result = adapter.fetch_prices("BAD", date(2020, 1, 1), date(2020, 1, 31));
        match result {
            Err(BandsightError::Database { reason }) => assert!(reason.contains("adj_close")),
            other => panic!("expected Database error, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_dates_keep_first() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);
        let prices = adapter
            .fetch_prices("DUP", date(2020, 1, 1), date(2020, 1, 31))
            .unwrap();
        assert_eq!(prices.len(), 2);
        assert_eq!(prices[0].adjusted_close, 1.0);
    }

    #[test]
    fn data_range_reports_bounds() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvAdapter::new(path);
        let (first, last, count) = adapter.data_range("AAPL").unwrap().unwrap();
        assert_eq!(first, date(2020, 1, 2));
        assert_eq!(last, date(2020, 1, 6));
        assert_eq!(count, 3);
    }
}
