//! Date-indexed band table for one ticker.
//!
//! Built once from an ordered price series; immutable afterwards. Rows are kept
//! in a `Vec` sorted by date, so exact lookups are binary searches.

use chrono::NaiveDate;
use tracing::debug;

use crate::domain::asof::MAX_LOOKBACK_DAYS;
use crate::domain::error::BandsightError;
use crate::domain::indicator::BandParams;
use crate::domain::indicator::bollinger::{BandRow, calculate_bands};
use crate::domain::price::PriceObservation;
use crate::ports::data_port::PriceDataPort;

#[derive(Debug, Clone)]
pub struct BandStore {
    ticker: String,
    params: BandParams,
    pub(crate) max_lookback_days: u32,
    pub(crate) rows: Vec<BandRow>,
}

impl BandStore {
    /// Fetch `[start_date, end_date]` for `ticker` and derive the bands.
    pub fn build(
        data_port: &dyn PriceDataPort,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        params: BandParams,
    ) -> Result<Self, BandsightError> {
        if start_date > end_date {
            return Err(BandsightError::InvalidRange {
                start: start_date,
                end: end_date,
            });
        }
        params.validate()?;
        let observations = data_port.fetch_prices(ticker, start_date, end_date)?;
        debug!(
            ticker,
            %start_date,
            %end_date,
            rows = observations.len(),
            "fetched price series"
        );
        Self::from_observations(ticker, &observations, params)
    }

    /// Derive the bands from an already-fetched series.
    pub fn from_observations(
        ticker: &str,
        observations: &[PriceObservation],
        params: BandParams,
    ) -> Result<Self, BandsightError> {
        params.validate()?;
        if observations.is_empty() {
            return Err(BandsightError::DataUnavailable {
                ticker: ticker.to_string(),
            });
        }
        for obs in observations {
            if !obs.adjusted_close.is_finite() {
                return Err(BandsightError::InvalidPrice {
                    date: obs.date,
                    value: obs.adjusted_close,
                });
            }
        }
        if let Some(pair) = observations.windows(2).find(|w| w[0].date >= w[1].date) {
            return Err(BandsightError::UnorderedData {
                ticker: ticker.to_string(),
                date: pair[1].date,
            });
        }

        let rows = calculate_bands(observations, &params);
        debug!(ticker, %params, rows = rows.len(), "computed bands");

        Ok(Self {
            ticker: ticker.to_string(),
            params,
            max_lookback_days: MAX_LOOKBACK_DAYS,
            rows,
        })
    }

    /// Override how far back (in calendar days) as-of resolution may walk.
    pub fn with_max_lookback_days(mut self, days: u32) -> Self {
        self.max_lookback_days = days;
        self
    }

    pub fn ticker(&self) -> &str {
        &self.ticker
    }

    pub fn params(&self) -> &BandParams {
        &self.params
    }

    pub fn max_lookback_days(&self) -> u32 {
        self.max_lookback_days
    }

    pub fn rows(&self) -> &[BandRow] {
        &self.rows
    }

    pub fn trading_days(&self) -> usize {
        self.rows.len()
    }

    pub fn first_date(&self) -> NaiveDate {
        self.rows[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.rows[self.rows.len() - 1].date
    }

    /// Row stored for exactly `date`.
    pub fn row(&self, date: NaiveDate) -> Option<&BandRow> {
        self.rows
            .binary_search_by_key(&date, |row| row.date)
            .ok()
            .map(|i| &self.rows[i])
    }

    /// Adjusted close on the last trading day on or before `today`.
    pub fn last_close_price(&self, today: NaiveDate) -> Result<f64, BandsightError> {
        self.get_price(today)
    }

    /// Adjusted close on the last trading day on or before `date`.
    pub fn get_price(&self, date: NaiveDate) -> Result<f64, BandsightError> {
        Ok(self.row_as_of(date)?.adjusted_close)
    }

    /// Highest adjusted close in the stored range.
    pub fn max_value(&self) -> f64 {
        self.max_row().adjusted_close
    }

    /// Date of the highest adjusted close; the earliest one on ties.
    pub fn date_of_max_value(&self) -> NaiveDate {
        self.max_row().date
    }

    fn max_row(&self) -> &BandRow {
        // strict comparison keeps the first of equal maxima
        self.rows.iter().fold(&self.rows[0], |best, row| {
            if row.adjusted_close > best.adjusted_close {
                row
            } else {
                best
            }
        })
    }
}
