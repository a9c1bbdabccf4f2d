//! As-of resolution and band queries.
//!
//! Any calendar date maps to the closest stored trading day on or before it,
//! never a later one. Resolution fails once the gap exceeds the store's
//! lookback limit (365 calendar days by default).

use chrono::NaiveDate;
use std::fmt;
use tracing::debug;

use crate::domain::error::BandsightError;
use crate::domain::indicator::bollinger::{BandRow, Bands};
use crate::domain::store::BandStore;

pub const MAX_LOOKBACK_DAYS: u32 = 365;

/// Where a close sits relative to its bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BandPosition {
    Stable,
    Above,
    Below,
}

impl fmt::Display for BandPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BandPosition::Stable => write!(f, "STABLE"),
            BandPosition::Above => write!(f, "ABOVE"),
            BandPosition::Below => write!(f, "BELOW"),
        }
    }
}

/// Result of a single as-of query, for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandSnapshot {
    pub requested: NaiveDate,
    pub resolved: NaiveDate,
    pub price: f64,
    pub ewma: f64,
    pub bands: Bands,
    pub position: BandPosition,
}

impl BandStore {
    /// Latest stored date on or before `date`.
    ///
    /// Equivalent to stepping back one calendar day at a time until a stored
    /// date is hit, giving up after `max_lookback_days` steps.
    pub fn resolve(&self, date: NaiveDate) -> Result<NaiveDate, BandsightError> {
        let out_of_bounds = || BandsightError::OutOfBounds {
            date,
            max_lookback_days: self.max_lookback_days,
        };

        let idx = self.rows.partition_point(|row| row.date <= date);
        if idx == 0 {
            return Err(out_of_bounds());
        }
        let found = self.rows[idx - 1].date;
        let steps = (date - found).num_days();
        if steps > i64::from(self.max_lookback_days) {
            return Err(out_of_bounds());
        }
        if steps > 0 {
            debug!(ticker = self.ticker(), %date, resolved = %found, steps, "resolved as-of date");
        }
        Ok(found)
    }

    /// Row for the resolved as-of date.
    pub fn row_as_of(&self, date: NaiveDate) -> Result<&BandRow, BandsightError> {
        let resolved = self.resolve(date)?;
        self.row(resolved).ok_or(BandsightError::OutOfBounds {
            date,
            max_lookback_days: self.max_lookback_days,
        })
    }

    fn bands_as_of(&self, date: NaiveDate) -> Result<(&BandRow, Bands), BandsightError> {
        let row = self.row_as_of(date)?;
        let bands = row
            .bands
            .ok_or(BandsightError::UndefinedBand { date: row.date })?;
        Ok((row, bands))
    }

    /// Close strictly above the upper band on the resolved date.
    pub fn is_too_high(&self, date: NaiveDate) -> Result<bool, BandsightError> {
        let (row, bands) = self.bands_as_of(date)?;
        Ok(row.adjusted_close > bands.upper)
    }

    /// Close strictly below the lower band on the resolved date.
    pub fn is_too_low(&self, date: NaiveDate) -> Result<bool, BandsightError> {
        let (row, bands) = self.bands_as_of(date)?;
        Ok(row.adjusted_close < bands.lower)
    }

    pub fn classify(&self, date: NaiveDate) -> Result<BandPosition, BandsightError> {
        if self.is_too_high(date)? {
            Ok(BandPosition::Above)
        } else if self.is_too_low(date)? {
            Ok(BandPosition::Below)
        } else {
            Ok(BandPosition::Stable)
        }
    }

    pub fn snapshot(&self, date: NaiveDate) -> Result<BandSnapshot, BandsightError> {
        let position = self.classify(date)?;
        let (row, bands) = self.bands_as_of(date)?;
        Ok(BandSnapshot {
            requested: date,
            resolved: row.date,
            price: row.adjusted_close,
            ewma: row.ewma,
            bands,
            position,
        })
    }
}
