#![allow(dead_code)]

use bandsight::domain::error::BandsightError;
pub use bandsight::domain::price::PriceObservation;
use bandsight::ports::data_port::PriceDataPort;
use chrono::{Datelike, NaiveDate, Weekday};
use std::cell::Cell;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<PriceObservation>>,
    pub errors: HashMap<String, String>,
    pub fetches: Cell<usize>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
            fetches: Cell::new(0),
        }
    }

    pub fn with_prices(mut self, ticker: &str, prices: Vec<PriceObservation>) -> Self {
        self.data.insert(ticker.to_string(), prices);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl PriceDataPort for MockDataPort {
    fn fetch_prices(
        &self,
        ticker: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<PriceObservation>, BandsightError> {
        self.fetches.set(self.fetches.get() + 1);
        if let Some(reason) = self.errors.get(ticker) {
            return Err(BandsightError::Database {
                reason: reason.clone(),
            });
        }
        Ok(self
            .data
            .get(ticker)
            .map(|prices| {
                prices
                    .iter()
                    .filter(|p| p.date >= start_date && p.date <= end_date)
                    .copied()
                    .collect()
            })
            .unwrap_or_default())
    }

    fn data_range(
        &self,
        ticker: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, BandsightError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(BandsightError::Database {
                reason: reason.clone(),
            });
        }
        match self.data.get(ticker) {
            Some(prices) if !prices.is_empty() => Ok(Some((
                prices[0].date,
                prices[prices.len() - 1].date,
                prices.len(),
            ))),
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Observations on consecutive weekdays starting at `start` (or the next weekday).
pub fn weekday_prices(start: NaiveDate, closes: &[f64]) -> Vec<PriceObservation> {
    let mut out = Vec::with_capacity(closes.len());
    let mut d = start;
    for &close in closes {
        while matches!(d.weekday(), Weekday::Sat | Weekday::Sun) {
            d = d.succ_opt().unwrap();
        }
        out.push(PriceObservation::new(d, close));
        d = d.succ_opt().unwrap();
    }
    out
}

/// Deterministic wavy closes around 100.
pub fn sample_closes(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let x = i as f64;
            100.0 + 0.3 * x + 4.0 * (x * 0.9).sin() + 1.5 * (x * 2.3).cos()
        })
        .collect()
}

/// Trailing mean of `closes[i + 1 - window..=i]`.
pub fn reference_sma(closes: &[f64], i: usize, window: usize) -> Option<f64> {
    if i + 1 < window {
        return None;
    }
    let slice = &closes[i + 1 - window..=i];
    Some(slice.iter().sum::<f64>() / window as f64)
}

/// Trailing sample standard deviation (N-1).
pub fn reference_std(closes: &[f64], i: usize, window: usize) -> Option<f64> {
    let mean = reference_sma(closes, i, window)?;
    let slice = &closes[i + 1 - window..=i];
    let ss: f64 = slice.iter().map(|v| (v - mean).powi(2)).sum();
    Some((ss / (window - 1) as f64).sqrt())
}

/// Bias-adjusted EWM mean with the given span, weights summed explicitly.
pub fn reference_ewma(closes: &[f64], i: usize, span: usize) -> f64 {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut num = 0.0;
    let mut den = 0.0;
    for (age, value) in closes[..=i].iter().rev().enumerate() {
        let w = (1.0 - alpha).powi(age as i32);
        num += w * value;
        den += w;
    }
    num / den
}
