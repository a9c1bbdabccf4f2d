//! Daily price observation.

use chrono::NaiveDate;

/// One trading day's adjusted close for a single instrument.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceObservation {
    pub date: NaiveDate,
    pub adjusted_close: f64,
}

impl PriceObservation {
    pub fn new(date: NaiveDate, adjusted_close: f64) -> Self {
        Self {
            date,
            adjusted_close,
        }
    }
}
