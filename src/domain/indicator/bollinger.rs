//! Bollinger band table.
//!
//! - SMA: simple mean over the trailing `window` closes
//! - EWMA: exponentially weighted mean with the given span, defined from bar 0
//! - Upper: EWMA + (num_std × StdDev)
//! - Lower: EWMA - (num_std × StdDev)
//!
//! StdDev is the sample standard deviation (divides by N-1) over the same
//! trailing window as the SMA.
//! Warmup: SMA, StdDev and both bands are absent for the first (window-1) bars.

use chrono::NaiveDate;

use crate::domain::indicator::BandParams;
use crate::domain::indicator::ema::EwmaAccumulator;
use crate::domain::indicator::rolling::RollingWindow;
use crate::domain::price::PriceObservation;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands {
    pub stddev: f64,
    pub upper: f64,
    pub lower: f64,
}

/// One observation plus its derived columns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandRow {
    pub date: NaiveDate,
    pub adjusted_close: f64,
    pub sma: Option<f64>,
    pub ewma: f64,
    pub bands: Option<Bands>,
}

impl BandRow {
    pub fn upper_bound(&self) -> Option<f64> {
        self.bands.map(|b| b.upper)
    }

    pub fn lower_bound(&self) -> Option<f64> {
        self.bands.map(|b| b.lower)
    }

    pub fn stddev(&self) -> Option<f64> {
        self.bands.map(|b| b.stddev)
    }
}

pub fn calculate_bands(observations: &[PriceObservation], params: &BandParams) -> Vec<BandRow> {
    let mut rows = Vec::with_capacity(observations.len());
    let mut window = RollingWindow::new(params.window);
    let mut ewma = EwmaAccumulator::new(params.span);

    for obs in observations {
        window.push(obs.adjusted_close);
        let ewma_value = ewma.update(obs.adjusted_close);

        let bands = window.sample_stddev().map(|stddev| Bands {
            stddev,
            upper: ewma_value + params.num_std * stddev,
            lower: ewma_value - params.num_std * stddev,
        });

        rows.push(BandRow {
            date: obs.date,
            adjusted_close: obs.adjusted_close,
            sma: window.mean(),
            ewma: ewma_value,
            bands,
        });
    }

    rows
}
