//! Windowed statistics behind the Bollinger band table.
//!
//! - `rolling`: fixed-capacity circular buffer giving the trailing SMA and
//!   sample standard deviation
//! - `ema`: bias-adjusted exponentially weighted mean accumulator
//! - `stddev`: sample standard deviation around a given mean
//! - `bollinger`: single-pass band computation over a price series

pub mod bollinger;
pub mod ema;
pub mod rolling;
pub mod stddev;

use std::fmt;

use crate::domain::error::BandsightError;

pub const DEFAULT_WINDOW: usize = 30;
pub const DEFAULT_SPAN: usize = 30;
pub const DEFAULT_NUM_STD: f64 = 2.0;
pub const MAX_WINDOW: usize = 10_000;

/// Parameters of the band computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandParams {
    /// Trailing window for the SMA and standard deviation.
    pub window: usize,
    /// EWMA span; smoothing factor is `2 / (span + 1)`.
    pub span: usize,
    /// Band half-width in standard deviations.
    pub num_std: f64,
}

impl Default for BandParams {
    fn default() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            span: DEFAULT_SPAN,
            num_std: DEFAULT_NUM_STD,
        }
    }
}

impl BandParams {
    /// Reject parameters that would make the bands meaningless.
    pub fn validate(&self) -> Result<(), BandsightError> {
        let reason = if self.window < 2 {
            "window must be at least 2"
        } else if self.window > MAX_WINDOW {
            "window must be at most 10000"
        } else if self.span < 1 {
            "span must be at least 1"
        } else if !self.num_std.is_finite() || self.num_std < 0.0 {
            "num_std must be finite and non-negative"
        } else {
            return Ok(());
        };
        Err(BandsightError::InvalidParams {
            params: self.to_string(),
            reason: reason.to_string(),
        })
    }
}

impl fmt::Display for BandParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BOLLINGER(window={},span={},k={})",
            self.window, self.span, self.num_std
        )
    }
}
