//! Exponentially weighted moving average.
//!
//! alpha = 2/(span+1). Bias-adjusted weighting over every prior point:
//! EWMA[t] = sum((1-alpha)^i * C[t-i]) / sum((1-alpha)^i), i = 0..=t.
//! Defined from the first bar; no warmup.

#[derive(Debug, Clone)]
pub struct EwmaAccumulator {
    decay: f64,
    weighted_sum: f64,
    weight_total: f64,
}

impl EwmaAccumulator {
    pub fn new(span: usize) -> Self {
        let alpha = 2.0 / (span as f64 + 1.0);
        Self {
            decay: 1.0 - alpha,
            weighted_sum: 0.0,
            weight_total: 0.0,
        }
    }

    /// Feed the next value and return the updated average.
    pub fn update(&mut self, value: f64) -> f64 {
        self.weighted_sum = value + self.decay * self.weighted_sum;
        self.weight_total = 1.0 + self.decay * self.weight_total;
        self.weighted_sum / self.weight_total
    }
}
