//! Trailing-window accumulator backed by a circular buffer.
//!
//! Holds at most `capacity` values; once full, each push overwrites the oldest.
//! The running sum is updated incrementally, the variance is taken over the
//! buffer around that mean.

use crate::domain::indicator::stddev::sample_stddev;

#[derive(Debug, Clone)]
pub struct RollingWindow {
    buf: Vec<f64>,
    capacity: usize,
    head: usize,
    sum: f64,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: Vec::new(),
            capacity,
            head: 0,
            sum: 0.0,
        }
    }

    pub fn push(&mut self, value: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.buf.len() < self.capacity {
            self.buf.push(value);
        } else {
            self.sum -= self.buf[self.head];
            self.buf[self.head] = value;
            self.head = (self.head + 1) % self.capacity;
        }
        self.sum += value;
    }

    pub fn is_full(&self) -> bool {
        self.capacity > 0 && self.buf.len() == self.capacity
    }

    /// Mean of the window; `None` until the window is full.
    pub fn mean(&self) -> Option<f64> {
        if !self.is_full() {
            return None;
        }
        Some(self.sum / self.capacity as f64)
    }

    /// Sample standard deviation of the window; `None` until the window is full.
    pub fn sample_stddev(&self) -> Option<f64> {
        let mean = self.mean()?;
        sample_stddev(&self.buf, mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_until_full() {
        let mut w = RollingWindow::new(3);
        w.push(1.0);
        w.push(2.0);
        assert!(!w.is_full());
        assert!(w.mean().is_none());
        assert!(w.sample_stddev().is_none());
        w.push(3.0);
        assert!(w.is_full());
        assert!((w.mean().unwrap() - 2.0).abs() < f64::EPSILON);
        assert!((w.sample_stddev().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn overwrites_oldest() {
        let mut w = RollingWindow::new(3);
        for v in [10.0, 20.0, 30.0, 40.0, 50.0] {
            w.push(v);
        }
        assert!(w.is_full());
        // window is [30, 40, 50]
        assert!((w.mean().unwrap() - 40.0).abs() < 1e-12);
        assert!((w.sample_stddev().unwrap() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn constant_values_have_zero_stddev() {
        let mut w = RollingWindow::new(4);
        for _ in 0..10 {
            w.push(100.0);
        }
        assert_eq!(w.sample_stddev(), Some(0.0));
    }

    #[test]
    fn single_slot_window_has_no_stddev() {
        let mut w = RollingWindow::new(1);
        w.push(7.0);
        assert_eq!(w.mean(), Some(7.0));
        assert!(w.sample_stddev().is_none());
    }

    #[test]
    fn large_capacity_grows_on_demand() {
        let mut w = RollingWindow::new(usize::MAX / 16);
        for v in [1.0, 2.0, 3.0] {
            w.push(v);
        }
        assert!(!w.is_full());
        assert!(w.mean().is_none());
    }

    #[test]
    fn zero_capacity_never_fills() {
        let mut w = RollingWindow::new(0);
        w.push(1.0);
        assert!(!w.is_full());
        assert!(w.mean().is_none());
    }
}
