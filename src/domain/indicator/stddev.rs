//! Sample standard deviation over a window of closes.
//!
//! STDDEV(n) = sqrt(sum((x - mean)^2) / (n - 1))

/// Sample standard deviation around a precomputed mean. `None` below two values.
pub fn sample_stddev(values: &[f64], mean: f64) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let sum_sq: f64 = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum();
    Some((sum_sq / (values.len() - 1) as f64).sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stddev_needs_two_values() {
        assert!(sample_stddev(&[5.0], 5.0).is_none());
    }

    #[test]
    fn stddev_constant_values() {
        let values = [100.0; 5];
        assert_eq!(sample_stddev(&values, 100.0), Some(0.0));
    }

    #[test]
    fn stddev_known_values() {
        // population stddev of this set is 2.0; sample divides by 7 instead of 8
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let expected = (32.0_f64 / 7.0).sqrt();
        assert!((sample_stddev(&values, 5.0).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn stddev_ignores_order() {
        let a = [10.0, 20.0, 30.0];
        let b = [30.0, 10.0, 20.0];
        assert_eq!(sample_stddev(&a, 20.0), sample_stddev(&b, 20.0));
        assert!((sample_stddev(&a, 20.0).unwrap() - 10.0).abs() < 1e-12);
    }
}
