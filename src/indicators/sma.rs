// =============================================================================
// Simple Moving Average (SMA)
// =============================================================================

/// Mean of the last `period` values.
///
/// Returns NaN when `period == 0` or fewer than `period` values are available.
pub fn sma(series: &[f64], period: usize) -> f64 {
    if period == 0 || series.len() < period {
        return f64::NAN;
    }
    let window = &series[series.len() - period..];
    window.iter().sum::<f64>() / period as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sma_of_trailing_window() {
        let series = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert!((sma(&series, 3) - 4.0).abs() < 1e-12);
        assert!((sma(&series, 5) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn sma_constant_series() {
        let series = vec![42.5; 30];
        for n in [1, 5, 30] {
            assert!((sma(&series, n) - 42.5).abs() < 1e-12);
        }
    }

    #[test]
    fn sma_insufficient_or_zero_period() {
        assert!(sma(&[1.0, 2.0], 3).is_nan());
        assert!(sma(&[1.0, 2.0], 0).is_nan());
        assert!(sma(&[], 1).is_nan());
    }
}
