// =============================================================================
// Exponential Moving Average (EMA)
// =============================================================================
//
// EMA gives more weight to recent prices, making it more responsive to new
// information than the Simple Moving Average (SMA).
//
// Formula:
//   multiplier = 2 / (period + 1)
//   EMA_t      = close_t * multiplier + EMA_{t-1} * (1 - multiplier)
//
// With at least `period` values the EMA is seeded with the SMA of the first
// `period` values.  With fewer, it runs in degraded mode: seeded with the
// first value and smoothed from the second onward.
// =============================================================================

/// Smoothing multiplier `2 / (period + 1)`.
pub fn multiplier(period: usize) -> f64 {
    2.0 / (period as f64 + 1.0)
}

/// Most recent EMA value of `series` for `period`.
///
/// # Edge cases
/// - `period == 0` or empty input => NaN
/// - `series.len() < period` => degraded mode (seed = first value)
pub fn ema(series: &[f64], period: usize) -> f64 {
    if period == 0 || series.is_empty() {
        return f64::NAN;
    }

    let k = multiplier(period);
    let (seed, rest) = if series.len() >= period {
        let sma = series[..period].iter().sum::<f64>() / period as f64;
        (sma, &series[period..])
    } else {
        (series[0], &series[1..])
    };

    rest.iter()
        .fold(seed, |prev, &value| value * k + prev * (1.0 - k))
}
