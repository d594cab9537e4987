// =============================================================================
// Average True Range (ATR)
// =============================================================================
//
// ATR measures market volatility by decomposing the entire range of a bar.
//
// True Range (TR) for each bar:
//   TR = max(H - L, |H - prevClose|, |L - prevClose|)
//
// The value reported here is the plain mean of TR over the trailing `period`
// bars (no Wilder smoothing).  `prevClose` for bar `i` is `closes[i - 1]`,
// clamped to `closes[0]` at the left edge.
//
// Default period: 14
// =============================================================================

/// True Range of bar `i`.
fn true_range(highs: &[f64], lows: &[f64], closes: &[f64], i: usize) -> f64 {
    let prev_close = closes[i.saturating_sub(1)];
    let hl = highs[i] - lows[i];
    let hc = (highs[i] - prev_close).abs();
    let lc = (lows[i] - prev_close).abs();
    hl.max(hc).max(lc)
}

/// Average True Range over the trailing `period` bars.
///
/// The three columns are expected to be index-aligned.  Returns NaN when
/// `period == 0` or any column has fewer than `period + 1` values.
pub fn atr(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> f64 {
    let min_len = period + 1;
    if period == 0 || highs.len() < min_len || lows.len() < min_len || closes.len() < min_len {
        return f64::NAN;
    }

    let n = highs.len().min(lows.len()).min(closes.len());
    let sum: f64 = (n - period..n)
        .map(|i| true_range(highs, lows, closes, i))
        .sum();
    sum / period as f64
}

/// ATR as a percentage of the last close.
///
/// Useful for comparing volatility across instruments with different price
/// scales.  NaN when the ATR is undefined or the last close is zero.
pub fn atr_percent(highs: &[f64], lows: &[f64], closes: &[f64], period: usize) -> f64 {
    let value = atr(highs, lows, closes, period);
    match closes.last() {
        Some(&last) if last != 0.0 && value.is_finite() => value / last * 100.0,
        _ => f64::NAN,
    }
}
