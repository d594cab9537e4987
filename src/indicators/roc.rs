// =============================================================================
// Rate of Change (ROC) Momentum Indicator
// =============================================================================
//
// ROC measures the percentage change in price over a look-back period:
//   ROC = ((close - close_n) / close_n) * 100
//
// Positive ROC indicates upward momentum; negative indicates downward.

/// Latest ROC for `period`.
///
/// NaN when `period == 0`, `closes.len() <= period`, or the base close is 0.
pub fn roc(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() <= period {
        return f64::NAN;
    }
    let last = closes[closes.len() - 1];
    let base = closes[closes.len() - 1 - period];
    if base == 0.0 {
        return f64::NAN;
    }
    (last - base) / base * 100.0
}
