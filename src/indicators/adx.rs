// =============================================================================
// Average Directional Index (ADX)
// =============================================================================
//
// Placeholder.  The charting layer reserves a slot for ADX but no directional
// movement calculation is wired up; every call reports "not available" (NaN),
// the same sentinel the rest of the library uses for insufficient data.

/// Always NaN.
pub fn adx(_highs: &[f64], _lows: &[f64], _closes: &[f64], _period: usize) -> f64 {
    f64::NAN
}
