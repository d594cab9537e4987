// =============================================================================
// On-Balance Volume (OBV)
// =============================================================================
//
// Running volume total: add the bar's volume on an up close, subtract it on a
// down close, leave unchanged on a tie.  Starts at 0.

/// Final OBV value.  NaN when the inputs are empty or of different lengths.
pub fn obv(closes: &[f64], volumes: &[f64]) -> f64 {
    if closes.is_empty() || closes.len() != volumes.len() {
        return f64::NAN;
    }

    closes
        .windows(2)
        .zip(&volumes[1..])
        .fold(0.0, |total, (w, &volume)| {
            if w[1] > w[0] {
                total + volume
            } else if w[1] < w[0] {
                total - volume
            } else {
                total
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obv_accumulates_by_direction() {
        let closes = [10.0, 11.0, 10.5, 10.5, 12.0];
        let volumes = [100.0, 200.0, 50.0, 75.0, 300.0];
        // +200 -50 +0 +300
        assert_eq!(obv(&closes, &volumes), 450.0);
    }

    #[test]
    fn obv_single_bar_is_zero() {
        assert_eq!(obv(&[10.0], &[999.0]), 0.0);
    }

    #[test]
    fn obv_rejects_bad_input() {
        assert!(obv(&[], &[]).is_nan());
        assert!(obv(&[1.0, 2.0], &[1.0]).is_nan());
    }
}
