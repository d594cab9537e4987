// =============================================================================
// Stochastic Oscillator
// =============================================================================
//
//   %K = (close - lowest low) / (highest high - lowest low) * 100
//
// over the trailing `k_period` bars.
//
// %D is conventionally the `d_period` SMA of recent %K values.  This engine
// only produces the latest %K and reports %D = %K (single-value
// approximation).  Consumers can test `STOCHASTIC_D_IS_K` to know they are
// getting the collapsed line.

use serde::Serialize;

pub const DEFAULT_K_PERIOD: usize = 14;
pub const DEFAULT_D_PERIOD: usize = 3;

/// %D is reported as a copy of %K.
pub const STOCHASTIC_D_IS_K: bool = true;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StochasticValue {
    pub k: f64,
    pub d: f64,
}

impl StochasticValue {
    fn undefined() -> Self {
        Self {
            k: f64::NAN,
            d: f64::NAN,
        }
    }
}

/// Latest %K / %D.
///
/// NaN pair when `k_period == 0`, fewer than `k_period` closes exist, or the
/// high/low columns are shorter than that.  A flat window (highest high ==
/// lowest low) reads 50.  `d_period` is accepted for signature compatibility
/// but does not change the output.
pub fn stochastic(
    highs: &[f64],
    lows: &[f64],
    closes: &[f64],
    k_period: usize,
    _d_period: usize,
) -> StochasticValue {
    if k_period == 0 || closes.len() < k_period || highs.len() < k_period || lows.len() < k_period {
        return StochasticValue::undefined();
    }

    let highest = highs[highs.len() - k_period..]
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    let lowest = lows[lows.len() - k_period..]
        .iter()
        .copied()
        .fold(f64::INFINITY, f64::min);
    let last = closes[closes.len() - 1];

    let range = highest - lowest;
    let k = if range == 0.0 {
        50.0
    } else {
        (last - lowest) / range * 100.0
    };

    StochasticValue { k, d: k }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stochastic_position_in_range() {
        let highs = [10.0, 12.0, 14.0, 13.0];
        let lows = [8.0, 9.0, 11.0, 10.0];
        let closes = [9.0, 11.0, 13.0, 12.0];
        // window of 3: HH 14, LL 9, close 12 => 60
        let v = stochastic(&highs, &lows, &closes, 3, DEFAULT_D_PERIOD);
        assert!((v.k - 60.0).abs() < 1e-10);
        assert_eq!(v.d, v.k);
    }

    #[test]
    fn stochastic_extremes() {
        let highs = [10.0, 11.0, 12.0];
        let lows = [9.0, 10.0, 11.0];
        assert!((stochastic(&highs, &lows, &[9.5, 10.5, 12.0], 3, 3).k - 100.0).abs() < 1e-10);
        assert!(stochastic(&highs, &lows, &[9.5, 10.5, 9.0], 3, 3).k.abs() < 1e-10);
    }

    #[test]
    fn stochastic_flat_window_is_midpoint() {
        let col = [5.0; 5];
        assert_eq!(stochastic(&col, &col, &col, 5, 3).k, 50.0);
    }

    #[test]
    fn stochastic_insufficient_data() {
        let col = [1.0; 13];
        let v = stochastic(&col, &col, &col, DEFAULT_K_PERIOD, DEFAULT_D_PERIOD);
        assert!(v.k.is_nan() && v.d.is_nan());
        assert!(stochastic(&col, &col, &col, 0, 3).k.is_nan());
    }

    #[test]
    fn d_line_ignores_d_period() {
        let highs = [10.0, 12.0, 14.0, 13.0];
        let lows = [8.0, 9.0, 11.0, 10.0];
        let closes = [9.0, 11.0, 13.0, 12.0];
        let short = stochastic(&highs, &lows, &closes, 3, 1);
        let long = stochastic(&highs, &lows, &closes, 3, 10);
        assert_eq!(short, long);
    }
}
